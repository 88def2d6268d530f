//! Shared types and constants for the Placard frame platform.
//!
//! This crate provides the foundational types used across all Placard
//! crates: the inbound interaction payload, frame and button descriptors,
//! action-call bodies, result identifiers, and the interaction status
//! enum that drives the context resolver's state machine.
//!
//! No crate in the workspace depends on anything *except* `placard-types`
//! for cross-cutting type definitions. This keeps the dependency graph
//! clean and prevents circular dependencies.

use serde::{Deserialize, Serialize};
use thiserror::Error;

mod action;
mod frame;

pub use action::{ActionBody, ActionResponse, CastId, FramePayload, ResponseSummary};
pub use frame::{ButtonDescriptor, Frame, FrameInput, MAX_BUTTONS};

/// Interaction status of one request/response cycle.
///
/// Recomputed on every cycle from the inbound payload and the recorded
/// button values; never persisted independently of the payload that
/// produced it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InteractionStatus {
    /// No prior interaction: first load, or an explicit reset.
    #[default]
    #[serde(rename = "initial")]
    Initial,
    /// A normal button/input submission awaiting a new frame.
    #[serde(rename = "response")]
    Response,
    /// The prior action was a redirect-class button; the client must
    /// resolve a destination before continuing.
    #[serde(rename = "redirect")]
    Redirect,
}

impl InteractionStatus {
    /// Returns the canonical string label for this status.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Initial => "initial",
            Self::Response => "response",
            Self::Redirect => "redirect",
        }
    }
}

impl std::fmt::Display for InteractionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for InteractionStatus {
    type Err = ParseInteractionStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "initial" => Ok(Self::Initial),
            "response" => Ok(Self::Response),
            "redirect" => Ok(Self::Redirect),
            _ => Err(ParseInteractionStatusError(s.to_string())),
        }
    }
}

/// Error returned when parsing an unknown interaction status string.
#[derive(Debug, Clone, Error)]
#[error("unknown interaction status: {0}")]
pub struct ParseInteractionStatusError(pub String);

/// The four button behaviors a frame can declare.
///
/// Each variant owns a distinct dispatch contract: `Post` submits to the
/// frame's action URL, `PostRedirect` submits and then follows a staged
/// redirect behind a confirmation prompt, `Link` opens an external URL
/// behind the same prompt without any network call, and `Mint` is
/// presentational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonType {
    /// Plain action submission.
    Post,
    /// Action submission followed by a confirmed redirect.
    PostRedirect,
    /// External link behind the leaving-host confirmation.
    Link,
    /// Minting affordance; presentational in this scope.
    Mint,
}

impl ButtonType {
    /// Returns the canonical wire string for this button type.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Post => "post",
            Self::PostRedirect => "post_redirect",
            Self::Link => "link",
            Self::Mint => "mint",
        }
    }
}

impl std::fmt::Display for ButtonType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ButtonType {
    type Err = ParseButtonTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "post" => Ok(Self::Post),
            "post_redirect" => Ok(Self::PostRedirect),
            "link" => Ok(Self::Link),
            "mint" => Ok(Self::Mint),
            _ => Err(ParseButtonTypeError(s.to_string())),
        }
    }
}

/// Error returned when parsing an unknown button type string.
#[derive(Debug, Clone, Error)]
#[error("unknown button type: {0}")]
pub struct ParseButtonTypeError(pub String);

/// Opaque identifier for one interaction result.
///
/// Minted by the server for each completed interaction cycle and recorded
/// in the client's history stack. The token carries no structure the
/// client may rely on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultId(String);

impl ResultId {
    /// Mints a fresh random result id.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Returns the raw token.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ResultId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl From<&str> for ResultId {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

impl std::fmt::Display for ResultId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Recorded button value marking a reset-class button.
///
/// Recorded values beginning with `_` are reserved for the platform;
/// developer-supplied button values must not start with `_`.
pub const RESET_VALUE: &str = "_reset";

/// Recorded button value (or value prefix) marking a redirect-class button.
pub const REDIRECT_VALUE: &str = "_redirect";

/// Returns true if a recorded button value marks a reset-class button.
pub fn is_reset_value(value: &str) -> bool {
    value == RESET_VALUE
}

/// Returns true if a recorded button value marks a redirect-class button.
pub fn is_redirect_value(value: &str) -> bool {
    value == REDIRECT_VALUE
        || value
            .strip_prefix(REDIRECT_VALUE)
            .is_some_and(|rest| rest.starts_with(':'))
}

/// Builds the recorded value for a redirect-class button with an explicit
/// target URL.
pub fn redirect_value(target: &str) -> String {
    format!("{REDIRECT_VALUE}:{target}")
}

//! Inbound interaction payloads and outbound action-call bodies.

use crate::ResultId;
use serde::{Deserialize, Serialize};

/// Identifier of the cast a frame interaction happened under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastId {
    /// Identity that posted the cast.
    pub fid: i64,
    /// Hash of the cast.
    pub hash: String,
}

/// Inbound signed interaction data, immutable once received.
///
/// Every field is optional and defaults to absent: the payload is
/// attacker-influenced (signed, but not schema-guaranteed), so parsing is
/// deliberately permissive and malformed fields degrade to "no signal"
/// rather than failing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FramePayload {
    /// 1-based index of the pressed button (1–4), if any.
    #[serde(rename = "buttonIndex", skip_serializing_if = "Option::is_none", default)]
    pub button_index: Option<u8>,
    /// Cast the interaction happened under.
    #[serde(rename = "castId", skip_serializing_if = "Option::is_none", default)]
    pub cast_id: Option<CastId>,
    /// Acting identity.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub fid: Option<i64>,
    /// Free-form text entered by the user. Absence is distinct from the
    /// empty string and must be preserved.
    #[serde(rename = "inputText", skip_serializing_if = "Option::is_none", default)]
    pub input_text: Option<String>,
    /// Opaque state blob echoed back from the previous frame.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub state: Option<String>,
    /// Identifier of a pending transaction, if any.
    #[serde(rename = "transactionId", skip_serializing_if = "Option::is_none", default)]
    pub transaction_id: Option<String>,
}

/// Body of an outbound action call issued by the dispatcher for `Post`
/// and `PostRedirect` buttons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionBody {
    /// 1-based index of the pressed button.
    #[serde(rename = "buttonIndex")]
    pub button_index: u8,
    /// Cast the interaction happened under.
    #[serde(rename = "castId")]
    pub cast_id: CastId,
    /// Acting identity.
    pub fid: i64,
    /// Text entered by the user, if any.
    #[serde(rename = "inputText", skip_serializing_if = "Option::is_none", default)]
    pub input_text: Option<String>,
    /// The current frame's opaque state blob.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub state: Option<String>,
    /// Button target, falling back to the frame's declared action URL.
    pub url: String,
}

impl From<&ActionBody> for FramePayload {
    /// Wraps an action body into the payload shape a frame host receives.
    fn from(body: &ActionBody) -> Self {
        Self {
            button_index: Some(body.button_index),
            cast_id: Some(body.cast_id.clone()),
            fid: Some(body.fid),
            input_text: body.input_text.clone(),
            state: body.state.clone(),
            transaction_id: None,
        }
    }
}

/// Summary of the frame host's HTTP response to an action call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseSummary {
    /// HTTP status returned by the frame host.
    pub status: u16,
    /// Redirect destination, present when the host answered `302`.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub location: Option<String>,
}

/// Envelope returned by the action endpoint for one completed interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResponse {
    /// Result identifier under which the interaction outcome is stored.
    pub id: ResultId,
    /// Summary of the frame host's response.
    pub response: ResponseSummary,
}

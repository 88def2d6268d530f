//! Context resolution for one render pass of one interaction cycle.

use crate::intent::{extract_intent, Intent};
use crate::path::parse_path;
use placard_types::{FramePayload, InteractionStatus};
use serde::{Deserialize, Serialize};
use std::future::Future;
use url::Url;

/// Error surfaced by a developer-supplied state derivation.
///
/// Derivation failures are propagated, never swallowed: committing a
/// partially-applied mutation would break the copy-on-write invariant, so
/// the draft is discarded and the committed state remains valid.
pub type DeriveError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The two render passes of one interaction cycle.
///
/// Every request is rendered twice: a `Full` pass producing the complete
/// frame response, and an `Image` pass producing only the image variant.
/// The image pass reuses the state derived by the full pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderCycle {
    /// Pass producing the full frame response.
    Full,
    /// Pass producing only the image variant.
    Image,
}

/// Request-scoped inputs assembled by the routing layer.
#[derive(Debug, Clone)]
pub struct RequestContext<S> {
    /// Path of the first frame in the chain, used to rebase on reset.
    pub initial_path: String,
    /// Verified interaction payload; absent on first load.
    pub payload: Option<FramePayload>,
    /// Recorded button values of the previously served frame, indexed by
    /// button position.
    pub previous_button_values: Vec<Option<String>>,
    /// Application state recorded by the previous cycle, if any.
    pub previous_state: Option<S>,
    /// Full URL of the inbound request.
    pub request_url: String,
    /// Status carried over from the routing layer; `Initial` on first load.
    pub status: InteractionStatus,
    /// URL of the frame being served.
    pub url: String,
    /// Whether the inbound payload passed signature verification.
    pub verified: bool,
}

/// Parameters for [`resolve_context`].
#[derive(Debug, Clone)]
pub struct ResolveParams<S> {
    /// The inbound request context.
    pub context: RequestContext<S>,
    /// Which render pass is being resolved.
    pub cycle: RenderCycle,
    /// State the chain starts from.
    pub initial_state: S,
    /// State already derived by the full pass; consulted by the image pass
    /// so the derivation never runs twice for one request.
    pub prior_state: Option<S>,
}

/// Marker distinguishing frame responses from other response kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseFormat {
    /// A frame document response.
    Frame,
}

/// Arbitrary developer data tagged for the frame rendering layer.
///
/// This crate only produces the tag; the rendering layer owns the schema
/// of `data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaggedResponse<T> {
    /// The developer-supplied response data.
    pub data: T,
    /// Response format marker.
    pub format: ResponseFormat,
}

/// Resolved context for one render pass of one interaction cycle.
///
/// Produced by [`resolve_context`]; carries the extracted intent, the
/// recomputed status and canonical URL, and the copy-on-write state cell
/// that [`derive_state`](Self::derive_state) operates on.
#[derive(Debug)]
pub struct FrameContext<S: Clone> {
    /// 1-based index of the pressed button, if any.
    pub button_index: Option<u8>,
    /// Recorded value of the pressed button, sentinels included.
    pub button_value: Option<String>,
    /// Which render pass this context serves.
    pub cycle: RenderCycle,
    /// Path of the first frame in the chain.
    pub initial_path: String,
    /// Text entered by the user; absence is distinct from the empty string.
    pub input_text: Option<String>,
    /// The verified inbound payload.
    pub payload: Option<FramePayload>,
    /// Recorded button values of the previously served frame.
    pub previous_button_values: Vec<Option<String>>,
    /// Full URL of the inbound request.
    pub request_url: String,
    /// Interaction status of this cycle.
    pub status: InteractionStatus,
    /// Identifier of a pending transaction, if any.
    pub transaction_id: Option<String>,
    /// Canonical URL for this cycle.
    pub url: String,
    /// Whether the inbound payload passed signature verification.
    pub verified: bool,
    /// State committed by the previous cycle (or the initial state).
    committed: S,
    /// State already derived by the full pass, for the image pass.
    image_state: Option<S>,
}

impl<S: Clone> FrameContext<S> {
    /// Returns the state for this cycle without running a derivation.
    pub fn state(&self) -> &S {
        &self.committed
    }

    /// Derives this cycle's state from the previous cycle's state.
    ///
    /// The committed state is never mutated in place: `derive` receives an
    /// independently owned clone and returns the new state, which is
    /// committed in a single swap only after the future resolves
    /// successfully. On error the draft is discarded and the committed
    /// state is left exactly as it was.
    ///
    /// Outside a live `Response` cycle the committed state is returned
    /// unchanged, and the image pass returns the value already derived by
    /// the full pass instead of re-running `derive`.
    ///
    /// Synchronous derivations wrap their result in an immediately ready
    /// future, so callers await uniformly regardless of function kind:
    ///
    /// ```rust,ignore
    /// let state = context
    ///     .derive_state(|mut state| async move {
    ///         state.count += 1;
    ///         Ok(state)
    ///     })
    ///     .await?;
    /// ```
    pub async fn derive_state<F, Fut>(&mut self, derive: F) -> Result<&S, DeriveError>
    where
        F: FnOnce(S) -> Fut,
        Fut: Future<Output = Result<S, DeriveError>>,
    {
        if self.status != InteractionStatus::Response {
            return Ok(&self.committed);
        }
        if self.cycle == RenderCycle::Image {
            return Ok(self.image_state.as_ref().unwrap_or(&self.committed));
        }

        let draft = self.committed.clone();
        let next = derive(draft).await?;
        self.committed = next;
        Ok(&self.committed)
    }

    /// Consumes the context and yields the final committed state, to be
    /// recorded for the next cycle.
    pub fn into_state(self) -> S {
        self.committed
    }

    /// Tags developer data as a frame response for the rendering layer.
    pub fn res<T>(&self, data: T) -> TaggedResponse<T> {
        TaggedResponse {
            data,
            format: ResponseFormat::Frame,
        }
    }
}

/// Resolves the context for one render pass.
///
/// Runs the intent extractor over the inbound payload, recomputes the
/// interaction status and canonical URL, and selects the state the cycle
/// starts from. Performs no I/O and raises no errors.
pub fn resolve_context<S: Clone>(params: ResolveParams<S>) -> FrameContext<S> {
    let ResolveParams {
        context,
        cycle,
        initial_state,
        prior_state,
    } = params;

    let intent = extract_intent(&context.previous_button_values, context.payload.as_ref());
    let status = compute_status(&intent, context.status);
    let url = compute_url(&intent, &context.request_url, &context.initial_path, &context.url);

    let committed = if context.status == InteractionStatus::Initial {
        initial_state
    } else {
        context.previous_state.unwrap_or(initial_state)
    };

    let Intent {
        button_value,
        input_text,
        ..
    } = intent;

    FrameContext {
        button_index: context.payload.as_ref().and_then(|p| p.button_index),
        button_value,
        cycle,
        initial_path: context.initial_path,
        input_text,
        transaction_id: context
            .payload
            .as_ref()
            .and_then(|p| p.transaction_id.clone()),
        payload: context.payload,
        previous_button_values: context.previous_button_values,
        request_url: context.request_url,
        status,
        url,
        verified: context.verified,
        committed,
        image_state: prior_state,
    }
}

/// Recomputes the cycle's status from the extracted intent.
///
/// Redirect takes precedence over reset; with neither signal the status
/// falls back to the one the routing layer carried over.
fn compute_status(intent: &Intent, fallback: InteractionStatus) -> InteractionStatus {
    if intent.redirect {
        InteractionStatus::Redirect
    } else if intent.reset {
        InteractionStatus::Initial
    } else {
        fallback
    }
}

/// Computes the cycle's canonical URL.
///
/// A reset press rebases to the request origin plus the recorded initial
/// path, discarding any mid-chain path; otherwise the context URL is
/// canonicalized.
fn compute_url(intent: &Intent, request_url: &str, initial_path: &str, context_url: &str) -> String {
    if intent.reset {
        if let Ok(parsed) = Url::parse(request_url) {
            return format!("{}{}", parsed.origin().ascii_serialization(), initial_path);
        }
    }
    parse_path(context_url)
}

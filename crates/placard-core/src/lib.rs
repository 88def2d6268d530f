//! Frame interaction core for the Placard platform.
//!
//! Implements the two pure computations at the heart of a frame chain:
//!
//! - **Intent extraction** ([`extract_intent`]): given the previously
//!   recorded button values and the verified inbound payload, determines
//!   which button (if any) was pressed, what text was entered, and whether
//!   the press implies a redirect-follow or a reset-to-initial.
//! - **Context resolution** ([`resolve_context`]): computes the cycle's
//!   interaction status and canonical URL, and binds a copy-on-write state
//!   derivation entry point so that replaying or branching the interaction
//!   history can never retroactively corrupt an earlier cycle's state.
//!
//! Both are synchronous, deterministic, and raise no domain errors:
//! malformed payload fields degrade to "no signal" because the payload is
//! attacker-influenced (signed, but not schema-guaranteed). The only
//! suspension point is the developer-supplied derivation future awaited
//! inside [`FrameContext::derive_state`].

mod context;
mod intent;
mod path;

pub use context::{
    resolve_context, DeriveError, FrameContext, RenderCycle, RequestContext, ResolveParams,
    ResponseFormat, TaggedResponse,
};
pub use intent::{extract_intent, Intent};
pub use path::parse_path;

//! Client-side interaction state for the Placard platform.
//!
//! Implements the pieces a frame-previewing client needs to drive a chain
//! of frame documents:
//!
//! - the **interaction history stack** ([`HistoryStack`]): an ordered
//!   sequence of result identifiers with a cursor, supporting append,
//!   branch-overwrite, and positional replay;
//! - the **action dispatcher** ([`Dispatcher`]): maps a button's declared
//!   type to its behavior (post, post-redirect, link, mint), issues the
//!   outbound call, and records the outcome in the history;
//! - the **leaving-host confirmation** ([`LeavingPrompt`]): the modal
//!   state machine shown before navigating away from the frame host for
//!   link-like and redirecting actions.
//!
//! The design assumes at most one in-flight interaction per session; the
//! prompt re-entrancy guard in the dispatcher is the minimum safeguard,
//! and queueing or rejecting concurrent actions is the embedding's
//! concern.

mod dispatch;
mod history;
mod prompt;
mod session;
mod transport;

pub use dispatch::{DispatchError, DispatchOutcome, Dispatcher};
pub use history::HistoryStack;
pub use prompt::{FocusGuard, LeavingPrompt, NoopFocusGuard};
pub use session::{FrameSession, IdentityOverrides, UserIdentity};
pub use transport::{ActionTransport, HttpTransport, TransportError};

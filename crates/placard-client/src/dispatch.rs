//! Button dispatch: maps a pressed button to its declared behavior.

use crate::session::FrameSession;
use crate::transport::{ActionTransport, TransportError};
use placard_types::{ActionBody, ButtonDescriptor, ButtonType, CastId, Frame, ResultId};
use thiserror::Error;

/// Errors from dispatching a button press.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The outbound action call failed. The history was not advanced and
    /// the session is unchanged, so the same action can be retried.
    #[error("action dispatch failed: {0}")]
    Transport(#[from] TransportError),
}

/// Outcome of one button dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The action completed and the history advanced to `id`.
    Advanced {
        /// Result id recorded in the history.
        id: ResultId,
    },
    /// The leaving-host confirmation was opened with `url` staged. `id`
    /// is present when a network action also advanced the history
    /// (`PostRedirect`); absent for static links.
    ConfirmationRequested {
        /// Result id recorded in the history, if the press posted.
        id: Option<ResultId>,
        /// The staged destination.
        url: String,
    },
    /// The press had no effect: a mint button, a press while the
    /// confirmation is already open, or a link without a target.
    Ignored,
}

/// Dispatches button presses for a frame session.
///
/// Each of the four button types owns its full side-effect contract, and
/// the match over them is exhaustive so a new type cannot silently fall
/// through to another's behavior.
#[derive(Debug)]
pub struct Dispatcher<T: ActionTransport> {
    transport: T,
}

impl<T: ActionTransport> Dispatcher<T> {
    /// Creates a dispatcher over the given transport.
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Dispatches one button press against the currently displayed frame.
    ///
    /// On transport failure the session is left untouched; a successful
    /// call commits the result id (advancing the history and consuming
    /// typed input) before any confirmation is staged. Cancelling a
    /// staged confirmation therefore never needs to roll anything back;
    /// only the navigation is cancellable.
    pub async fn dispatch(
        &self,
        session: &mut FrameSession,
        frame: &Frame,
        button: &ButtonDescriptor,
    ) -> Result<DispatchOutcome, DispatchError> {
        match button.button_type {
            ButtonType::Post => {
                let body = action_body(session, frame, button);
                let response = self.transport.post_action(&body).await?;
                session.commit(response.id.clone());
                tracing::debug!(id = %response.id, "action advanced");
                Ok(DispatchOutcome::Advanced { id: response.id })
            }
            ButtonType::PostRedirect => {
                if session.prompt.is_open() {
                    return Ok(DispatchOutcome::Ignored);
                }
                let body = action_body(session, frame, button);
                let response = self.transport.post_redirect(&body).await?;
                session.commit(response.id.clone());

                if response.response.status == 302 {
                    if let Some(location) = response.response.location {
                        session.prompt.open(location.clone());
                        tracing::debug!(id = %response.id, url = %location, "redirect staged");
                        return Ok(DispatchOutcome::ConfirmationRequested {
                            id: Some(response.id),
                            url: location,
                        });
                    }
                }
                // No resolvable destination: the post itself still counts.
                Ok(DispatchOutcome::Advanced { id: response.id })
            }
            ButtonType::Link => {
                if session.prompt.is_open() {
                    return Ok(DispatchOutcome::Ignored);
                }
                match &button.target {
                    Some(target) => {
                        session.prompt.open(target.clone());
                        Ok(DispatchOutcome::ConfirmationRequested {
                            id: None,
                            url: target.clone(),
                        })
                    }
                    None => Ok(DispatchOutcome::Ignored),
                }
            }
            ButtonType::Mint => Ok(DispatchOutcome::Ignored),
        }
    }
}

/// Builds the outbound action body for a post-class press.
fn action_body(session: &FrameSession, frame: &Frame, button: &ButtonDescriptor) -> ActionBody {
    ActionBody {
        button_index: button.index,
        cast_id: CastId {
            fid: session.overrides.cast_fid,
            hash: session.overrides.cast_hash.clone(),
        },
        fid: session.acting_fid(),
        input_text: if session.input_text.is_empty() {
            None
        } else {
            Some(session.input_text.clone())
        },
        state: frame.state.clone(),
        url: button
            .target
            .clone()
            .unwrap_or_else(|| frame.post_url.clone()),
    }
}

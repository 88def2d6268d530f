//! Per-session client state for one active frame chain.

use crate::history::HistoryStack;
use crate::prompt::LeavingPrompt;
use placard_types::ResultId;

/// The identity currently signed in to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserIdentity {
    /// The signed-in identity.
    pub fid: i64,
}

/// Identity values the client substitutes into action bodies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityOverrides {
    /// Identity attributed to the cast the frame lives under.
    pub cast_fid: i64,
    /// Hash of that cast.
    pub cast_hash: String,
    /// Acting identity for interactions.
    pub user_fid: i64,
}

impl Default for IdentityOverrides {
    fn default() -> Self {
        Self {
            cast_fid: 1,
            cast_hash: "0x0000000000000000000000000000000000000000".to_string(),
            user_fid: 1,
        }
    }
}

/// Client-side state for one active frame session.
///
/// Each session's state is independently owned and never aliased between
/// sessions. The history and typed input advance together: a completed
/// dispatch commits the result id and consumes any typed input in one
/// step.
#[derive(Debug, Default)]
pub struct FrameSession {
    /// Interaction history for this session.
    pub history: HistoryStack,
    /// Text currently typed into the frame's input.
    pub input_text: String,
    /// The leaving-host confirmation for this session.
    pub prompt: LeavingPrompt,
    /// The signed-in identity, if any.
    pub user: Option<UserIdentity>,
    /// Identity overrides applied to action bodies.
    pub overrides: IdentityOverrides,
}

impl FrameSession {
    /// Creates a fresh session with default identity overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one completed interaction: advances the history and clears
    /// the typed input. Called exactly once per completed, non-cancelled
    /// dispatch.
    pub(crate) fn commit(&mut self, id: ResultId) {
        self.history.advance(id);
        self.input_text.clear();
    }

    /// The identity an action is issued as: the override, unless it
    /// already equals the signed-in user's.
    pub fn acting_fid(&self) -> i64 {
        match self.user {
            Some(user) if self.overrides.user_fid == user.fid => user.fid,
            _ => self.overrides.user_fid,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commit_advances_history_and_consumes_input() {
        let mut session = FrameSession::new();
        session.input_text = "hello".to_string();

        session.commit(ResultId::from("r1"));
        assert_eq!(session.history.len(), 1);
        assert_eq!(session.input_text, "");
    }

    #[test]
    fn acting_fid_prefers_the_override() {
        let mut session = FrameSession::new();
        session.user = Some(UserIdentity { fid: 7 });
        session.overrides.user_fid = 99;
        assert_eq!(session.acting_fid(), 99);

        session.overrides.user_fid = 7;
        assert_eq!(session.acting_fid(), 7);

        session.user = None;
        session.overrides.user_fid = 123;
        assert_eq!(session.acting_fid(), 123);
    }
}

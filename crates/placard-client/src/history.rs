//! Interaction history: an ordered sequence of result ids with a cursor.

use placard_types::ResultId;

/// Ordered record of interaction results for one frame session.
///
/// The entry at the cursor is the one currently displayed. History is not
/// a DAG: it is a single mutable path that truncates on divergence.
/// [`advance`](Self::advance) is the only mutator of the sequence and the
/// cursor, and upholds `0 <= cursor < len` whenever the stack is
/// non-empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryStack {
    entries: Vec<ResultId>,
    cursor: Option<usize>,
}

impl HistoryStack {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a completed interaction result.
    ///
    /// When the cursor sits before the end of the stack (the user
    /// navigated back), everything after the cursor is discarded before
    /// the new entry is appended: diverging from a previous path
    /// overwrites the branch, and there is no redo once you branch.
    pub fn advance(&mut self, id: ResultId) {
        let next = self.cursor.map_or(0, |cursor| cursor + 1);
        if next < self.entries.len() {
            self.entries.truncate(next);
        }
        self.entries.push(id);
        self.cursor = Some(next);
    }

    /// Returns the currently displayed entry.
    pub fn current(&self) -> Option<&ResultId> {
        self.cursor.and_then(|cursor| self.entries.get(cursor))
    }

    /// Moves the cursor one entry back and returns the entry to display.
    pub fn back(&mut self) -> Option<&ResultId> {
        let cursor = self.cursor?.checked_sub(1)?;
        self.cursor = Some(cursor);
        self.entries.get(cursor)
    }

    /// Moves the cursor one entry forward and returns the entry to
    /// display.
    pub fn forward(&mut self) -> Option<&ResultId> {
        let cursor = self.cursor? + 1;
        if cursor >= self.entries.len() {
            return None;
        }
        self.cursor = Some(cursor);
        self.entries.get(cursor)
    }

    /// Current cursor position, if the history is non-empty.
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Recorded entries, oldest first.
    pub fn entries(&self) -> &[ResultId] {
        &self.entries
    }

    /// Number of recorded entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

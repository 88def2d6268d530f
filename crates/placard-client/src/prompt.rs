//! The leaving-host confirmation prompt.

/// Hook supplied by the embedding to trap keyboard focus while the prompt
/// is open.
///
/// Focus-trap internals are out of scope for this crate; the prompt only
/// guarantees that the guard is activated when the prompt opens and
/// released unconditionally whenever it closes.
pub trait FocusGuard: Send {
    /// Called when the prompt opens.
    fn activate(&mut self);
    /// Called whenever the prompt closes, regardless of how.
    fn deactivate(&mut self);
}

/// Guard for embeddings without keyboard focus to manage.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopFocusGuard;

impl FocusGuard for NoopFocusGuard {
    fn activate(&mut self) {}
    fn deactivate(&mut self) {}
}

/// Modal confirmation shown before navigating away from the frame host.
///
/// Link-like and redirecting actions stage their destination here; the
/// user then either cancels (no navigation) or continues (the embedding
/// opens the staged URL in a new browsing context). While open, the
/// prompt holds the focus guard active so keyboard navigation cannot
/// escape it.
pub struct LeavingPrompt {
    staged: Option<String>,
    guard: Box<dyn FocusGuard>,
}

impl LeavingPrompt {
    /// Creates a closed prompt with no focus handling.
    pub fn new() -> Self {
        Self::with_guard(Box::new(NoopFocusGuard))
    }

    /// Creates a closed prompt with an embedding-supplied focus guard.
    pub fn with_guard(guard: Box<dyn FocusGuard>) -> Self {
        Self {
            staged: None,
            guard,
        }
    }

    /// True while a destination is staged and awaiting confirmation.
    pub fn is_open(&self) -> bool {
        self.staged.is_some()
    }

    /// The staged destination, if the prompt is open.
    pub fn staged_url(&self) -> Option<&str> {
        self.staged.as_deref()
    }

    /// Stages a destination and opens the prompt.
    pub(crate) fn open(&mut self, url: String) {
        if self.staged.is_none() {
            self.guard.activate();
        }
        self.staged = Some(url);
    }

    /// Dismisses the prompt without navigating.
    pub fn cancel(&mut self) {
        self.close();
    }

    /// Dismisses the prompt and returns the staged URL for the embedding
    /// to open in a new browsing context.
    pub fn confirm(&mut self) -> Option<String> {
        self.close()
    }

    /// Releases the focus trap and clears the staged destination. The
    /// release happens even if the prompt was not open.
    fn close(&mut self) -> Option<String> {
        self.guard.deactivate();
        self.staged.take()
    }
}

impl Default for LeavingPrompt {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for LeavingPrompt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LeavingPrompt")
            .field("staged", &self.staged)
            .finish_non_exhaustive()
    }
}

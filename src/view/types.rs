//! Value types exposed by views.

use serde::Serialize;

/// Debounce state of a view's search input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewPhase {
    /// No commit is waiting.
    Idle,
    /// Typed input is waiting for its quiet period.
    Pending,
}

/// What: Read-only projection of a view at one point in time.
///
/// Inputs: Produced by `View::current`.
///
/// Output: Visible records plus counters for "showing X of Y" and "load more (N)".
#[derive(Debug, Clone, Serialize)]
pub struct ViewSnapshot<'a, T> {
    /// Records in the visible window, in display order.
    pub visible: Vec<&'a T>,
    /// Size of the filtered (and ordered) result.
    pub total_matched: usize,
    /// Matched records not yet visible.
    pub remaining: usize,
    /// Size of the whole collection.
    pub total: usize,
}

impl<T> ViewSnapshot<'_, T> {
    /// Whether "load more" would reveal anything.
    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.remaining > 0
    }
}

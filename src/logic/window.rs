//! Growable prefix window over an ordered result ("load more").

/// What: Visible-prefix size with growth and reset.
///
/// Inputs:
/// - `initial`: Size after construction and after every reset (at least 1)
/// - `step`: Default growth per `grow` (at least 1)
///
/// Output:
/// - `visible_len(total)` and `remaining(total)` for a result of `total` records.
///
/// Details:
/// - Growth is clamped to `max(total, initial)`, so "load more" past the end is
///   a no-op rather than an error, and the size never drops below `initial`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    /// Configured initial size.
    initial: usize,
    /// Configured default growth step.
    step: usize,
    /// Current size.
    size: usize,
}

impl Window {
    /// Create a window at its initial size. Zero arguments are clamped to 1.
    #[must_use]
    pub fn new(initial: usize, step: usize) -> Self {
        let initial = initial.max(1);
        Self {
            initial,
            step: step.max(1),
            size: initial,
        }
    }

    /// Grow by the configured step. Returns `true` when the size changed.
    pub fn grow(&mut self, total: usize) -> bool {
        self.grow_by(self.step, total)
    }

    /// Grow by `step`, clamped to the result length. Returns `true` when the size changed.
    pub fn grow_by(&mut self, step: usize, total: usize) -> bool {
        let ceiling = total.max(self.initial);
        let next = self.size.saturating_add(step).min(ceiling).max(self.size);
        let changed = next != self.size;
        self.size = next;
        changed
    }

    /// Restore the initial size. Returns `true` when the size changed.
    pub fn reset(&mut self) -> bool {
        let changed = self.size != self.initial;
        self.size = self.initial;
        changed
    }

    /// Current size.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Initial size.
    #[must_use]
    pub const fn initial(&self) -> usize {
        self.initial
    }

    /// Number of visible records for a result of `total`.
    #[must_use]
    pub fn visible_len(&self, total: usize) -> usize {
        self.size.min(total)
    }

    /// Records hidden behind "load more".
    #[must_use]
    pub fn remaining(&self, total: usize) -> usize {
        total - self.visible_len(total)
    }

    /// Visible prefix of `ordered`.
    #[must_use]
    pub fn prefix<'a, X>(&self, ordered: &'a [X]) -> &'a [X] {
        &ordered[..self.visible_len(ordered.len())]
    }
}

//! Cancellable one-shot deadline timer.

use std::time::Instant;

/// What: Single pending deadline with explicit schedule and cancel operations.
///
/// Inputs:
/// - `schedule(at)` arms the timer, replacing any earlier deadline.
///
/// Output:
/// - `fire_if_due(now)` reports `true` exactly once per armed deadline, when `now`
///   has reached it.
///
/// Details:
/// - At most one deadline exists at a time; rescheduling implicitly cancels.
/// - Dropping an armed timer is a silent cancel.
#[derive(Debug, Clone, Default)]
pub struct DeadlineTimer {
    /// Instant at which the pending callback is due, if any.
    fires_at: Option<Instant>,
}

impl DeadlineTimer {
    /// Arm the timer for `at`. Returns `true` when a pending deadline was replaced.
    pub fn schedule(&mut self, at: Instant) -> bool {
        self.fires_at.replace(at).is_some()
    }

    /// Disarm the timer. Returns `true` when a pending deadline was dropped.
    pub fn cancel(&mut self) -> bool {
        self.fires_at.take().is_some()
    }

    /// Fire and disarm when the deadline has been reached.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.fires_at {
            Some(at) if now >= at => {
                self.fires_at = None;
                true
            }
            _ => false,
        }
    }

    /// Pending deadline, if armed.
    #[must_use]
    pub const fn deadline(&self) -> Option<Instant> {
        self.fires_at
    }

    /// Whether a deadline is armed.
    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.fires_at.is_some()
    }
}

//! Debounced text input.
//!
//! Raw keystrokes are recorded immediately, but the value the pipeline filters
//! on (the committed value) only changes once the input has been quiet for the
//! configured delay. Timing is passed in explicitly so the same logic runs
//! under the system clock, tokio's clock, or a manual test clock.

pub mod clock;
pub mod timer;

use std::time::{Duration, Instant};

pub use clock::{Clock, ManualClock, SystemClock, TokioClock};
pub use timer::DeadlineTimer;

/// Default quiet period before a typed search term is committed.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// What: Rate-limit a rapidly changing string into a stable committed value.
///
/// Inputs:
/// - `push(raw, now)` for every keystroke
/// - `poll(now)` whenever the caller wants the committed value brought up to date
///
/// Output:
/// - `committed()` equals the last raw value that stayed unchanged for `delay`.
///
/// Details:
/// - Each push restarts the timer; only the final value of a burst is committed.
/// - `flush` commits immediately and bypasses the timer.
#[derive(Debug, Clone)]
pub struct Debouncer {
    /// Quiet period required before committing.
    delay: Duration,
    /// Latest raw value observed.
    raw: String,
    /// Last committed value.
    committed: String,
    /// Pending commit deadline.
    timer: DeadlineTimer,
}

impl Debouncer {
    /// Create a debouncer with empty raw and committed values.
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            raw: String::new(),
            committed: String::new(),
            timer: DeadlineTimer::default(),
        }
    }

    /// Record a raw update observed at `now` and restart the quiet period.
    pub fn push(&mut self, raw: impl Into<String>, now: Instant) {
        self.raw = raw.into();
        let replaced = self.timer.schedule(now + self.delay);
        tracing::trace!(
            raw = %self.raw,
            replaced,
            delay_ms = self.delay.as_millis(),
            "debounce timer scheduled"
        );
    }

    /// What: Commit the raw value if the quiet period has elapsed.
    ///
    /// Inputs:
    /// - `now`: Current instant from the owning clock
    ///
    /// Output:
    /// - `true` when the timer fired and the committed value changed.
    ///
    /// Details:
    /// - A timer that fires with the raw value equal to the committed one is
    ///   consumed but reports `false`, so callers do not reset dependent state.
    pub fn poll(&mut self, now: Instant) -> bool {
        if !self.timer.fire_if_due(now) {
            return false;
        }
        self.commit_raw()
    }

    /// Commit `value` immediately, cancelling any pending timer.
    /// Returns `true` when the committed value changed.
    pub fn flush(&mut self, value: impl Into<String>) -> bool {
        self.raw = value.into();
        self.timer.cancel();
        self.commit_raw()
    }

    /// Drop a pending commit. The committed value stays as it was.
    pub fn cancel(&mut self) {
        if self.timer.cancel() {
            tracing::trace!(raw = %self.raw, "debounce timer cancelled");
        }
    }

    /// Latest raw value.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Latest committed value.
    #[must_use]
    pub fn committed(&self) -> &str {
        &self.committed
    }

    /// Whether a commit is waiting for its quiet period.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.timer.is_armed()
    }

    /// Instant at which the pending commit fires.
    #[must_use]
    pub const fn deadline(&self) -> Option<Instant> {
        self.timer.deadline()
    }

    /// Configured quiet period.
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Copy raw into committed, reporting whether anything changed.
    fn commit_raw(&mut self) -> bool {
        if self.committed == self.raw {
            return false;
        }
        self.committed.clone_from(&self.raw);
        tracing::debug!(term = %self.committed, "search term committed");
        true
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

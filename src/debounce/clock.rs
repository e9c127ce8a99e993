//! Time sources for the debounce timer.
//!
//! The debounce logic never reads the wall clock directly; it asks a [`Clock`]
//! so that tests can drive time by hand and the async runtime can drive it
//! through tokio's (pausable) timer.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Monotonic time source consulted by views when scheduling and firing timers.
pub trait Clock {
    /// Current instant according to this clock.
    fn now(&self) -> Instant;
}

/// Clock backed by `std::time::Instant::now`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock backed by tokio's timer so that `tokio::time::pause` also freezes
/// debounce deadlines.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

impl Clock for TokioClock {
    fn now(&self) -> Instant {
        tokio::time::Instant::now().into_std()
    }
}

/// What: Virtual clock advanced explicitly by the caller.
///
/// Inputs:
/// - Created once; clones share the same elapsed counter.
///
/// Output:
/// - `now()` returns the creation instant plus everything passed to `advance`.
///
/// Details:
/// - Clones are cheap handles, so a test can keep one and give another to a view.
#[derive(Debug, Clone)]
pub struct ManualClock {
    /// Instant captured at construction; all readings are offsets from it.
    origin: Instant,
    /// Nanoseconds advanced so far, shared between clones.
    elapsed_nanos: Arc<AtomicU64>,
}

impl ManualClock {
    /// Create a clock frozen at the current instant.
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            elapsed_nanos: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Move the clock forward by `by`.
    pub fn advance(&self, by: Duration) {
        let nanos = u64::try_from(by.as_nanos()).unwrap_or(u64::MAX);
        self.elapsed_nanos.fetch_add(nanos, Ordering::SeqCst);
    }

    /// Total time advanced since construction.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        Duration::from_nanos(self.elapsed_nanos.load(Ordering::SeqCst))
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + self.elapsed()
    }
}

//! Session countdown.
//!
//! The countdown is driven by an absolute deadline rather than by sleeping one
//! second per step. Every iteration re-reads the clock and derives the
//! remaining time from `deadline - now`, so late wake-ups never accumulate
//! into drift.
//!
//! ## Usage
//!
//! ```ignore
//! let clock = SessionClock::new(SystemClock);
//! clock.run(25 * 60, |remaining| render(remaining), || println!("done"));
//! ```
//!
//! `run` blocks the calling thread until the deadline passes.

use std::time::Duration;

use tracing::{debug, warn};

use super::clock::{Clock, SystemClock};

/// Default polling period. Well under a second so no boundary is missed.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Longest countdown the clock will schedule (100 years). Longer requests are
/// clamped so the deadline stays representable as an `Instant`.
pub const MAX_COUNTDOWN_SECS: u64 = 100 * 365 * 24 * 60 * 60;

/// Deadline-based countdown driver.
#[derive(Debug, Clone)]
pub struct SessionClock<C = SystemClock> {
    clock: C,
    poll_interval: Duration,
}

impl Default for SessionClock<SystemClock> {
    fn default() -> Self {
        Self::new(SystemClock)
    }
}

impl<C: Clock> SessionClock<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Override the polling period. Zero is bumped to one millisecond.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval.max(Duration::from_millis(1));
        self
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Count down `total_seconds`.
    ///
    /// `on_tick` receives the remaining whole seconds (rounded up) each time
    /// that value changes, ending with exactly `0`. `on_done` runs once after
    /// the final tick. Durations above [`MAX_COUNTDOWN_SECS`] are clamped.
    pub fn run<T, D>(&self, total_seconds: u64, mut on_tick: T, on_done: D)
    where
        T: FnMut(u64),
        D: FnOnce(),
    {
        let scheduled = total_seconds.min(MAX_COUNTDOWN_SECS);
        if scheduled < total_seconds {
            warn!(total_seconds, scheduled, "countdown too long, clamping");
        }

        let start = self.clock.now();
        let deadline = match start.checked_add(Duration::from_secs(scheduled)) {
            Some(deadline) => deadline,
            None => {
                warn!(scheduled, "countdown deadline out of range, finishing now");
                start
            }
        };
        let mut last_reported: Option<u64> = None;

        debug!(total_seconds = scheduled, "countdown started");

        loop {
            let remaining = deadline.saturating_duration_since(self.clock.now());
            let whole = ceil_secs(remaining);

            if last_reported != Some(whole) {
                on_tick(whole);
                last_reported = Some(whole);
            }

            if remaining.is_zero() {
                break;
            }

            self.clock.sleep(self.poll_interval.min(remaining));
        }

        debug!(total_seconds = scheduled, "countdown finished");
        on_done();
    }
}

fn ceil_secs(d: Duration) -> u64 {
    if d.subsec_nanos() > 0 {
        d.as_secs() + 1
    } else {
        d.as_secs()
    }
}

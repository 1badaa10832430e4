//! Time sources for the session clock.

use std::cell::Cell;
use std::time::{Duration, Instant};

/// Monotonic time plus the ability to wait.
pub trait Clock {
    fn now(&self) -> Instant;

    fn sleep(&self, duration: Duration);
}

/// Real monotonic clock backed by `std::thread::sleep`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Virtual clock whose `sleep` advances time instantly.
///
/// Lets a 25-minute countdown run in microseconds. `jitter` is added to every
/// sleep to simulate a scheduler that wakes up late.
#[derive(Debug)]
pub struct ManualClock {
    now: Cell<Instant>,
    jitter: Duration,
    sleeps: Cell<u64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::with_jitter(Duration::ZERO)
    }

    pub fn with_jitter(jitter: Duration) -> Self {
        Self {
            now: Cell::new(Instant::now()),
            jitter,
            sleeps: Cell::new(0),
        }
    }

    /// Move time forward without sleeping.
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    /// Number of `sleep` calls so far.
    pub fn sleep_count(&self) -> u64 {
        self.sleeps.get()
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }

    fn sleep(&self, duration: Duration) {
        self.sleeps.set(self.sleeps.get() + 1);
        self.advance(duration + self.jitter);
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Instant {
        (**self).now()
    }

    fn sleep(&self, duration: Duration) {
        (**self).sleep(duration)
    }
}

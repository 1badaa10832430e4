mod clock;
mod engine;

pub use clock::{Clock, ManualClock, SystemClock};
pub use engine::{SessionClock, DEFAULT_POLL_INTERVAL, MAX_COUNTDOWN_SECS};

use jiff::Timestamp;
use std::time::{Duration, Instant};

/// Upper bound on how long a single `wait_until` call may block.
const MAX_SPIN_PER_CALL: Duration = Duration::from_millis(1);

pub trait Clock: Send + Sync {
    /// Returns the current time of the clock
    fn now(&self) -> Timestamp;
    /// Block and wait for the clock to reach the target time.
    ///
    /// A single call may return before the target is reached; callers that
    /// depend on the target re-check `now` and call again.
    fn wait_until(&self, target: Timestamp);
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }

    fn wait_until(&self, target: Timestamp) {
        // The gap during sequence rollover is sub-millisecond, so sleeping
        // would overshoot the next tick. Spin-sample instead, bounded per
        // call so a frozen wall clock cannot trap the caller here.
        let deadline = Instant::now() + MAX_SPIN_PER_CALL;
        while Timestamp::now() < target && Instant::now() < deadline {
            std::hint::spin_loop();
        }
    }
}

use std::sync::Mutex;

use chrono::{DateTime, Duration, TimeZone, Utc};
use expense_core::time::Clock;

/// Deterministic clock that advances by a fixed step on every read.
pub struct SteppingClock {
    current: Mutex<DateTime<Utc>>,
    step: Duration,
}

impl SteppingClock {
    pub fn new(start: DateTime<Utc>, step: Duration) -> Self {
        Self {
            current: Mutex::new(start),
            step,
        }
    }

    pub fn starting_at_2024() -> Self {
        Self::new(
            Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
            Duration::seconds(1),
        )
    }
}

impl Clock for SteppingClock {
    fn now(&self) -> DateTime<Utc> {
        let mut current = self.current.lock().expect("lock clock");
        let now = *current;
        *current = now + self.step;
        now
    }
}

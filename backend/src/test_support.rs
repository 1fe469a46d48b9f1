//! Shared test doubles for unit tests in `src/` and suites in `tests/`.

use std::sync::Mutex;

use chrono::{DateTime, Local, TimeDelta, Utc};
use mockable::Clock;

/// Clock frozen at a fixed instant.
pub struct FixtureClock(DateTime<Utc>);

impl FixtureClock {
    /// Freeze the clock at `now`.
    pub fn at(now: DateTime<Utc>) -> Self {
        Self(now)
    }
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Clock that tests can move forward between calls.
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    /// Start the clock at `now`.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    /// Move the clock forward.
    pub fn advance_seconds(&self, seconds: i64) {
        *self.lock_clock() += TimeDelta::seconds(seconds);
    }

    fn lock_clock(&self) -> std::sync::MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("clock mutex"),
        }
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

//! Time sources.

use std::sync::RwLock;

use chrono::{Duration, Local, NaiveDate, NaiveDateTime};

/// Supplies the current local instant.
///
/// Eligibility is always evaluated against an injected clock so that a
/// fixed instant can be supplied in tests.
pub trait Clock: Send + Sync {
    /// The current local wall-clock instant.
    fn now(&self) -> NaiveDateTime;

    /// The current local date.
    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// The system's local clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock that stays at a set instant until moved.
///
/// # Example
///
/// ```
/// use attendance_engine::services::{Clock, FixedClock};
/// use chrono::{Duration, NaiveDate};
///
/// let start = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap().and_hms_opt(8, 0, 0).unwrap();
/// let clock = FixedClock::new(start);
/// clock.advance(Duration::minutes(30));
/// assert_eq!(clock.now(), start + Duration::minutes(30));
/// ```
#[derive(Debug)]
pub struct FixedClock {
    now: RwLock<NaiveDateTime>,
}

impl FixedClock {
    /// Creates a clock fixed at `now`.
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            now: RwLock::new(now),
        }
    }

    /// Moves the clock to `now`.
    pub fn set(&self, now: NaiveDateTime) {
        *self.now.write().unwrap_or_else(|e| e.into_inner()) = now;
    }

    /// Moves the clock forward by `by`.
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.write().unwrap_or_else(|e| e.into_inner());
        *now += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        *self.now.read().unwrap_or_else(|e| e.into_inner())
    }
}

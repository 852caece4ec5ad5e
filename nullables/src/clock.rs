//! Nullable clock: deterministic time for testing.

use ballot_types::Timestamp;
use chrono::NaiveDate;
use std::cell::Cell;

/// A deterministic clock for testing.
///
/// Time only advances when you tell it to.
pub struct NullClock {
    current: Cell<u64>,
}

impl NullClock {
    pub fn new(initial_secs: u64) -> Self {
        Self {
            current: Cell::new(initial_secs),
        }
    }

    /// A clock set to midnight UTC on the given date.
    pub fn at_date(date: NaiveDate) -> Self {
        let secs = date
            .and_hms_opt(0, 0, 0)
            .map(|dt| dt.and_utc().timestamp())
            .unwrap_or(0);
        Self::new(u64::try_from(secs).unwrap_or(0))
    }

    pub fn now(&self) -> Timestamp {
        Timestamp::new(self.current.get())
    }

    /// The current UTC calendar date.
    pub fn today(&self) -> NaiveDate {
        self.now().date()
    }

    /// Advance time by a number of seconds.
    pub fn advance(&self, secs: u64) {
        self.current.set(self.current.get() + secs);
    }
}

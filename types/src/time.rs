//! Timestamp type used throughout the booth.
//!
//! Timestamps are Unix epoch seconds (UTC). Calendar views (year, date,
//! RFC 3339 rendering) are derived through `chrono` on demand.

use chrono::{DateTime, Datelike, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A Unix timestamp in seconds since epoch (UTC).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(u64);

impl Timestamp {
    pub fn new(secs: u64) -> Self {
        Self(secs)
    }

    /// Get the current system time as a `Timestamp`.
    pub fn now() -> Self {
        Self::from_datetime(Utc::now())
    }

    /// Convert a `chrono` UTC datetime, clamping pre-epoch values to zero.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(u64::try_from(dt.timestamp()).unwrap_or(0))
    }

    /// The UTC datetime for this timestamp.
    ///
    /// Values beyond chrono's representable range collapse to the epoch.
    pub fn to_datetime(&self) -> DateTime<Utc> {
        i64::try_from(self.0)
            .ok()
            .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
            .unwrap_or_default()
    }

    /// The UTC calendar date.
    pub fn date(&self) -> NaiveDate {
        self.to_datetime().date_naive()
    }

    /// The UTC calendar year.
    pub fn year(&self) -> i32 {
        self.to_datetime().year()
    }

    /// ISO 8601 / RFC 3339 rendering, e.g. `2024-11-05T14:30:25Z`.
    pub fn to_rfc3339(&self) -> String {
        self.to_datetime()
            .to_rfc3339_opts(SecondsFormat::Secs, true)
    }

    /// Human-readable rendering used on receipts and certificates.
    pub fn to_human(&self) -> String {
        self.to_datetime().format("%Y-%m-%d %H:%M:%S UTC").to_string()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_rfc3339())
    }
}

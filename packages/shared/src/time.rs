//! Time-related utilities with clock abstraction for testability.

use chrono::{DateTime, TimeZone, Utc};

/// Clock trait for dependency injection and testing
pub trait Clock: Send + Sync {
    /// Get current Unix timestamp in UTC (milliseconds)
    fn now_millis(&self) -> i64;

    /// Current time as a UTC `DateTime` (the Unix epoch if out of range)
    fn now_utc(&self) -> DateTime<Utc> {
        timestamp_to_datetime(self.now_millis()).unwrap_or_default()
    }
}

/// System clock implementation (uses actual system time)
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        get_timestamp()
    }
}

/// Fixed clock implementation for testing (returns a fixed time)
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    fixed_time: i64,
}

impl FixedClock {
    /// Create a new fixed clock with the given timestamp
    pub fn new(fixed_time_millis: i64) -> Self {
        Self {
            fixed_time: fixed_time_millis,
        }
    }
}

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.fixed_time
    }
}

/// Get current Unix timestamp (milliseconds)
pub fn get_timestamp() -> i64 {
    Utc::now().timestamp_millis()
}

/// Convert a Unix timestamp (milliseconds) to a UTC `DateTime`.
///
/// Returns `None` when the value is outside chrono's representable range.
pub fn timestamp_to_datetime(timestamp_millis: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_millis_opt(timestamp_millis).single()
}

/// Convert Unix timestamp (milliseconds) to RFC 3339 format in UTC.
///
/// Out-of-range values are rendered as the raw millisecond count.
pub fn timestamp_to_rfc3339(timestamp_millis: i64) -> String {
    match timestamp_to_datetime(timestamp_millis) {
        Some(dt) => dt.to_rfc3339(),
        None => format!("{}ms", timestamp_millis),
    }
}

/// Format a Unix timestamp (milliseconds) as a short `HH:MM:SS` wall-clock time.
pub fn timestamp_to_clock_time(timestamp_millis: i64) -> String {
    match timestamp_to_datetime(timestamp_millis) {
        Some(dt) => dt.format("%H:%M:%S").to_string(),
        None => "--:--:--".to_string(),
    }
}

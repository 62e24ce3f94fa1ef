//! Timestamps, deposit-period arithmetic, and countdown formatting.
//!
//! The backend and the contract express all times in Unix epoch milliseconds.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// A Unix timestamp in milliseconds since epoch (UTC).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(u64);

impl Timestamp {
    pub const EPOCH: Self = Self(0);

    pub fn new(millis: u64) -> Self {
        Self(millis)
    }

    /// Current system time.
    pub fn now() -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system clock before Unix epoch")
            .as_millis() as u64;
        Self(millis)
    }

    pub fn as_millis(&self) -> u64 {
        self.0
    }

    /// Milliseconds elapsed since this timestamp (saturating at zero).
    pub fn elapsed_since(&self, now: Timestamp) -> u64 {
        now.0.saturating_sub(self.0)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

/// Zero-based index of the deposit period containing `now`, or `None` if the
/// room has not started yet.
pub fn period_index(start: Timestamp, period_length_ms: u64, now: Timestamp) -> Option<u64> {
    if now < start || period_length_ms == 0 {
        return None;
    }
    Some(start.elapsed_since(now) / period_length_ms)
}

/// Milliseconds until the next period boundary, or `None` before the room
/// starts.
pub fn time_until_next_period(
    start: Timestamp,
    period_length_ms: u64,
    now: Timestamp,
) -> Option<u64> {
    let idx = period_index(start, period_length_ms, now)?;
    let next_boundary = start.as_millis() + (idx + 1) * period_length_ms;
    Some(next_boundary - now.as_millis())
}

/// Format a remaining-seconds value as a countdown string, e.g. `"5m 30s"`,
/// `"2h 15m"`, or `"Ready!"` once elapsed.
pub fn format_countdown(seconds: u64) -> String {
    if seconds == 0 {
        return "Ready!".to_string();
    }

    let mins = seconds / 60;
    let secs = seconds % 60;

    if mins >= 60 {
        let hours = mins / 60;
        let remain_mins = mins % 60;
        return format!("{}h {}m", hours, remain_mins);
    }

    format!("{}m {}s", mins, secs)
}

/// Format elapsed seconds as a relative-time string, e.g. `"5m ago"`.
pub fn format_time_ago(elapsed_seconds: u64) -> String {
    if elapsed_seconds < 60 {
        return format!("{}s ago", elapsed_seconds);
    }
    let minutes = elapsed_seconds / 60;
    if minutes < 60 {
        return format!("{}m ago", minutes);
    }
    let hours = minutes / 60;
    if hours < 24 {
        return format!("{}h ago", hours);
    }
    format!("{}d ago", hours / 24)
}

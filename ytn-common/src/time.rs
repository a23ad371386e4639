//! Timestamp and timecode utilities

use chrono::{DateTime, Utc};

/// Get current UTC timestamp
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Convert milliseconds to duration
pub fn millis_to_duration(millis: u64) -> std::time::Duration {
    std::time::Duration::from_millis(millis)
}

/// Format a playback position as `MM:SS`
///
/// Seconds are floored, minutes are zero-padded to two digits and are not
/// wrapped into hours. Negative or non-finite input formats as `00:00`.
///
/// # Examples
///
/// ```
/// use ytn_common::time::format_timecode;
///
/// assert_eq!(format_timecode(0.0), "00:00");
/// assert_eq!(format_timecode(65.9), "01:05");
/// assert_eq!(format_timecode(3725.0), "62:05");
/// ```
pub fn format_timecode(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    format!("{:02}:{:02}", total / 60, total % 60)
}

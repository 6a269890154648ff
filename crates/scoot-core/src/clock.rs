//! Wall-clock helpers.
//!
//! Rentals run against real time: the directory stores Unix-second
//! timestamps, and the interactive driver reports elapsed rental time
//! truncated to whole seconds.  There is no simulated clock; ticks are
//! paced by sleeping, not by counting.

/// Current Unix timestamp in whole seconds.
///
/// Saturates to 0 for a system clock set before the epoch.
pub fn unix_now_secs() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

/// Format whole seconds as `HH:MM:SS` (hours do not wrap at 24).
pub fn format_hms(total_secs: u64) -> String {
    let hours = total_secs / 3_600;
    let minutes = (total_secs % 3_600) / 60;
    let seconds = total_secs % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

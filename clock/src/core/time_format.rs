//! Wall-clock formatting for the display region.

use chrono::Timelike;

/// `strftime` pattern equivalent to [`format_time`].
pub const TIME_PATTERN: &str = "%H:%M:%S";

/// Format a time of day as zero-padded 24-hour `HH:MM:SS`.
///
/// Leap seconds are reported by chrono as second 59 with an oversized
/// nanosecond field, so the output never shows `:60`.
pub fn format_time<T: Timelike>(value: &T) -> String {
    format!(
        "{:02}:{:02}:{:02}",
        value.hour(),
        value.minute(),
        value.second()
    )
}

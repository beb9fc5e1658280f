//! Display formatting for playback clocks.

/// Format a number of seconds for the transport display.
///
/// Produces `H:MM:SS` once the hour mark is passed, `M:SS` before it.
/// Minutes and seconds are always zero-padded to two digits; hours are
/// not padded. Fractional seconds are truncated toward zero. Negative
/// or NaN input is out of contract and must be clamped by the caller.
pub fn format_time(seconds: f64) -> String {
    let total = seconds as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    if hours > 0 {
        format!("{hours}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes}:{secs:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_minutes_and_seconds() {
        assert_eq!(format_time(0.0), "0:00");
    }

    #[test]
    fn seconds_are_zero_padded() {
        assert_eq!(format_time(59.0), "0:59");
        assert_eq!(format_time(61.0), "1:01");
    }

    #[test]
    fn minute_rollover() {
        assert_eq!(format_time(60.0), "1:00");
    }

    #[test]
    fn hours_appear_unpadded() {
        assert_eq!(format_time(3661.0), "1:01:01");
        assert_eq!(format_time(36_000.0), "10:00:00");
    }

    #[test]
    fn minutes_pad_once_hours_show() {
        assert_eq!(format_time(3600.0 + 5.0), "1:00:05");
        assert_eq!(format_time(3600.0 * 2.0 + 60.0 * 3.0 + 4.0), "2:03:04");
    }

    #[test]
    fn fractional_seconds_truncate() {
        assert_eq!(format_time(59.9), "0:59");
        assert_eq!(format_time(60.2), "1:00");
    }
}

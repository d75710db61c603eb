/// Format seconds as `MM:SS.ss`, or `HH:MM:SS.ss` once an hour is reached.
///
/// Division and remainder use floor semantics so that a negative input
/// still yields in-range minute and second fields.
pub fn format_time(seconds: f64) -> String {
    let hours = seconds.div_euclid(3600.0) as i64;
    let minutes = seconds.rem_euclid(3600.0).div_euclid(60.0) as i64;
    let secs = seconds.rem_euclid(60.0);

    if hours > 0 {
        format!("{:02}:{:02}:{:05.2}", hours, minutes, secs)
    } else {
        format!("{:02}:{:05.2}", minutes, secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(format_time(125.5), "02:05.50");
        assert_eq!(format_time(0.0), "00:00.00");
        assert_eq!(format_time(59.25), "00:59.25");
    }

    #[test]
    fn formats_hours_when_present() {
        assert_eq!(format_time(3725.25), "01:02:05.25");
        assert_eq!(format_time(3600.0), "01:00:00.00");
        assert_eq!(format_time(36_000.5), "10:00:00.50");
    }

    #[test]
    fn pads_single_digit_seconds() {
        assert_eq!(format_time(61.0), "01:01.00");
        assert_eq!(format_time(7.5), "00:07.50");
    }
}

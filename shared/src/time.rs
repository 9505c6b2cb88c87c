//! Timestamp handling for the dashboard.
//!
//! Timestamps travel and persist as RFC 3339 strings. The locale-style
//! `MM/DD/YYYY, hh:mm:ss AM/PM` rendering the yard operators read is applied
//! only when a value reaches the screen or an export cell.

use chrono::{DateTime, FixedOffset, Local, NaiveDate, SecondsFormat};

/// Current local time as an RFC 3339 string, to whole seconds.
pub fn now_rfc3339() -> String {
    Local::now().to_rfc3339_opts(SecondsFormat::Secs, false)
}

/// Today's local calendar date.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parse an RFC 3339 timestamp. `None` for anything malformed.
pub fn parse(timestamp: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(timestamp.trim()).ok()
}

/// Whether a timestamp falls on the given calendar date, in the offset the
/// timestamp itself carries.
pub fn same_day(timestamp: &str, day: NaiveDate) -> bool {
    parse(timestamp).is_some_and(|dt| dt.date_naive() == day)
}

/// `MM/DD/YYYY, hh:mm:ss AM/PM` rendering. Unparseable input is shown as-is
/// rather than dropped.
pub fn format_display(timestamp: &str) -> String {
    match parse(timestamp) {
        Some(dt) => dt.format("%m/%d/%Y, %I:%M:%S %p").to_string(),
        None => timestamp.to_string(),
    }
}

/// True only when both timestamps parse and `a` is strictly earlier than `b`.
pub fn is_before(a: &str, b: &str) -> bool {
    match (parse(a), parse(b)) {
        (Some(a), Some(b)) => a < b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_display_timestamp() {
        assert_eq!(
            format_display("2024-06-01T08:00:00+08:00"),
            "06/01/2024, 08:00:00 AM"
        );
        assert_eq!(
            format_display("2024-12-31T23:59:59Z"),
            "12/31/2024, 11:59:59 PM"
        );
    }

    #[test]
    fn display_falls_back_to_raw_input() {
        assert_eq!(format_display("not a timestamp"), "not a timestamp");
    }

    #[test]
    fn same_day_uses_the_timestamp_offset() {
        let day = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert!(same_day("2024-06-01T00:10:00+08:00", day));
        assert!(same_day("2024-06-01T23:59:00+08:00", day));
        assert!(!same_day("2024-06-02T00:00:00+08:00", day));
        assert!(!same_day("garbage", day));
    }

    #[test]
    fn is_before_compares_instants() {
        assert!(is_before(
            "2024-06-01T08:00:00+08:00",
            "2024-06-01T09:00:00+08:00"
        ));
        assert!(!is_before(
            "2024-06-01T09:00:00+08:00",
            "2024-06-01T08:00:00+08:00"
        ));
        // Same instant in different offsets is not "before".
        assert!(!is_before(
            "2024-06-01T08:00:00+08:00",
            "2024-06-01T00:00:00Z"
        ));
        assert!(!is_before("garbage", "2024-06-01T08:00:00+08:00"));
    }

    #[test]
    fn parse_accepts_padded_input() {
        assert!(parse(" 2024-06-01T08:00:00Z ").is_some());
    }
}

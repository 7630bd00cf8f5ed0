//! Timestamp parsing.
//!
//! Only machine-formatted instants are accepted. Human display strings such
//! as "Nov 4, 2025, 09:55:42 AM" are rejected rather than guessed at.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};

/// Smallest accepted epoch-millisecond value (1973-03-03). Shorter digit
/// strings such as compact dates (`20251104`) are rejected instead of being
/// read as an instant in early 1970.
const MIN_EPOCH_MILLIS: i64 = 100_000_000_000;

/// Offset-free formats, read as local wall-clock time.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse a record timestamp into local wall-clock time.
///
/// Accepts, in order:
/// - RFC 3339 with an offset (converted to local time)
/// - integer epoch milliseconds from 1973 on (converted to local time)
/// - ISO-8601 without offset (`2025-11-04T09:55:42`, optional fraction)
/// - a bare date (`2025-11-04`, midnight)
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Local).naive_local());
    }

    if let Ok(millis) = s.parse::<i64>() {
        if millis < MIN_EPOCH_MILLIS {
            return None;
        }
        return DateTime::from_timestamp_millis(millis)
            .map(|dt| dt.with_timezone(&Local).naive_local());
    }

    for fmt in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    #[test]
    fn test_naive_iso() {
        assert_eq!(
            parse_timestamp("2025-11-04T09:55:42"),
            Some(at(2025, 11, 4, 9, 55, 42))
        );
        assert_eq!(
            parse_timestamp(" 2025-11-04 09:55:42 "),
            Some(at(2025, 11, 4, 9, 55, 42))
        );
        assert_eq!(
            parse_timestamp("2025-11-04T09:55"),
            Some(at(2025, 11, 4, 9, 55, 0))
        );
    }

    #[test]
    fn test_fractional_seconds() {
        let parsed = parse_timestamp("2025-11-04T09:55:42.250").unwrap();
        assert_eq!(parsed.date(), at(2025, 11, 4, 0, 0, 0).date());
    }

    #[test]
    fn test_bare_date() {
        assert_eq!(parse_timestamp("2025-11-04"), Some(at(2025, 11, 4, 0, 0, 0)));
    }

    #[test]
    fn test_rfc3339_matches_local_conversion() {
        let expected = DateTime::parse_from_rfc3339("2025-11-04T09:55:42Z")
            .unwrap()
            .with_timezone(&Local)
            .naive_local();
        assert_eq!(parse_timestamp("2025-11-04T09:55:42Z"), Some(expected));
    }

    #[test]
    fn test_epoch_millis() {
        let expected = DateTime::from_timestamp_millis(1_762_250_142_000)
            .unwrap()
            .with_timezone(&Local)
            .naive_local();
        assert_eq!(parse_timestamp("1762250142000"), Some(expected));
    }

    #[test]
    fn test_short_numbers_rejected() {
        assert_eq!(parse_timestamp("20251104"), None);
        assert_eq!(parse_timestamp("0"), None);
        assert_eq!(parse_timestamp("-1762250142000"), None);
        assert_eq!(parse_timestamp("99999999999"), None);
        assert!(parse_timestamp("100000000000").is_some());
    }

    #[test]
    fn test_display_strings_rejected() {
        assert_eq!(parse_timestamp("Nov 4, 2025, 09:55:42 AM"), None);
        assert_eq!(parse_timestamp("04/11/2025"), None);
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("not a date"), None);
    }
}

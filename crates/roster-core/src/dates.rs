//! Date and timestamp parsing for booking snapshots
//!
//! The extraction service normalizes dates to ISO 8601, but OCR'd flight
//! dates still show up as `DD.MM.YY` often enough that both shapes are
//! accepted. Nothing here returns an error: callers that need an ordering
//! fall back to the minimal value so unparsable input is deprioritized
//! rather than dropped.

use std::cmp::Ordering;
use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;
use tracing::debug;

static DAY_MONTH_YEAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,2})[./-](\d{1,2})[./-](\d{2,4})$").expect("valid regex")
});

static ISO_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})-(\d{1,2})-(\d{1,2})$").expect("valid regex"));

const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%z",
    "%Y-%m-%d %H:%M:%S%z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
];

const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%d.%m.%Y %H:%M:%S",
    "%d.%m.%Y %H:%M",
    "%Y-%m-%d %H:%M:%S UTC",
    "%Y-%m-%dT%H:%M:%S UTC",
];

/// Parse an email timestamp
///
/// Offsets (RFC 3339 or `+HHMM`) are converted to UTC; naive timestamps are
/// taken as-is; a bare date means midnight. Anything else is unparsable.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }

    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(raw, format) {
            return Some(dt.naive_utc());
        }
    }

    for format in TIMESTAMP_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt);
        }
    }

    parse_flight_date(raw).and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Parse an email timestamp, falling back to the minimal instant
pub fn timestamp_or_min(raw: &str) -> NaiveDateTime {
    parse_timestamp(raw).unwrap_or_else(|| {
        debug!(timestamp = %raw, "Unparsable email timestamp, treating as earliest");
        NaiveDateTime::MIN
    })
}

/// Parse a flight date in `DD.MM.YY`, `DD.MM.YYYY` or ISO `YYYY-MM-DD` form
///
/// Two-digit years are in the 2000s.
pub fn parse_flight_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();

    if let Some(caps) = ISO_DATE.captures(raw) {
        let year: i32 = caps[1].parse().ok()?;
        let month: u32 = caps[2].parse().ok()?;
        let day: u32 = caps[3].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    let caps = DAY_MONTH_YEAR.captures(raw)?;
    let day: u32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    let mut year: i32 = caps[3].parse().ok()?;
    if year < 100 {
        year += 2000;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Chronological ordering for flight date strings
///
/// Unparsable dates sort as the minimal date; ties fall back to the raw text
/// so the order is total and deterministic.
pub fn compare_flight_dates(a: &str, b: &str) -> Ordering {
    let key = |s: &str| parse_flight_date(s).unwrap_or(NaiveDate::MIN);
    key(a).cmp(&key(b)).then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timestamp_formats() {
        let expected = NaiveDate::from_ymd_opt(2025, 1, 2)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        assert_eq!(parse_timestamp("2025-01-02 10:00:00"), Some(expected));
        assert_eq!(parse_timestamp("2025-01-02T10:00"), Some(expected));
        assert_eq!(parse_timestamp("2025-01-02T10:00:00Z"), Some(expected));
        assert_eq!(parse_timestamp("2025-01-02T12:00:00+02:00"), Some(expected));
        assert_eq!(parse_timestamp("02.01.2025 10:00"), Some(expected));
        assert_eq!(parse_timestamp("2025-01-02T10:00:00+0000"), Some(expected));
        assert_eq!(parse_timestamp("2025-01-02 13:00:00+0300"), Some(expected));
        assert_eq!(parse_timestamp("2025-01-02 10:00:00 UTC"), Some(expected));
    }

    #[test]
    fn test_parse_timestamp_trailing_text_is_unparsable() {
        assert_eq!(parse_timestamp("2025-01-02 10:00:00 approx"), None);
        assert_eq!(parse_timestamp("2025-01-02T10:00:00 CET"), None);
        assert_eq!(parse_timestamp("2025-01-02 (resent)"), None);
    }

    #[test]
    fn test_parse_timestamp_date_only_is_midnight() {
        let ts = parse_timestamp("2025-01-02").unwrap();
        assert_eq!(ts.to_string(), "2025-01-02 00:00:00");
    }

    #[test]
    fn test_unparsable_timestamp_is_min() {
        assert_eq!(parse_timestamp("yesterday"), None);
        assert_eq!(timestamp_or_min("yesterday"), NaiveDateTime::MIN);
        assert_eq!(timestamp_or_min(""), NaiveDateTime::MIN);
    }

    #[test]
    fn test_parse_flight_date_two_digit_year() {
        assert_eq!(
            parse_flight_date("05.01.25"),
            NaiveDate::from_ymd_opt(2025, 1, 5)
        );
        assert_eq!(
            parse_flight_date("5.1.2025"),
            NaiveDate::from_ymd_opt(2025, 1, 5)
        );
        assert_eq!(
            parse_flight_date("2025-01-05"),
            NaiveDate::from_ymd_opt(2025, 1, 5)
        );
        assert_eq!(parse_flight_date("2025-01-05 morning"), None);
        assert_eq!(parse_flight_date("31.02.25"), None);
        assert_eq!(parse_flight_date("TBA"), None);
    }

    #[test]
    fn test_compare_flight_dates() {
        let mut dates = vec!["12.02.25", "05.01.25", "TBA", "30.12.24"];
        dates.sort_by(|a, b| compare_flight_dates(a, b));
        assert_eq!(dates, vec!["TBA", "30.12.24", "05.01.25", "12.02.25"]);
    }
}

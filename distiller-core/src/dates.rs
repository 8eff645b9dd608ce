//! Date normalization for spreadsheet cells
//!
//! Date columns arrive either as spreadsheet serial day counts or as free-form
//! strings. Both are rendered as `MM/DD/YYYY`; anything unrecognised passes
//! through untouched.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;
use std::sync::LazyLock;

/// Serials outside (SERIAL_MIN, SERIAL_MAX) are not treated as dates
pub const SERIAL_MIN: f64 = 25000.0;
pub const SERIAL_MAX: f64 = 50000.0;

/// Serial of 1970-01-01 in the 1899-12-30 epoch
const UNIX_EPOCH_SERIAL: f64 = 25569.0;
const MS_PER_DAY: f64 = 86_400_000.0;

const DISPLAY_FORMAT: &str = "%m/%d/%Y";

// Order matters: chrono's %Y reads one to four digits, so "3/5/24" would
// satisfy "%Y/%m/%d" as the year 3 unless month-first shapes are tried first,
// and "%m/%d/%y" must precede "%m/%d/%Y" for the same reason.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%m/%d/%y",
    "%m/%d/%Y",
    "%Y/%m/%d",
    "%m-%d-%Y",
    "%d-%b-%y",
    "%d-%b-%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%b %d %Y",
    "%a %b %d %Y",
    "%d %B %Y",
    "%d %b %Y",
];

// Two-digit year shapes precede their four-digit twins for the same reason
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%m/%d/%y %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
];

static DISPLAY_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,2}/\d{1,2}/\d{4}$").expect("valid display date pattern"));

/// Normalize an optional raw cell value. `None` stays `None`.
pub fn normalize_date(value: Option<&str>) -> Option<String> {
    value.map(normalize_date_str)
}

/// Serial date, then generic date string, then the raw value unchanged
pub fn normalize_date_str(value: &str) -> String {
    match serial_to_date(value).or_else(|| parse_date_string(value)) {
        Some(date) => date.format(DISPLAY_FORMAT).to_string(),
        None => value.to_string(),
    }
}

/// Interpret `value` as a serial day count if it is a number in range.
///
/// `(serial - 25569)` days after the Unix epoch, in UTC. Fractional days are
/// a time of day and do not move the calendar date.
pub fn serial_to_date(value: &str) -> Option<NaiveDate> {
    let serial: f64 = value.trim().parse().ok()?;
    if !(serial > SERIAL_MIN && serial < SERIAL_MAX) {
        return None;
    }
    let millis = ((serial - UNIX_EPOCH_SERIAL) * MS_PER_DAY) as i64;
    DateTime::from_timestamp_millis(millis).map(|dt| dt.date_naive())
}

/// Parse a date written as text. The calendar date is taken as written, with
/// no timezone conversion.
pub fn parse_date_string(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_local().date());
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|dt| dt.date())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        })
}

/// Value for a display cell: already-rendered dates are kept, anything else
/// goes through normalization once more.
pub fn format_display_date(value: Option<&str>) -> Option<String> {
    let value = value?;
    if DISPLAY_DATE.is_match(value) {
        Some(value.to_string())
    } else {
        Some(normalize_date_str(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serial_date() {
        assert_eq!(normalize_date(Some("45000")).as_deref(), Some("03/15/2023"));
        assert_eq!(normalize_date(Some("44197")).as_deref(), Some("01/01/2021"));
        // Time of day does not change the date
        assert_eq!(normalize_date(Some("45000.75")).as_deref(), Some("03/15/2023"));
    }

    #[test]
    fn test_serial_bounds_are_exclusive() {
        assert!(serial_to_date("25000").is_none());
        assert!(serial_to_date("50000").is_none());
        assert!(serial_to_date("25000.5").is_some());
        assert!(serial_to_date("49999").is_some());
        // Out of range numbers are not dates at all
        assert_eq!(normalize_date_str("1703"), "1703");
    }

    #[test]
    fn test_string_dates() {
        assert_eq!(normalize_date_str("2024-03-15"), "03/15/2024");
        assert_eq!(normalize_date_str("2024/03/15"), "03/15/2024");
        assert_eq!(normalize_date_str("3/5/2024"), "03/05/2024");
        assert_eq!(normalize_date_str("3/5/24"), "03/05/2024");
        assert_eq!(normalize_date_str("March 15, 2024"), "03/15/2024");
        assert_eq!(normalize_date_str("Mar 15, 2024"), "03/15/2024");
        assert_eq!(normalize_date_str("15 March 2024"), "03/15/2024");
        assert_eq!(normalize_date_str("2024-03-15 10:30"), "03/15/2024");
        assert_eq!(normalize_date_str("2024-03-15T23:30:00-05:00"), "03/15/2024");
        assert_eq!(normalize_date_str("15-Mar-2024"), "03/15/2024");
        assert_eq!(normalize_date_str("15-Mar-24"), "03/15/2024");
        assert_eq!(normalize_date_str("Mar 15 2024"), "03/15/2024");
        assert_eq!(normalize_date_str("March 15 2024"), "03/15/2024");
        assert_eq!(normalize_date_str("Fri Mar 15 2024"), "03/15/2024");
        assert_eq!(normalize_date_str("3/15/2024 2:30 PM"), "03/15/2024");
        assert_eq!(normalize_date_str("3/15/2024 11:59:59 pm"), "03/15/2024");
        assert_eq!(normalize_date_str("3/15/24 14:30"), "03/15/2024");
        assert_eq!(normalize_date_str("2024-03-15T10:00:00.000"), "03/15/2024");
        assert_eq!(normalize_date_str("2024-03-15 10:00:00.250"), "03/15/2024");
    }

    #[test]
    fn test_unparseable_passes_through() {
        assert_eq!(normalize_date_str("N/A"), "N/A");
        assert_eq!(normalize_date_str("pending"), "pending");
        assert_eq!(normalize_date_str("2024-13-45"), "2024-13-45");
        assert_eq!(normalize_date(None), None);
    }

    #[test]
    fn test_display_date() {
        assert_eq!(format_display_date(Some("3/5/2024")).as_deref(), Some("3/5/2024"));
        assert_eq!(format_display_date(Some("2024-03-05")).as_deref(), Some("03/05/2024"));
        assert_eq!(format_display_date(Some("TBD")).as_deref(), Some("TBD"));
        assert_eq!(format_display_date(None), None);
    }
}

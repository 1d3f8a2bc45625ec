//! Timestamp parsing for source files.
//!
//! Exports from chain explorers and market-data vendors disagree on the
//! time format. Accepted forms, tried in order:
//!
//! | Form | Example |
//! |---|---|
//! | ISO date | `2020-05-18` |
//! | ISO date-time | `2020-05-18 00:00:00`, `2020-05-18T00:00:00` |
//! | RFC 3339 | `2020-05-18T00:00:00Z`, `2020-05-18T00:00:00+00:00` |
//! | Day-first date | `18/05/2020`, `18-05-2020` |
//! | Day-first date-time | `18/05/2020 00:00` |
//!
//! Only the calendar date is kept; times of day are discarded.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use s2f_core::types::Date;

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y"];

const DATETIME_FORMATS: [&str; 5] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%d/%m/%Y %H:%M",
    "%d/%m/%Y %H:%M:%S",
];

/// Parse a source timestamp to its calendar date.
///
/// Returns `None` when no accepted form matches.
///
/// # Examples
///
/// ```
/// use adapter_loader::timestamp::parse_timestamp;
///
/// let expected = parse_timestamp("2020-05-18").unwrap();
/// assert_eq!(parse_timestamp("18/05/2020"), Some(expected));
/// assert_eq!(parse_timestamp("2020-05-18T23:59:59Z"), Some(expected));
/// assert_eq!(parse_timestamp("May 18th"), None);
/// ```
pub fn parse_timestamp(raw: &str) -> Option<Date> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return Some(Date::from(date));
        }
    }
    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(Date::from(datetime.date()));
        }
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|datetime| Date::from(datetime.date_naive()))
}

//! Calendar dates for daily issuance and price series.
//!
//! This module provides:
//! - `Date`: Type-safe date wrapper around chrono::NaiveDate
//! - Period-end helpers (`week_end`, `month_end`, `year_end`) that label
//!   resampling buckets
//! - `DayRange`: An inclusive iterator over consecutive calendar days
//!
//! # Examples
//!
//! ```
//! use s2f_core::types::time::Date;
//!
//! let date = Date::from_ymd(2020, 5, 18).unwrap();
//! assert_eq!(date.week_end().unwrap().to_string(), "2020-05-24");
//! assert_eq!(date.month_end().unwrap().to_string(), "2020-05-31");
//! assert_eq!(date.year_end().unwrap().to_string(), "2020-12-31");
//! ```

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Sub;
use std::str::FromStr;

use super::error::DateError;

/// Type-safe date wrapper around chrono::NaiveDate.
///
/// Serialises as an ISO 8601 string and subtracts to a signed day count.
///
/// # Examples
///
/// ```
/// use s2f_core::types::time::Date;
///
/// let date = Date::from_ymd(2024, 6, 15).unwrap();
/// assert_eq!(date.year(), 2024);
///
/// let parsed: Date = "2024-06-15".parse().unwrap();
/// assert_eq!(date, parsed);
///
/// let start = Date::from_ymd(2024, 1, 1).unwrap();
/// let end = Date::from_ymd(2024, 1, 11).unwrap();
/// assert_eq!(end - start, 10);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Date(NaiveDate);

impl Date {
    /// Creates a Date from year, month, and day components.
    ///
    /// # Returns
    /// `Ok(Date)` if the date is valid, `Err(DateError::InvalidDate)` otherwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use s2f_core::types::time::Date;
    ///
    /// assert!(Date::from_ymd(2024, 2, 29).is_ok());
    /// assert!(Date::from_ymd(2023, 2, 29).is_err());
    /// ```
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, DateError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or(DateError::InvalidDate { year, month, day })
    }

    /// Parses a date from ISO 8601 format string (YYYY-MM-DD).
    ///
    /// # Examples
    ///
    /// ```
    /// use s2f_core::types::time::Date;
    ///
    /// let date = Date::parse("2017-10-08").unwrap();
    /// assert_eq!(date.month(), 10);
    /// assert!(Date::parse("08/10/2017").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, DateError> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Date)
            .map_err(|e| DateError::ParseError(format!("'{}': {}", s, e)))
    }

    /// Returns the underlying NaiveDate.
    pub fn into_inner(self) -> NaiveDate {
        self.0
    }

    /// Returns the year component.
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the month component (1-12).
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the day component (1-31).
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Returns the date shifted by `days` (negative values move backwards).
    ///
    /// # Examples
    ///
    /// ```
    /// use s2f_core::types::time::Date;
    ///
    /// let date = Date::from_ymd(2024, 2, 28).unwrap();
    /// assert_eq!(date.add_days(2).unwrap(), Date::from_ymd(2024, 3, 1).unwrap());
    /// assert_eq!(date.add_days(-28).unwrap(), Date::from_ymd(2024, 1, 31).unwrap());
    /// ```
    pub fn add_days(self, days: i64) -> Result<Self, DateError> {
        Duration::try_days(days)
            .and_then(|delta| self.0.checked_add_signed(delta))
            .map(Date)
            .ok_or_else(|| DateError::OutOfRange(format!("{} + {} days", self, days)))
    }

    /// Returns the following calendar day.
    pub fn succ(self) -> Result<Self, DateError> {
        self.0
            .succ_opt()
            .map(Date)
            .ok_or_else(|| DateError::OutOfRange(format!("day after {}", self)))
    }

    /// Returns the Sunday closing the Monday-to-Sunday week containing this date.
    ///
    /// A Sunday is its own week end.
    pub fn week_end(self) -> Result<Self, DateError> {
        let offset = 6 - i64::from(self.0.weekday().num_days_from_monday());
        self.add_days(offset)
    }

    /// Returns the last day of this date's month.
    pub fn month_end(self) -> Result<Self, DateError> {
        let (year, month) = if self.month() == 12 {
            (self.year() + 1, 1)
        } else {
            (self.year(), self.month() + 1)
        };
        Date::from_ymd(year, month, 1)?.add_days(-1)
    }

    /// Returns 31 December of this date's year.
    pub fn year_end(self) -> Result<Self, DateError> {
        Date::from_ymd(self.year(), 12, 31)
    }

    /// Returns an inclusive iterator over every day from `self` to `end`.
    ///
    /// The iterator is empty when `end` precedes `self`.
    ///
    /// # Examples
    ///
    /// ```
    /// use s2f_core::types::time::Date;
    ///
    /// let start = Date::from_ymd(2024, 2, 27).unwrap();
    /// let end = Date::from_ymd(2024, 3, 1).unwrap();
    /// assert_eq!(start.days_through(end).count(), 4);
    /// ```
    pub fn days_through(self, end: Date) -> DayRange {
        DayRange {
            next: Some(self),
            end,
        }
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Date(date)
    }
}

impl Sub for Date {
    type Output = i64;

    /// Returns the number of days between two dates.
    ///
    /// The result is positive if `self` is after `other`, negative otherwise.
    fn sub(self, other: Self) -> i64 {
        (self.0 - other.0).num_days()
    }
}

impl FromStr for Date {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, DateError> {
        Date::parse(s)
    }
}

impl fmt::Display for Date {
    /// Formats the date as ISO 8601 (YYYY-MM-DD).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// Inclusive iterator over consecutive calendar days.
///
/// Created by [`Date::days_through`].
#[derive(Debug, Clone)]
pub struct DayRange {
    next: Option<Date>,
    end: Date,
}

impl Iterator for DayRange {
    type Item = Date;

    fn next(&mut self) -> Option<Date> {
        let current = self.next.filter(|date| *date <= self.end)?;
        self.next = current.succ().ok();
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.next {
            Some(date) if date <= self.end => {
                let remaining = (self.end - date + 1) as usize;
                (remaining, Some(remaining))
            }
            _ => (0, Some(0)),
        }
    }
}

impl ExactSizeIterator for DayRange {}

//! Resampling granularity.

use s2f_core::types::{Date, DateError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// Period length the daily series is aggregated to.
///
/// Periods are labelled by their closing date: the day itself, the Sunday
/// ending the week, the last day of the month, or 31 December.
///
/// # Examples
///
/// ```
/// use s2f_model::Granularity;
///
/// let g: Granularity = "W".parse().unwrap();
/// assert_eq!(g, Granularity::Week);
/// assert_eq!(g.periods_per_year(), 52);
/// assert!("fortnight".parse::<Granularity>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Granularity {
    /// One period per calendar day.
    #[default]
    Day,
    /// Monday-to-Sunday weeks.
    Week,
    /// Calendar months.
    Month,
    /// Calendar years.
    Year,
}

impl Granularity {
    /// All granularities, finest first.
    pub const ALL: [Granularity; 4] = [Self::Day, Self::Week, Self::Month, Self::Year];

    /// Single-letter token (`D`, `W`, `M`, `Y`).
    pub fn token(&self) -> &'static str {
        match self {
            Self::Day => "D",
            Self::Week => "W",
            Self::Month => "M",
            Self::Year => "Y",
        }
    }

    /// Lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
        }
    }

    /// Number of periods in the trailing one-year flow window.
    pub fn periods_per_year(&self) -> usize {
        match self {
            Self::Day => 365,
            Self::Week => 52,
            Self::Month => 12,
            Self::Year => 1,
        }
    }

    /// Label of the period containing `date`.
    pub fn period_end(&self, date: Date) -> Result<Date, DateError> {
        match self {
            Self::Day => Ok(date),
            Self::Week => date.week_end(),
            Self::Month => date.month_end(),
            Self::Year => date.year_end(),
        }
    }
}

impl FromStr for Granularity {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, ModelError> {
        match s.trim().to_lowercase().as_str() {
            "d" | "day" | "daily" => Ok(Self::Day),
            "w" | "week" | "weekly" => Ok(Self::Week),
            "m" | "month" | "monthly" => Ok(Self::Month),
            "y" | "year" | "yearly" | "annual" => Ok(Self::Year),
            _ => Err(ModelError::UnsupportedGranularity(s.to_string())),
        }
    }
}

impl TryFrom<String> for Granularity {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, ModelError> {
        value.parse()
    }
}

impl From<Granularity> for String {
    fn from(value: Granularity) -> Self {
        value.name().to_string()
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

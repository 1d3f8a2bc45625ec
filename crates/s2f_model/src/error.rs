//! Model engine error types.
//!
//! Every fatal condition of a model build is a [`ModelError`]. Numeric
//! indeterminacies (log of zero, division by zero, incomplete windows) are
//! never errors: they travel through the table as missing cells.

use s2f_core::types::{Date, DateError, RegressionError};
use thiserror::Error;

/// Broad category of a [`ModelError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The configuration can never produce a model.
    Configuration,
    /// The inputs are too sparse for the requested computation.
    InsufficientData,
    /// An input source failed to deliver records.
    Source,
}

/// Model build errors.
///
/// # Examples
///
/// ```
/// use s2f_model::{ErrorKind, ModelError};
///
/// let err = ModelError::UnsupportedGranularity("Q".to_string());
/// assert_eq!(err.kind(), ErrorKind::Configuration);
/// assert_eq!(format!("{}", err), "Unsupported granularity 'Q': expected D, W, M or Y");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// Granularity token is not one of day, week, month or year.
    #[error("Unsupported granularity '{0}': expected D, W, M or Y")]
    UnsupportedGranularity(String),

    /// Halving dates are not strictly increasing.
    #[error("Halving schedule not strictly increasing at index {index}: {current} follows {previous}")]
    NonIncreasingSchedule {
        /// Index of the offending entry
        index: usize,
        /// The preceding schedule date
        previous: Date,
        /// The offending schedule date
        current: Date,
    },

    /// Reference window starts after it ends.
    #[error("Invalid reference window: start {start} is after end {end}")]
    InvalidReferenceWindow {
        /// Window start
        start: Date,
        /// Window end
        end: Date,
    },

    /// No observed issuance falls inside the reference window.
    #[error("Reference window {start}..={end} contains no observed issuance")]
    EmptyReferenceWindow {
        /// Window start
        start: Date,
        /// Window end
        end: Date,
    },

    /// An input series has no records.
    #[error("Empty {series} series")]
    EmptySeries {
        /// Name of the empty series
        series: &'static str,
    },

    /// Price records begin after the last model period.
    #[error("Price series starts at {first_price}, after the last model period {last_period}")]
    NoPriceOverlap {
        /// Label of the last issuance period
        last_period: Date,
        /// Label of the first price period
        first_price: Date,
    },

    /// The regression could not be fitted.
    #[error("Regression fit failed: {0}")]
    Regression(#[from] RegressionError),

    /// Calendar arithmetic failed.
    #[error("Calendar error: {0}")]
    Date(#[from] DateError),

    /// An issuance or price source failed.
    #[error("Source error: {0}")]
    Source(String),
}

impl ModelError {
    /// Returns the category this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnsupportedGranularity(_)
            | Self::NonIncreasingSchedule { .. }
            | Self::InvalidReferenceWindow { .. }
            | Self::EmptyReferenceWindow { .. }
            | Self::Date(_) => ErrorKind::Configuration,
            Self::EmptySeries { .. } | Self::NoPriceOverlap { .. } | Self::Regression(_) => {
                ErrorKind::InsufficientData
            }
            Self::Source(_) => ErrorKind::Source,
        }
    }

    /// Create a source error
    pub fn source(msg: impl Into<String>) -> Self {
        Self::Source(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn test_schedule_error_display() {
        let err = ModelError::NonIncreasingSchedule {
            index: 2,
            previous: date(2020, 5, 18),
            current: date(2016, 7, 9),
        };
        assert_eq!(
            err.to_string(),
            "Halving schedule not strictly increasing at index 2: 2016-07-09 follows 2020-05-18"
        );
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_regression_errors_are_insufficient_data() {
        let err: ModelError = RegressionError::InsufficientData { got: 1, need: 2 }.into();
        assert_eq!(err.kind(), ErrorKind::InsufficientData);
        assert!(err.to_string().contains("got 1, need at least 2"));
    }

    #[test]
    fn test_empty_series_kind() {
        let err = ModelError::EmptySeries { series: "price" };
        assert_eq!(err.kind(), ErrorKind::InsufficientData);
        assert_eq!(err.to_string(), "Empty price series");
    }

    #[test]
    fn test_source_helper() {
        let err = ModelError::source("file missing");
        assert_eq!(err.kind(), ErrorKind::Source);
    }
}

//! Error types for structured error handling.
//!
//! This module provides:
//! - `DateError`: Errors from date construction, parsing and arithmetic
//! - `RegressionError`: Errors from least-squares fitting

use thiserror::Error;

/// Date-related errors.
///
/// # Variants
/// - `InvalidDate`: Invalid date components (e.g., February 30th)
/// - `ParseError`: Failed to parse date string
/// - `OutOfRange`: Arithmetic left the representable calendar
///
/// # Examples
/// ```
/// use s2f_core::types::DateError;
///
/// let err = DateError::InvalidDate { year: 2024, month: 2, day: 30 };
/// assert_eq!(format!("{}", err), "Invalid date: 2024-2-30");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    /// Invalid date components (e.g., February 30th).
    #[error("Invalid date: {year}-{month}-{day}")]
    InvalidDate {
        /// Year component
        year: i32,
        /// Month component (1-12)
        month: u32,
        /// Day component (1-31)
        day: u32,
    },

    /// Failed to parse date string.
    #[error("Date parse error: {0}")]
    ParseError(String),

    /// Date arithmetic overflowed the supported calendar range.
    #[error("Date out of range: {0}")]
    OutOfRange(String),
}

/// Least-squares regression errors.
///
/// # Variants
/// - `InsufficientData`: Fewer paired observations than the fit needs
/// - `DegenerateRegressor`: The regressor has no variation
/// - `LengthMismatch`: Regressor and response have different lengths
///
/// # Examples
/// ```
/// use s2f_core::types::RegressionError;
///
/// let err = RegressionError::InsufficientData { got: 1, need: 2 };
/// assert_eq!(format!("{}", err), "Insufficient observations: got 1, need at least 2");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegressionError {
    /// Not enough rows where both regressor and response are defined.
    #[error("Insufficient observations: got {got}, need at least {need}")]
    InsufficientData {
        /// Number of usable observations
        got: usize,
        /// Minimum number required
        need: usize,
    },

    /// Every usable regressor value is identical.
    #[error("Regressor has zero variance across {observations} observations")]
    DegenerateRegressor {
        /// Number of usable observations
        observations: usize,
    },

    /// Regressor and response lengths differ.
    #[error("Length mismatch: x has {x} values, y has {y}")]
    LengthMismatch {
        /// Regressor length
        x: usize,
        /// Response length
        y: usize,
    },
}

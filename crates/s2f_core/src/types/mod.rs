//! Core calendar and error types.
//!
//! This module provides:
//! - `time`: The `Date` type with period-end helpers used for resampling
//! - `error`: Structured error types for date handling and regression
//!
//! # Re-exports
//!
//! For convenience, commonly used types are re-exported at this module level:
//! - [`Date`] from `time`
//! - [`DateError`], [`RegressionError`] from `error`

pub mod error;
pub mod time;

pub use error::{DateError, RegressionError};
pub use time::Date;

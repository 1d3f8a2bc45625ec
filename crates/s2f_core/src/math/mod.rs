//! Numerical building blocks for the stock-to-flow pipeline.
//!
//! ## Modules
//!
//! - [`series`]: Element-wise operations over missing-aware series
//! - [`stats`]: Mean, population standard deviation and z-scores
//! - [`regression`]: Ordinary least squares with intercept
//!
//! All operations are pure: they borrow their inputs and return new
//! vectors of the same length, with `None` wherever a value is undefined.

pub mod regression;
pub mod series;
pub mod stats;

pub use regression::RegressionFit;
pub use series::{checked_ln, cumulative_sum, ln, ratio, relative_difference, rolling_sum};
pub use stats::{mean, population_std_dev, zscore};

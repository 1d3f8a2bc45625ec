//! # s2f_core: Foundation for the Stock-to-Flow Model
//!
//! ## Foundation Layer Role
//!
//! s2f_core is the bottom layer of the workspace, providing:
//! - Calendar dates with period-end helpers (`types::time`)
//! - Error types: `DateError`, `RegressionError` (`types::error`)
//! - Missing-aware series operations: log, ratio, relative difference,
//!   running and rolling sums (`math::series`)
//! - Statistics: mean, population standard deviation, z-scores (`math::stats`)
//! - Ordinary least squares with intercept (`math::regression`)
//!
//! ## Missing Values
//!
//! Series are `[Option<T>]`. `None` marks an undefined cell (log of a
//! non-positive number, division by zero, an incomplete rolling window).
//! Every operation propagates `None` positionally and never drops or
//! zero-fills it.
//!
//! ## Usage Examples
//!
//! ```rust
//! use s2f_core::math::series::relative_difference;
//! use s2f_core::math::stats::zscore;
//! use s2f_core::types::Date;
//!
//! let start = Date::from_ymd(2020, 5, 18).unwrap();
//! let end = Date::from_ymd(2024, 5, 18).unwrap();
//! assert_eq!(end - start, 1461);
//!
//! let prices = [Some(100.0_f64), Some(110.0), Some(121.0)];
//! let dif = relative_difference(&prices);
//! assert!(dif[0].is_none());
//! # assert!((dif[2].unwrap() - 0.1).abs() < 1e-12);
//!
//! let scores = zscore(&[Some(1.0_f64), None, Some(3.0)]);
//! assert_eq!(scores[1], None);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod types;

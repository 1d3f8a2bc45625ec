//! # adapter_loader: CSV Sources
//!
//! Implements the model's [`IssuanceSource`](s2f_model::IssuanceSource) and
//! [`PriceSource`](s2f_model::PriceSource) traits over CSV exports:
//!
//! - [`CsvIssuanceSource`]: daily issuance, `time,generation` by default
//! - [`CsvPriceSource`]: market prices, `time,PriceUSD` by default
//!
//! Header names are configurable through [`ColumnSpec`]. Timestamps may be
//! ISO, RFC 3339 or day-first; see [`timestamp`].

#![warn(missing_docs)]

pub mod csv_source;
pub mod error;
pub mod timestamp;

pub use csv_source::{read_series, ColumnSpec, CsvIssuanceSource, CsvPriceSource};
pub use error::LoaderError;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::csv_source::{ColumnSpec, CsvIssuanceSource, CsvPriceSource};
    pub use crate::error::LoaderError;
    pub use s2f_model::{IssuanceSource, PriceSource};
}

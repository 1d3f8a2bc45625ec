//! Input records and the source seams that supply them.
//!
//! Loading is external to the engine: anything that can hand over a list
//! of dated issuance or price records implements [`IssuanceSource`] or
//! [`PriceSource`].

use s2f_core::types::Date;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;

/// Issuance produced on one day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IssuanceRecord {
    /// Day of production
    pub date: Date,
    /// Units issued that day
    pub generation: f64,
}

impl IssuanceRecord {
    /// Create an issuance record
    pub fn new(date: Date, generation: f64) -> Self {
        Self { date, generation }
    }
}

/// Observed market price at a date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    /// Observation date
    pub date: Date,
    /// Price in the quote currency
    pub price: f64,
}

impl PriceRecord {
    /// Create a price record
    pub fn new(date: Date, price: f64) -> Self {
        Self { date, price }
    }
}

/// Supplies raw daily issuance records.
pub trait IssuanceSource {
    /// Error raised when records cannot be produced.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Returns all issuance records, in any order.
    fn issuance_records(&self) -> Result<Vec<IssuanceRecord>, Self::Error>;
}

/// Supplies raw price records.
pub trait PriceSource {
    /// Error raised when records cannot be produced.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Returns all price records, in any order.
    fn price_records(&self) -> Result<Vec<PriceRecord>, Self::Error>;
}

impl IssuanceSource for Vec<IssuanceRecord> {
    type Error = Infallible;

    fn issuance_records(&self) -> Result<Vec<IssuanceRecord>, Infallible> {
        Ok(self.clone())
    }
}

impl PriceSource for Vec<PriceRecord> {
    type Error = Infallible;

    fn price_records(&self) -> Result<Vec<PriceRecord>, Infallible> {
        Ok(self.clone())
    }
}

//! # s2f_model: Stock-to-Flow Scarcity Model Engine
//!
//! Derives historical and projected issuance statistics from daily
//! production records, merges them with market prices, fits a log-linear
//! regression of price on scarcity and scores deviations from it.
//!
//! ## Pipeline
//!
//! Each stage is a pure function that can be called on its own:
//!
//! | Stage | Function |
//! |---|---|
//! | Calendar normalisation | [`calendar::normalize_and_extend`] |
//! | Reference rate | [`projection::reference_rate`] |
//! | Halving segments | [`projection::projection_segments`] |
//! | Projection | [`projection::project_issuance`] |
//! | Resampling | [`resample::resample_issuance`], [`resample::resample_prices`] |
//! | Countdown | [`countdown::days_until_next_halving`] |
//!
//! [`ScarcityModel::build`] chains them and returns a [`ModelTable`].
//!
//! ## Usage Examples
//!
//! ```rust
//! use s2f_core::types::Date;
//! use s2f_model::{IssuanceRecord, ModelConfig, PriceRecord, ScarcityModel};
//!
//! let d = |y, m, dd| Date::from_ymd(y, m, dd).unwrap();
//! let config = ModelConfig::default()
//!     .with_halving_dates(vec![d(2021, 1, 1)])
//!     .with_reference_window(d(2020, 1, 1), d(2020, 6, 30))
//!     .with_horizon_end(d(2021, 6, 30));
//!
//! let issuance: Vec<_> = d(2019, 1, 1)
//!     .days_through(d(2020, 9, 30))
//!     .map(|day| IssuanceRecord::new(day, 100.0))
//!     .collect();
//! let prices: Vec<_> = d(2019, 1, 1)
//!     .days_through(d(2020, 9, 30))
//!     .enumerate()
//!     .map(|(i, day)| PriceRecord::new(day, 10.0 + i as f64))
//!     .collect();
//!
//! let model = ScarcityModel::new(config).unwrap();
//! let table = model.build(&issuance, &prices).unwrap();
//!
//! let last = table.len() - 1;
//! assert_eq!(table.generation()[last], 50.0);
//! assert!(table.column("price").unwrap()[last].is_none());
//! assert!(table.column("price_pred").unwrap()[last].is_some());
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod calendar;
pub mod config;
pub mod countdown;
pub mod engine;
pub mod error;
pub mod granularity;
pub mod projection;
pub mod records;
pub mod resample;
pub mod schedule;
pub mod table;

pub use config::ModelConfig;
pub use engine::{build_model_table, ScarcityModel};
pub use error::{ErrorKind, ModelError};
pub use granularity::Granularity;
pub use projection::{ProjectionSegment, ReferenceWindow};
pub use records::{IssuanceRecord, IssuanceSource, PriceRecord, PriceSource};
pub use schedule::HalvingSchedule;
pub use table::{Column, ModelRow, ModelTable};

//! Scarcity-price model engine.
//!
//! Chains the pure stages into one build:
//! 1. Normalise the issuance calendar and extend it to the horizon
//! 2. Project issuance from the reference rate under the halving schedule
//! 3. Resample, then derive stock, year flow and the stock-to-flow ratio
//! 4. Merge resampled prices and derive their log and relative change
//! 5. Score the scarcity multiple
//! 6. Fit log price on log stock-to-flow over observed periods and score residuals
//! 7. Annotate the halving countdown

use s2f_core::math::regression::RegressionFit;
use s2f_core::math::series::{ln, ratio, relative_difference};
use s2f_core::math::stats::zscore;
use tracing::{debug, info};

use crate::calendar::normalize_and_extend;
use crate::config::ModelConfig;
use crate::countdown::days_until_next_halving;
use crate::error::ModelError;
use crate::projection::{project_issuance, projection_segments, reference_rate};
use crate::records::{IssuanceRecord, IssuanceSource, PriceRecord, PriceSource};
use crate::resample::{align, resample_issuance, resample_prices};
use crate::table::ModelTable;

/// Stock-to-flow model with a validated configuration.
///
/// Building is deterministic: the same records and configuration always
/// produce the same table.
#[derive(Debug, Clone)]
pub struct ScarcityModel {
    config: ModelConfig,
}

impl ScarcityModel {
    /// Create a model, rejecting invalid configurations.
    pub fn new(config: ModelConfig) -> Result<Self, ModelError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The model's configuration.
    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    /// Pull records from both sources and build the table.
    pub fn build_from_sources<I, P>(&self, issuance: &I, prices: &P) -> Result<ModelTable, ModelError>
    where
        I: IssuanceSource + ?Sized,
        P: PriceSource + ?Sized,
    {
        let issuance = issuance
            .issuance_records()
            .map_err(|e| ModelError::source(format!("issuance: {}", e)))?;
        let prices = prices
            .price_records()
            .map_err(|e| ModelError::source(format!("price: {}", e)))?;
        self.build(&issuance, &prices)
    }

    /// Build the model table from raw issuance and price records.
    ///
    /// # Errors
    /// - `EmptySeries` if either input has no records
    /// - `EmptyReferenceWindow` if no observed issuance falls in the reference window
    /// - `NoPriceOverlap` if prices start after the horizon
    /// - `Regression` if fewer than two observed periods have both logs defined
    pub fn build(
        &self,
        issuance: &[IssuanceRecord],
        prices: &[PriceRecord],
    ) -> Result<ModelTable, ModelError> {
        let config = &self.config;
        let schedule = config.schedule()?;
        let granularity = config.granularity;

        // Issuance side, on the full period grid
        let daily = normalize_and_extend(issuance, config.horizon_end)?;
        let last_observed = daily.projection_start();
        let rate = reference_rate(&daily, config.reference_window)?;
        let segments = projection_segments(&schedule, config.reference_window.end, last_observed);
        debug!(segments = segments.len(), "Derived projection segments");
        let projected_daily = project_issuance(&daily, rate, &segments);

        let periods = resample_issuance(&projected_daily, granularity)?;
        let stock = periods.stock();
        let year_flow = periods.year_flow(granularity);
        let stock_defined: Vec<Option<f64>> = stock.iter().copied().map(Some).collect();
        let s2f = ratio(&stock_defined, &year_flow);
        let s2f_log = ln(&s2f);
        let s2f_dif = relative_difference(&s2f);

        // Trim the grid to the span covered by prices
        let price_buckets = resample_prices(prices, granularity)?;
        let first_price = match price_buckets.keys().next() {
            Some(first) => *first,
            None => return Err(ModelError::EmptySeries { series: "price" }),
        };
        let offset = periods.labels.partition_point(|label| *label < first_price);
        if offset >= periods.len() {
            return Err(ModelError::NoPriceOverlap {
                last_period: periods.labels.last().copied().unwrap_or(first_price),
                first_price,
            });
        }

        let dates = periods.labels[offset..].to_vec();
        let projected = periods.projected[offset..].to_vec();
        let generation = periods.generation[offset..].to_vec();
        let stock = stock[offset..].to_vec();
        let year_flow = year_flow[offset..].to_vec();
        let s2f = s2f[offset..].to_vec();
        let s2f_log = s2f_log[offset..].to_vec();
        let s2f_dif = s2f_dif[offset..].to_vec();

        // Price side
        let price = align(&price_buckets, &dates);
        let price_log = ln(&price);
        let price_dif = relative_difference(&price);

        let s2f_multiple = ratio(&s2f_log, &price_log);
        let s2f_zscore = zscore(&s2f_multiple);

        // Regression over observed periods up to the cutoff
        let fit_cutoff = config.fit_cutoff.unwrap_or(last_observed);
        let in_fit: Vec<bool> = dates
            .iter()
            .zip(projected.iter())
            .map(|(date, projected)| *date <= fit_cutoff && !projected)
            .collect();
        let mask = |values: &[Option<f64>]| -> Vec<Option<f64>> {
            values
                .iter()
                .zip(in_fit.iter())
                .map(|(v, keep)| if *keep { *v } else { None })
                .collect()
        };

        let fit = RegressionFit::fit(&mask(&s2f_log), &mask(&price_log))?;
        debug!(
            intercept = fit.intercept,
            slope = fit.slope,
            observations = fit.observations,
            "Fitted log-price regression"
        );

        let price_pred = fit.predict_series(&s2f_log);
        let residuals: Vec<Option<f64>> = price_pred
            .iter()
            .zip(price_log.iter())
            .map(|(pred, actual)| pred.zip(*actual).map(|(p, a)| p - a))
            .collect();
        let price_pred_dif = mask(&residuals);
        let price_pred_dif_zscore = zscore(&price_pred_dif);

        let days_until_next_halving = days_until_next_halving(&dates, &schedule, config.horizon_end);

        info!(
            granularity = %granularity,
            rows = dates.len(),
            last_observed = %last_observed,
            reference_rate = rate,
            "Built stock-to-flow model table"
        );

        Ok(ModelTable {
            granularity,
            last_observed,
            fit_cutoff,
            fit,
            dates,
            projected,
            generation,
            stock,
            year_flow,
            s2f,
            s2f_log,
            s2f_dif,
            price,
            price_log,
            price_dif,
            s2f_multiple,
            s2f_zscore,
            price_pred,
            price_pred_dif,
            price_pred_dif_zscore,
            days_until_next_halving,
        })
    }
}

/// Build a model table in one call.
pub fn build_model_table(
    issuance: &[IssuanceRecord],
    prices: &[PriceRecord],
    config: &ModelConfig,
) -> Result<ModelTable, ModelError> {
    ScarcityModel::new(config.clone())?.build(issuance, prices)
}

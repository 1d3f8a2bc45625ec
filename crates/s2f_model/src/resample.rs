//! Resampling daily data to coarser periods.

use s2f_core::math::series::{cumulative_sum, rolling_sum};
use s2f_core::types::Date;
use std::collections::BTreeMap;

use crate::calendar::DailySeries;
use crate::error::ModelError;
use crate::granularity::Granularity;
use crate::records::PriceRecord;

/// Issuance aggregated per period.
#[derive(Debug, Clone, PartialEq)]
pub struct IssuancePeriods {
    /// Period labels in increasing order
    pub labels: Vec<Date>,
    /// Summed issuance per period
    pub generation: Vec<f64>,
    /// Whether the period contains any projected day
    pub projected: Vec<bool>,
}

impl IssuancePeriods {
    /// Number of periods.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether there are no periods.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// All-time running total of issuance.
    pub fn stock(&self) -> Vec<f64> {
        cumulative_sum(&self.generation)
    }

    /// Trailing one-year issuance; missing until a full year of periods exists.
    pub fn year_flow(&self, granularity: Granularity) -> Vec<Option<f64>> {
        rolling_sum(&self.generation, granularity.periods_per_year())
    }
}

/// Sums a gap-free daily series into periods of the given granularity.
///
/// Because the daily series has no gaps, every period between the first
/// and the last is present.
///
/// # Examples
///
/// ```
/// use s2f_core::types::Date;
/// use s2f_model::calendar::normalize_and_extend;
/// use s2f_model::resample::resample_issuance;
/// use s2f_model::{Granularity, IssuanceRecord};
///
/// let start = Date::from_ymd(2024, 1, 30).unwrap();
/// let end = Date::from_ymd(2024, 2, 2).unwrap();
/// let records: Vec<_> = start.days_through(end).map(|d| IssuanceRecord::new(d, 1.0)).collect();
/// let daily = normalize_and_extend(&records, end).unwrap();
///
/// let monthly = resample_issuance(&daily, Granularity::Month).unwrap();
/// assert_eq!(monthly.generation, vec![2.0, 2.0]);
/// assert_eq!(monthly.labels[0].to_string(), "2024-01-31");
/// ```
pub fn resample_issuance(
    daily: &DailySeries,
    granularity: Granularity,
) -> Result<IssuancePeriods, ModelError> {
    let mut periods = IssuancePeriods {
        labels: Vec::new(),
        generation: Vec::new(),
        projected: Vec::new(),
    };

    for (date, value) in daily.iter() {
        let label = granularity.period_end(date)?;
        let projected = daily.is_projected(date);
        match periods.labels.last() {
            Some(last) if *last == label => {
                if let Some(total) = periods.generation.last_mut() {
                    *total += value;
                }
                if let Some(flag) = periods.projected.last_mut() {
                    *flag |= projected;
                }
            }
            _ => {
                periods.labels.push(label);
                periods.generation.push(value);
                periods.projected.push(projected);
            }
        }
    }

    Ok(periods)
}

/// Averages price records per period.
///
/// Only periods holding at least one finite price appear in the result,
/// in increasing label order.
pub fn resample_prices(
    records: &[PriceRecord],
    granularity: Granularity,
) -> Result<BTreeMap<Date, f64>, ModelError> {
    let mut buckets: BTreeMap<Date, (f64, usize)> = BTreeMap::new();
    for record in records.iter().filter(|r| r.price.is_finite()) {
        let label = granularity.period_end(record.date)?;
        let entry = buckets.entry(label).or_insert((0.0, 0));
        entry.0 += record.price;
        entry.1 += 1;
    }

    Ok(buckets
        .into_iter()
        .map(|(label, (sum, count))| (label, sum / count as f64))
        .collect())
}

/// Looks up a sparse period series on a full label grid.
pub fn align(values: &BTreeMap<Date, f64>, labels: &[Date]) -> Vec<Option<f64>> {
    labels.iter().map(|label| values.get(label).copied()).collect()
}

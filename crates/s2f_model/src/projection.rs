//! Halving-aware issuance projection.
//!
//! Future issuance is the mean daily rate over a fixed reference window,
//! halved once for every schedule date crossed after that window:
//!
//! ```text
//! rate(d) = R / 2^k,   k = #{ h in schedule : reference_end < h <= d }
//! ```

use s2f_core::math::stats::mean;
use s2f_core::types::Date;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calendar::DailySeries;
use crate::error::ModelError;
use crate::schedule::HalvingSchedule;

/// Inclusive date range whose observed issuance sets the baseline rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceWindow {
    /// First day of the window
    pub start: Date,
    /// Last day of the window
    pub end: Date,
}

impl ReferenceWindow {
    /// Create a reference window
    pub fn new(start: Date, end: Date) -> Self {
        Self { start, end }
    }

    /// Whether `date` falls inside the window.
    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }

    /// Rejects windows that start after they end.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.start > self.end {
            return Err(ModelError::InvalidReferenceWindow {
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }
}

/// Constant-rate stretch of the projection: applies from `start` until the
/// next segment's start.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSegment {
    /// First day the multiplier applies
    pub start: Date,
    /// Fraction of the reference rate, `0.5^k`
    pub multiplier: f64,
}

/// Mean daily issuance over the observed days inside `window`.
///
/// Only days strictly before the series' projection start are observed;
/// the last recorded day may be partial and is excluded.
///
/// # Errors
/// - `InvalidReferenceWindow` if the window is inverted
/// - `EmptyReferenceWindow` if no observed day falls inside it
pub fn reference_rate(daily: &DailySeries, window: ReferenceWindow) -> Result<f64, ModelError> {
    window.validate()?;

    let observed: Vec<Option<f64>> = daily
        .iter()
        .filter(|(date, _)| window.contains(*date) && !daily.is_projected(*date))
        .map(|(_, value)| Some(value))
        .collect();

    let rate = mean(&observed).ok_or(ModelError::EmptyReferenceWindow {
        start: window.start,
        end: window.end,
    })?;

    debug!(days = observed.len(), rate, "Computed reference issuance rate");
    Ok(rate)
}

/// Walks the schedule once to derive the projection's constant-rate segments.
///
/// The first segment starts at `projection_start`; each later segment
/// starts at a halving date and carries half the previous multiplier.
/// Halvings on or before `reference_end` are already reflected in the
/// reference rate and never halve it again.
///
/// # Examples
///
/// ```
/// use s2f_core::types::Date;
/// use s2f_model::projection::projection_segments;
/// use s2f_model::HalvingSchedule;
///
/// let d = |y, m, dd| Date::from_ymd(y, m, dd).unwrap();
/// let schedule = HalvingSchedule::new(vec![
///     d(2016, 7, 9), d(2020, 5, 18), d(2024, 5, 18),
/// ]).unwrap();
///
/// let segments = projection_segments(&schedule, d(2019, 10, 8), d(2019, 10, 1));
/// let multipliers: Vec<f64> = segments.iter().map(|s| s.multiplier).collect();
/// assert_eq!(multipliers, vec![1.0, 0.5, 0.25]);
/// assert_eq!(segments[1].start, d(2020, 5, 18));
/// ```
pub fn projection_segments(
    schedule: &HalvingSchedule,
    reference_end: Date,
    projection_start: Date,
) -> Vec<ProjectionSegment> {
    let crossed = schedule.count_between(reference_end, projection_start);
    let mut multiplier = 0.5_f64.powi(crossed as i32);
    let mut segments = vec![ProjectionSegment {
        start: projection_start,
        multiplier,
    }];

    for &halving in schedule.dates() {
        if halving > projection_start && halving > reference_end {
            multiplier *= 0.5;
            segments.push(ProjectionSegment {
                start: halving,
                multiplier,
            });
        }
    }
    segments
}

/// Replaces issuance on and after the projection start with the projected rate.
///
/// Days before the projection start keep their observed values.
pub fn project_issuance(
    daily: &DailySeries,
    reference_rate: f64,
    segments: &[ProjectionSegment],
) -> DailySeries {
    let mut current = 0usize;
    let values = daily
        .iter()
        .map(|(date, observed)| {
            if !daily.is_projected(date) {
                return observed;
            }
            while current + 1 < segments.len() && segments[current + 1].start <= date {
                current += 1;
            }
            segments
                .get(current)
                .map_or(reference_rate, |s| reference_rate * s.multiplier)
        })
        .collect();

    daily.with_values(values)
}

//! Calendar normalisation and extension of raw issuance records.

use s2f_core::types::Date;
use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::error::ModelError;
use crate::records::IssuanceRecord;

/// Gap-free daily issuance series.
///
/// Every calendar day from [`start`](Self::start) to [`end`](Self::end)
/// has exactly one value. Days from [`projection_start`](Self::projection_start)
/// onwards are placeholders (or projections) rather than observations.
#[derive(Debug, Clone, PartialEq)]
pub struct DailySeries {
    start: Date,
    values: Vec<f64>,
    projection_start: Date,
}

impl DailySeries {
    /// First day of the series.
    pub fn start(&self) -> Date {
        self.start
    }

    /// Last day of the series.
    pub fn end(&self) -> Date {
        // values is never empty: normalisation rejects empty input
        self.date_at(self.values.len().saturating_sub(1))
    }

    /// Last observed actual-issuance date; projection applies from here on.
    pub fn projection_start(&self) -> Date {
        self.projection_start
    }

    /// Number of days.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the series has no days.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Daily issuance values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Date of the `i`-th day.
    pub fn date_at(&self, i: usize) -> Date {
        // in range by construction: start + len - 1 was representable
        self.start.add_days(i as i64).unwrap_or(self.start)
    }

    /// Position of `date` in the series.
    pub fn index_of(&self, date: Date) -> Option<usize> {
        let offset = date - self.start;
        if offset < 0 || offset as usize >= self.values.len() {
            None
        } else {
            Some(offset as usize)
        }
    }

    /// Whether `date` lies in the projected range.
    pub fn is_projected(&self, date: Date) -> bool {
        date >= self.projection_start
    }

    /// Iterates `(date, issuance)` pairs in calendar order.
    pub fn iter(&self) -> impl Iterator<Item = (Date, f64)> + '_ {
        self.start.days_through(self.end()).zip(self.values.iter().copied())
    }

    /// Returns a series on the same calendar grid with new values.
    ///
    /// # Panics
    /// Panics if `values` does not have one entry per day.
    pub fn with_values(&self, values: Vec<f64>) -> Self {
        assert_eq!(values.len(), self.values.len(), "value count must match day count");
        Self {
            start: self.start,
            values,
            projection_start: self.projection_start,
        }
    }
}

/// Reindexes raw issuance records onto a gap-free daily calendar that runs
/// from the first record through `horizon_end`.
///
/// Records sharing a date are summed, interior gaps and days after the last
/// record are zero, and non-finite quantities are skipped. If the records
/// already extend past the horizon the series simply ends at the last
/// record.
///
/// # Errors
/// `EmptySeries` if no usable record exists.
///
/// # Examples
///
/// ```
/// use s2f_core::types::Date;
/// use s2f_model::calendar::normalize_and_extend;
/// use s2f_model::IssuanceRecord;
///
/// let d = |day| Date::from_ymd(2024, 1, day).unwrap();
/// let records = vec![IssuanceRecord::new(d(1), 5.0), IssuanceRecord::new(d(3), 7.0)];
/// let daily = normalize_and_extend(&records, d(5)).unwrap();
///
/// assert_eq!(daily.values(), &[5.0, 0.0, 7.0, 0.0, 0.0]);
/// assert_eq!(daily.projection_start(), d(3));
/// ```
pub fn normalize_and_extend(
    records: &[IssuanceRecord],
    horizon_end: Date,
) -> Result<DailySeries, ModelError> {
    let mut by_date: BTreeMap<Date, f64> = BTreeMap::new();
    let mut skipped = 0usize;
    for record in records {
        if record.generation.is_finite() {
            *by_date.entry(record.date).or_insert(0.0) += record.generation;
        } else {
            skipped += 1;
        }
    }
    if skipped > 0 {
        warn!(skipped, "Skipped issuance records with non-finite quantities");
    }

    let (first, last) = match (by_date.keys().next(), by_date.keys().next_back()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => return Err(ModelError::EmptySeries { series: "issuance" }),
    };

    let end = last.max(horizon_end);

    let mut values = vec![0.0; (end - first + 1) as usize];
    for (date, generation) in &by_date {
        values[(*date - first) as usize] = *generation;
    }

    debug!(
        first = %first,
        last_observed = %last,
        end = %end,
        days = values.len(),
        "Normalised issuance calendar"
    );

    Ok(DailySeries {
        start: first,
        values,
        projection_start: last,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn test_empty_input_rejected() {
        let err = normalize_and_extend(&[], date(2026, 1, 31)).unwrap_err();
        assert_eq!(err, ModelError::EmptySeries { series: "issuance" });
    }

    #[test]
    fn test_unordered_and_duplicate_records() {
        let records = vec![
            IssuanceRecord::new(date(2020, 1, 3), 1.0),
            IssuanceRecord::new(date(2020, 1, 1), 2.0),
            IssuanceRecord::new(date(2020, 1, 3), 4.0),
        ];
        let daily = normalize_and_extend(&records, date(2020, 1, 2)).unwrap();
        assert_eq!(daily.values(), &[2.0, 0.0, 5.0]);
        assert_eq!(daily.end(), date(2020, 1, 3));
    }

    #[test]
    fn test_horizon_before_last_record_is_noop() {
        let records: Vec<IssuanceRecord> = date(2020, 1, 1)
            .days_through(date(2020, 1, 10))
            .map(|d| IssuanceRecord::new(d, 1.0))
            .collect();
        let daily = normalize_and_extend(&records, date(2019, 6, 1)).unwrap();
        assert_eq!(daily.len(), 10);
        assert_eq!(daily.end(), date(2020, 1, 10));
    }

    #[test]
    fn test_non_finite_records_skipped() {
        let records = vec![
            IssuanceRecord::new(date(2020, 1, 1), 3.0),
            IssuanceRecord::new(date(2020, 1, 2), f64::NAN),
        ];
        let daily = normalize_and_extend(&records, date(2020, 1, 3)).unwrap();
        assert_eq!(daily.values(), &[3.0, 0.0, 0.0]);
        assert_eq!(daily.projection_start(), date(2020, 1, 1));
    }

    #[test]
    fn test_iter_and_index() {
        let records = vec![IssuanceRecord::new(date(2020, 2, 28), 1.0)];
        let daily = normalize_and_extend(&records, date(2020, 3, 1)).unwrap();
        let days: Vec<Date> = daily.iter().map(|(d, _)| d).collect();
        assert_eq!(days, vec![date(2020, 2, 28), date(2020, 2, 29), date(2020, 3, 1)]);
        assert_eq!(daily.index_of(date(2020, 2, 29)), Some(1));
        assert_eq!(daily.index_of(date(2020, 3, 2)), None);
        assert_eq!(daily.index_of(date(2020, 2, 27)), None);
        assert!(daily.is_projected(date(2020, 2, 28)));
        assert!(!daily.is_projected(date(2020, 2, 27)));
    }
}

//! Halving schedule.
//!
//! The schedule partitions the time axis into half-open intervals
//! `[date_i, date_i+1)`; the last interval is open-ended.

use s2f_core::types::Date;
use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Strictly increasing sequence of halving dates.
///
/// # Examples
///
/// ```
/// use s2f_core::types::Date;
/// use s2f_model::HalvingSchedule;
///
/// let d = |y, m, dd| Date::from_ymd(y, m, dd).unwrap();
/// let schedule = HalvingSchedule::new(vec![d(2016, 7, 9), d(2020, 5, 18)]).unwrap();
///
/// assert_eq!(schedule.next_after(d(2018, 1, 1)), Some(d(2020, 5, 18)));
/// assert_eq!(schedule.next_after(d(2020, 5, 18)), None);
/// assert!(HalvingSchedule::new(vec![d(2020, 5, 18), d(2016, 7, 9)]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<Date>", into = "Vec<Date>")]
pub struct HalvingSchedule {
    dates: Vec<Date>,
}

impl HalvingSchedule {
    /// Validates and wraps a list of halving dates.
    ///
    /// An empty schedule is valid and describes a single infinite interval.
    pub fn new(dates: Vec<Date>) -> Result<Self, ModelError> {
        Self::check(&dates)?;
        Ok(Self { dates })
    }

    /// Checks the strict ordering invariant without taking ownership.
    pub fn check(dates: &[Date]) -> Result<(), ModelError> {
        for (i, pair) in dates.windows(2).enumerate() {
            if pair[1] <= pair[0] {
                return Err(ModelError::NonIncreasingSchedule {
                    index: i + 1,
                    previous: pair[0],
                    current: pair[1],
                });
            }
        }
        Ok(())
    }

    /// Halving dates in increasing order.
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Number of halving dates.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Whether the schedule has no halvings.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// First halving strictly after `date`.
    pub fn next_after(&self, date: Date) -> Option<Date> {
        let idx = self.dates.partition_point(|h| *h <= date);
        self.dates.get(idx).copied()
    }

    /// Number of halvings `h` with `after < h <= through`.
    pub fn count_between(&self, after: Date, through: Date) -> usize {
        if through <= after {
            return 0;
        }
        let lo = self.dates.partition_point(|h| *h <= after);
        let hi = self.dates.partition_point(|h| *h <= through);
        hi - lo
    }
}

impl TryFrom<Vec<Date>> for HalvingSchedule {
    type Error = ModelError;

    fn try_from(dates: Vec<Date>) -> Result<Self, ModelError> {
        Self::new(dates)
    }
}

impl From<HalvingSchedule> for Vec<Date> {
    fn from(schedule: HalvingSchedule) -> Self {
        schedule.dates
    }
}

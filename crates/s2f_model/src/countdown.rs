//! Days-until-next-halving annotation.

use s2f_core::types::Date;

use crate::schedule::HalvingSchedule;

/// Whole days from each date to the end of its schedule interval.
///
/// A date in `[h_i, h_i+1)` counts down to `h_i+1`, even when `h_i+1` lies
/// past the horizon; dates before the first halving count down to it. Once no
/// later halving exists the count runs to `horizon_end`, clamped at zero for
/// period labels that fall after the horizon.
///
/// # Examples
///
/// ```
/// use s2f_core::types::Date;
/// use s2f_model::countdown::days_until_next_halving;
/// use s2f_model::HalvingSchedule;
///
/// let d = |day| Date::from_ymd(2024, 1, day).unwrap();
/// let schedule = HalvingSchedule::new(vec![d(3)]).unwrap();
/// let dates = [d(1), d(2), d(3), d(4)];
///
/// assert_eq!(days_until_next_halving(&dates, &schedule, d(10)), vec![2, 1, 7, 6]);
/// ```
pub fn days_until_next_halving(
    dates: &[Date],
    schedule: &HalvingSchedule,
    horizon_end: Date,
) -> Vec<i64> {
    dates
        .iter()
        .map(|&date| match schedule.next_after(date) {
            Some(halving) => halving - date,
            None => (horizon_end - date).max(0),
        })
        .collect()
}

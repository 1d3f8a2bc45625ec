//! Descriptive statistics over missing-aware series.
//!
//! Missing entries are excluded from every statistic. Standard deviation
//! uses the population convention (divisor `n`), so a z-scored series has
//! population standard deviation exactly one.

use num_traits::Float;

/// Arithmetic mean of the defined entries, `None` if there are none.
///
/// # Examples
/// ```
/// use s2f_core::math::stats::mean;
///
/// assert_eq!(mean(&[Some(1.0_f64), None, Some(3.0)]), Some(2.0));
/// assert_eq!(mean::<f64>(&[None, None]), None);
/// ```
pub fn mean<T: Float>(values: &[Option<T>]) -> Option<T> {
    let (sum, count) = values
        .iter()
        .flatten()
        .fold((T::zero(), T::zero()), |(sum, count), &v| {
            (sum + v, count + T::one())
        });

    if count > T::zero() {
        Some(sum / count)
    } else {
        None
    }
}

/// Population standard deviation of the defined entries.
///
/// # Examples
/// ```
/// use s2f_core::math::stats::population_std_dev;
///
/// let sd = population_std_dev(&[Some(2.0_f64), Some(4.0), Some(4.0), Some(4.0),
///                               Some(5.0), Some(5.0), Some(7.0), Some(9.0)]);
/// assert_eq!(sd, Some(2.0));
/// ```
pub fn population_std_dev<T: Float>(values: &[Option<T>]) -> Option<T> {
    let mu = mean(values)?;
    let (squares, count) = values
        .iter()
        .flatten()
        .fold((T::zero(), T::zero()), |(acc, count), &v| {
            let d = v - mu;
            (acc + d * d, count + T::one())
        });

    Some((squares / count).sqrt())
}

/// Standard score `(x - mean) / stddev` of each defined entry.
///
/// Missing entries stay missing at their original positions. A series with
/// zero spread (or no defined entries) scores as entirely missing.
///
/// # Examples
/// ```
/// use s2f_core::math::stats::zscore;
///
/// let z = zscore(&[Some(1.0_f64), None, Some(3.0)]);
/// assert_eq!(z, vec![Some(-1.0), None, Some(1.0)]);
///
/// let flat = zscore(&[Some(5.0_f64), Some(5.0)]);
/// assert_eq!(flat, vec![None, None]);
/// ```
pub fn zscore<T: Float>(values: &[Option<T>]) -> Vec<Option<T>> {
    let stats = mean(values).zip(population_std_dev(values));

    match stats {
        Some((mu, sigma)) if sigma > T::zero() && sigma.is_finite() => values
            .iter()
            .map(|v| v.map(|x| (x - mu) / sigma))
            .collect(),
        _ => vec![None; values.len()],
    }
}

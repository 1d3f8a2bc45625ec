//! Missing-aware series operations.
//!
//! A series is a slice of `Option<T>`; `None` is an undefined cell. Every
//! function returns a vector the same length as its input so row positions
//! are never shifted. Results that are not finite (division by zero, log of
//! zero) become `None` instead of infinities or NaN.
//!
//! All functions use generic type parameter `T: num_traits::Float` for f32/f64 support.

use num_traits::Float;

/// Returns `Some(value)` when the value is finite, `None` otherwise.
#[inline]
pub fn finite<T: Float>(value: T) -> Option<T> {
    if value.is_finite() {
        Some(value)
    } else {
        None
    }
}

/// Natural logarithm that is undefined for non-positive or non-finite input.
///
/// # Examples
/// ```
/// use s2f_core::math::series::checked_ln;
///
/// assert_eq!(checked_ln(1.0_f64), Some(0.0));
/// assert_eq!(checked_ln(0.0_f64), None);
/// assert_eq!(checked_ln(-3.0_f64), None);
/// ```
#[inline]
pub fn checked_ln<T: Float>(value: T) -> Option<T> {
    if value > T::zero() {
        finite(value.ln())
    } else {
        None
    }
}

/// Element-wise natural logarithm of a series.
pub fn ln<T: Float>(values: &[Option<T>]) -> Vec<Option<T>> {
    values.iter().map(|v| v.and_then(checked_ln)).collect()
}

/// Element-wise quotient `numerator / denominator`.
///
/// A missing operand or a zero denominator yields `None`.
///
/// # Panics
/// Panics if the two series differ in length.
///
/// # Examples
/// ```
/// use s2f_core::math::series::ratio;
///
/// let stock = [Some(10.0_f64), Some(20.0), Some(30.0)];
/// let flow = [None, Some(0.0), Some(5.0)];
/// assert_eq!(ratio(&stock, &flow), vec![None, None, Some(6.0)]);
/// ```
pub fn ratio<T: Float>(numerator: &[Option<T>], denominator: &[Option<T>]) -> Vec<Option<T>> {
    assert_eq!(
        numerator.len(),
        denominator.len(),
        "ratio operands must have equal length"
    );

    numerator
        .iter()
        .zip(denominator.iter())
        .map(|(n, d)| match (n, d) {
            (Some(n), Some(d)) if *d != T::zero() => finite(*n / *d),
            _ => None,
        })
        .collect()
}

/// Period-over-period relative change `(s[i] - s[i-1]) / s[i-1]`.
///
/// The first element has no predecessor and is always `None`. A missing
/// current or previous value, or a zero previous value, is also `None`.
///
/// # Examples
/// ```
/// use s2f_core::math::series::relative_difference;
///
/// let constant = [Some(4.0_f64); 4];
/// assert_eq!(
///     relative_difference(&constant),
///     vec![None, Some(0.0), Some(0.0), Some(0.0)]
/// );
/// ```
pub fn relative_difference<T: Float>(values: &[Option<T>]) -> Vec<Option<T>> {
    let mut out = Vec::with_capacity(values.len());
    if values.is_empty() {
        return out;
    }

    out.push(None);
    for window in values.windows(2) {
        let change = match (window[0], window[1]) {
            (Some(prev), Some(curr)) if prev != T::zero() => finite((curr - prev) / prev),
            _ => None,
        };
        out.push(change);
    }
    out
}

/// Running total of a fully defined series.
///
/// # Examples
/// ```
/// use s2f_core::math::series::cumulative_sum;
///
/// assert_eq!(cumulative_sum(&[1.0_f64, 2.0, 3.0]), vec![1.0, 3.0, 6.0]);
/// ```
pub fn cumulative_sum<T: Float>(values: &[T]) -> Vec<T> {
    values
        .iter()
        .scan(T::zero(), |total, &v| {
            *total = *total + v;
            Some(*total)
        })
        .collect()
}

/// Trailing sum over `window` elements.
///
/// Positions before the first complete window are `None`. A zero window
/// yields an all-`None` series.
///
/// # Examples
/// ```
/// use s2f_core::math::series::rolling_sum;
///
/// let sums = rolling_sum(&[1.0_f64, 2.0, 3.0, 4.0], 2);
/// assert_eq!(sums, vec![None, Some(3.0), Some(5.0), Some(7.0)]);
/// ```
pub fn rolling_sum<T: Float>(values: &[T], window: usize) -> Vec<Option<T>> {
    if window == 0 {
        return vec![None; values.len()];
    }

    // Summing each window directly keeps results exact for repeated
    // constants; the windows are at most a few hundred elements long.
    (0..values.len())
        .map(|i| {
            if i + 1 < window {
                None
            } else {
                let sum = values[i + 1 - window..=i]
                    .iter()
                    .fold(T::zero(), |acc, &v| acc + v);
                Some(sum)
            }
        })
        .collect()
}

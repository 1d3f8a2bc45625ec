//! Ordinary least squares with intercept.
//!
//! Fits `y = intercept + slope * x` over the rows where both `x` and `y`
//! are defined, using the closed-form normal equations
//!
//! ```text
//! slope     = Σ(x - x̄)(y - ȳ) / Σ(x - x̄)²
//! intercept = ȳ - slope * x̄
//! ```

use serde::{Deserialize, Serialize};

use crate::types::RegressionError;

/// Minimum number of paired observations for a line fit.
pub const MIN_OBSERVATIONS: usize = 2;

/// Fitted coefficients of a simple linear regression.
///
/// # Examples
///
/// ```
/// use s2f_core::math::regression::RegressionFit;
///
/// let x = [Some(1.0), Some(2.0), None, Some(3.0)];
/// let y = [Some(3.0), Some(5.0), Some(100.0), Some(7.0)];
/// let fit = RegressionFit::fit(&x, &y).unwrap();
///
/// assert!((fit.slope - 2.0).abs() < 1e-12);
/// assert!((fit.intercept - 1.0).abs() < 1e-12);
/// assert_eq!(fit.observations, 3);
/// assert_eq!(fit.predict_series(&[Some(10.0), None]), vec![Some(21.0), None]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegressionFit {
    /// Constant term.
    pub intercept: f64,
    /// Coefficient on the regressor.
    pub slope: f64,
    /// Number of paired observations used in the fit.
    pub observations: usize,
    /// Coefficient of determination; `None` when the response is constant.
    pub r_squared: Option<f64>,
}

impl RegressionFit {
    /// Fits `y` on `x`, skipping any row where either side is missing.
    ///
    /// # Errors
    /// - `LengthMismatch` if the series differ in length
    /// - `InsufficientData` with fewer than [`MIN_OBSERVATIONS`] usable rows
    /// - `DegenerateRegressor` if every usable `x` is identical
    pub fn fit(x: &[Option<f64>], y: &[Option<f64>]) -> Result<Self, RegressionError> {
        if x.len() != y.len() {
            return Err(RegressionError::LengthMismatch {
                x: x.len(),
                y: y.len(),
            });
        }

        let pairs: Vec<(f64, f64)> = x
            .iter()
            .zip(y.iter())
            .filter_map(|(x, y)| x.zip(*y))
            .filter(|(x, y)| x.is_finite() && y.is_finite())
            .collect();

        let n = pairs.len();
        if n < MIN_OBSERVATIONS {
            return Err(RegressionError::InsufficientData {
                got: n,
                need: MIN_OBSERVATIONS,
            });
        }

        let count = n as f64;
        let x_mean = pairs.iter().map(|(x, _)| x).sum::<f64>() / count;
        let y_mean = pairs.iter().map(|(_, y)| y).sum::<f64>() / count;

        let mut sxy = 0.0;
        let mut sxx = 0.0;
        let mut syy = 0.0;
        for (x, y) in &pairs {
            let dx = x - x_mean;
            let dy = y - y_mean;
            sxy += dx * dy;
            sxx += dx * dx;
            syy += dy * dy;
        }

        // relative to the regressor scale so tiny but distinct x values still fit
        if sxx <= f64::EPSILON * count * x_mean * x_mean {
            return Err(RegressionError::DegenerateRegressor { observations: n });
        }

        let slope = sxy / sxx;
        let intercept = y_mean - slope * x_mean;
        let r_squared = if syy > 0.0 {
            Some((sxy * sxy) / (sxx * syy))
        } else {
            None
        };

        Ok(Self {
            intercept,
            slope,
            observations: n,
            r_squared,
        })
    }

    /// Predicts the response for a single regressor value.
    #[inline]
    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }

    /// Predicts every row of a series; missing regressors stay missing.
    pub fn predict_series(&self, x: &[Option<f64>]) -> Vec<Option<f64>> {
        x.iter().map(|v| v.map(|x| self.predict(x))).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_fit_exact_line() {
        let x: Vec<Option<f64>> = (0..10).map(|i| Some(i as f64)).collect();
        let y: Vec<Option<f64>> = (0..10).map(|i| Some(-0.5 + 3.25 * i as f64)).collect();

        let fit = RegressionFit::fit(&x, &y).unwrap();
        assert_relative_eq!(fit.slope, 3.25, epsilon = 1e-12);
        assert_relative_eq!(fit.intercept, -0.5, epsilon = 1e-12);
        assert_relative_eq!(fit.r_squared.unwrap(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_fit_noisy_line() {
        // y = 1 + 2x with symmetric residuals +1, -1, -1, +1
        let x = [Some(0.0), Some(1.0), Some(2.0), Some(3.0)];
        let y = [Some(2.0), Some(2.0), Some(4.0), Some(8.0)];
        let fit = RegressionFit::fit(&x, &y).unwrap();
        assert_relative_eq!(fit.slope, 2.0, epsilon = 1e-12);
        assert_relative_eq!(fit.intercept, 1.0, epsilon = 1e-12);
        assert!(fit.r_squared.unwrap() < 1.0);
    }

    #[test]
    fn test_fit_insufficient_rows() {
        let err = RegressionFit::fit(&[Some(1.0), None], &[Some(2.0), Some(3.0)]).unwrap_err();
        assert_eq!(err, RegressionError::InsufficientData { got: 1, need: 2 });
    }

    #[test]
    fn test_fit_degenerate_regressor() {
        let x = [Some(2.0), Some(2.0), Some(2.0)];
        let y = [Some(1.0), Some(2.0), Some(3.0)];
        assert_eq!(
            RegressionFit::fit(&x, &y).unwrap_err(),
            RegressionError::DegenerateRegressor { observations: 3 }
        );
    }

    #[test]
    fn test_fit_degenerate_at_zero_and_repeating_fraction() {
        let y = [Some(1.0), Some(2.0), Some(3.0)];
        for value in [0.0, 0.1, 1e12] {
            let x = [Some(value); 3];
            assert!(matches!(
                RegressionFit::fit(&x, &y),
                Err(RegressionError::DegenerateRegressor { .. })
            ));
        }
    }

    #[test]
    fn test_fit_small_magnitude_regressor() {
        let x = [Some(1e-9), Some(2e-9), Some(3e-9)];
        let y = [Some(1.0), Some(2.0), Some(3.0)];
        let fit = RegressionFit::fit(&x, &y).unwrap();
        assert_relative_eq!(fit.slope, 1e9, max_relative = 1e-9);
        assert_relative_eq!(fit.intercept, 0.0, epsilon = 1e-9);
        assert_relative_eq!(fit.r_squared.unwrap(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_fit_length_mismatch() {
        let err = RegressionFit::fit(&[Some(1.0)], &[]).unwrap_err();
        assert_eq!(err, RegressionError::LengthMismatch { x: 1, y: 0 });
    }

    #[test]
    fn test_constant_response_has_no_r_squared() {
        let x = [Some(1.0), Some(2.0), Some(3.0)];
        let y = [Some(4.0), Some(4.0), Some(4.0)];
        let fit = RegressionFit::fit(&x, &y).unwrap();
        assert_relative_eq!(fit.slope, 0.0, epsilon = 1e-12);
        assert_eq!(fit.r_squared, None);
    }
}

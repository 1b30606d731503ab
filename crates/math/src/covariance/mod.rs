//! Covariance estimators for regression coefficients.
//!
//! Every estimator here is a sandwich `B M B` around the bread
//! `B = (X'X)⁺` computed by the least squares fit; they differ only in
//! the meat `M`. Point estimates never depend on the choice.

use ndarray::Array2;

use crate::{MathError, OlsResult};

mod newey_west;
pub use newey_west::{NeweyWestConfig, NeweyWestCovariance, bartlett_weight};

/// Trait for coefficient covariance estimators.
pub trait CovarianceEstimator: Send + Sync {
    /// Short name used in logs and reports.
    fn name(&self) -> &'static str;

    /// Estimate the covariance matrix of the coefficients (p x p).
    ///
    /// # Arguments
    /// * `x` - Design matrix used for the fit (n x p)
    /// * `fit` - Result of the least squares fit on `x`
    ///
    /// # Errors
    /// Returns `MathError` if `x` does not match the fit.
    fn estimate(&self, x: &Array2<f64>, fit: &OlsResult) -> Result<Array2<f64>, MathError>;
}

/// Classical OLS covariance `s² (X'X)⁺` with `s² = SSR / (n - rank)`.
///
/// Without residual degrees of freedom the variance is undefined and every
/// entry is NaN.
#[derive(Debug, Clone, Copy, Default)]
pub struct HomoskedasticCovariance;

impl CovarianceEstimator for HomoskedasticCovariance {
    fn name(&self) -> &'static str {
        "nonrobust"
    }

    fn estimate(&self, x: &Array2<f64>, fit: &OlsResult) -> Result<Array2<f64>, MathError> {
        check_dimensions(x, fit)?;

        if fit.df_resid == 0 {
            return Ok(Array2::from_elem(fit.xtx_pinv.dim(), f64::NAN));
        }
        let sigma2 = fit.ssr() / fit.df_resid as f64;
        Ok(&fit.xtx_pinv * sigma2)
    }
}

fn check_dimensions(x: &Array2<f64>, fit: &OlsResult) -> Result<(), MathError> {
    if x.nrows() != fit.residuals.len() {
        return Err(MathError::DimensionMismatch {
            expected: fit.residuals.len(),
            actual: x.nrows(),
        });
    }
    if x.ncols() != fit.xtx_pinv.nrows() {
        return Err(MathError::DimensionMismatch {
            expected: fit.xtx_pinv.nrows(),
            actual: x.ncols(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use ndarray::array;

    use super::*;
    use crate::ordinary_least_squares;

    #[test]
    fn homoskedastic_mean_only() {
        // regression on a constant: var(alpha) = s² / n
        let y = array![1.0, 2.0, 3.0, 4.0];
        let x = Array2::from_elem((4, 1), 1.0);
        let fit = ordinary_least_squares(&y, &x).unwrap();

        let cov = HomoskedasticCovariance.estimate(&x, &fit).unwrap();

        // s² = 5 / 3
        assert_relative_eq!(cov[[0, 0]], 5.0 / 3.0 / 4.0, epsilon = 1e-12);
    }

    #[test]
    fn homoskedastic_without_dof_is_nan() {
        let y = array![1.0, 2.0];
        let x = array![[1.0, 0.0], [1.0, 1.0]];
        let fit = ordinary_least_squares(&y, &x).unwrap();

        let cov = HomoskedasticCovariance.estimate(&x, &fit).unwrap();
        assert!(cov.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn dimension_check() {
        let y = array![1.0, 2.0, 3.0];
        let x = Array2::from_elem((3, 1), 1.0);
        let fit = ordinary_least_squares(&y, &x).unwrap();

        let wrong = Array2::from_elem((2, 1), 1.0);
        assert!(HomoskedasticCovariance.estimate(&wrong, &fit).is_err());
    }
}

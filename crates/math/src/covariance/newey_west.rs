//! Newey-West HAC (Heteroskedasticity and Autocorrelation Consistent) coefficient covariance.
//!
//! With scores `u_t = x_t * e_t` the estimator is
//! ```text
//! V = B S B
//! where:
//! - B   = (X'X)⁺
//! - S   = Γ_0 + Σ_{l=1}^{L} w_l * (Γ_l + Γ_l^T)
//! - Γ_l = Σ_{t=l}^{T-1} u_t u_{t-l}^T
//! - w_l = 1 - l/(L+1) (Bartlett kernel weights)
//! ```
//! Scores are not demeaned and, by default, no `T/(T-k)` small sample
//! correction is applied.
//!
//! # References
//! - Newey, W. K., & West, K. D. (1987). "A Simple, Positive Semi-Definite,
//!   Heteroskedasticity and Autocorrelation Consistent Covariance Matrix."
//!   Econometrica, 55(3), 703-708.

use ndarray::{Array2, ArrayView1};

use super::{CovarianceEstimator, check_dimensions};
use crate::{MathError, OlsResult};

/// Newey-West covariance configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NeweyWestConfig {
    /// Maximum lag L of the Bartlett kernel (default: 5).
    pub max_lags: usize,
    /// Scale by `T / (T - rank)` (default: false).
    pub small_sample_correction: bool,
}

impl Default for NeweyWestConfig {
    fn default() -> Self {
        Self { max_lags: 5, small_sample_correction: false }
    }
}

/// Newey-West HAC covariance estimator.
#[derive(Debug, Clone, Default)]
pub struct NeweyWestCovariance {
    config: NeweyWestConfig,
}

impl NeweyWestCovariance {
    /// Create a new estimator with the given configuration.
    #[must_use]
    pub const fn new(config: NeweyWestConfig) -> Self {
        Self { config }
    }

    /// Create an estimator with a fixed lag and no correction.
    #[must_use]
    pub const fn with_lags(max_lags: usize) -> Self {
        Self::new(NeweyWestConfig { max_lags, small_sample_correction: false })
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &NeweyWestConfig {
        &self.config
    }

    /// Number of lags actually used for `n_periods` observations.
    ///
    /// Lags beyond `n_periods - 1` have no overlapping pairs and are dropped.
    #[must_use]
    pub fn effective_lags(&self, n_periods: usize) -> usize {
        self.config.max_lags.min(n_periods.saturating_sub(1))
    }

    /// Long-run covariance `S` of the score matrix (T x k).
    #[must_use]
    pub fn long_run_covariance(&self, scores: &Array2<f64>) -> Array2<f64> {
        let (n_periods, k) = scores.dim();
        let max_lag = self.effective_lags(n_periods);

        let mut s = scores.t().dot(scores);

        for lag in 1..=max_lag {
            let weight = bartlett_weight(lag, self.config.max_lags);
            let gamma = lagged_cross_product(scores, lag);
            for i in 0..k {
                for j in 0..k {
                    s[[i, j]] += weight * (gamma[[i, j]] + gamma[[j, i]]);
                }
            }
        }

        s
    }
}

impl CovarianceEstimator for NeweyWestCovariance {
    fn name(&self) -> &'static str {
        "HAC"
    }

    fn estimate(&self, x: &Array2<f64>, fit: &OlsResult) -> Result<Array2<f64>, MathError> {
        check_dimensions(x, fit)?;

        let scores = score_matrix(x, fit.residuals.view());
        let meat = self.long_run_covariance(&scores);
        let mut cov = fit.xtx_pinv.dot(&meat).dot(&fit.xtx_pinv);

        if self.config.small_sample_correction {
            let n = fit.n_obs();
            if fit.df_resid == 0 {
                cov.fill(f64::NAN);
            } else {
                cov *= n as f64 / fit.df_resid as f64;
            }
        }

        Ok(cov)
    }
}

/// Bartlett kernel weight.
///
/// Formula: w_l = 1 - l/(L+1) for l = 0, ..., L, and zero beyond L.
#[must_use]
pub fn bartlett_weight(lag: usize, max_lag: usize) -> f64 {
    if lag <= max_lag { 1.0 - (lag as f64) / (max_lag as f64 + 1.0) } else { 0.0 }
}

/// Row-wise product of the design matrix with the residuals.
fn score_matrix(x: &Array2<f64>, residuals: ArrayView1<'_, f64>) -> Array2<f64> {
    let mut scores = x.clone();
    for (mut row, e) in scores.rows_mut().into_iter().zip(residuals.iter()) {
        row *= *e;
    }
    scores
}

/// Γ_l = Σ_{t=l}^{T-1} u_t u_{t-l}^T
fn lagged_cross_product(scores: &Array2<f64>, lag: usize) -> Array2<f64> {
    let (n_periods, k) = scores.dim();
    let mut gamma = Array2::<f64>::zeros((k, k));

    for t in lag..n_periods {
        for i in 0..k {
            for j in 0..k {
                gamma[[i, j]] += scores[[t, i]] * scores[[t - lag, j]];
            }
        }
    }

    gamma
}

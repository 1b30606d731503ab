//! Three-factor time-series regression.
//!
//! Fits `R_excess = alpha + b * MKT_RF + s * SMB + h * HML + e` by OLS on an
//! [`AlignedPanel`] and attaches standard errors from the configured
//! covariance estimator.

use famafrench_math::{
    CovarianceEstimator, HomoskedasticCovariance, NeweyWestConfig, NeweyWestCovariance,
    ReferenceDistribution, ordinary_least_squares,
};
use famafrench_primitives::AlignedPanel;
use ndarray::{Array1, Array2};
use tracing::{debug, warn};

use crate::ModelError;

/// Number of estimated parameters: the intercept plus three factor loadings.
pub const N_PARAMS: usize = 4;

/// A regression term, in design-matrix column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Term {
    /// Intercept.
    Alpha,
    /// Market loading.
    MktRf,
    /// Size loading.
    Smb,
    /// Value loading.
    Hml,
}

impl Term {
    /// All terms, in design-matrix column order.
    pub const ALL: [Self; N_PARAMS] = [Self::Alpha, Self::MktRf, Self::Smb, Self::Hml];

    /// Label of the term in regression output.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Alpha => "const",
            Self::MktRf => "MKT_RF",
            Self::Smb => "SMB",
            Self::Hml => "HML",
        }
    }
}

impl std::fmt::Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.label())
    }
}

/// How coefficient standard errors are computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CovarianceType {
    /// Classical homoskedastic OLS standard errors.
    NonRobust,
    /// Newey-West heteroskedasticity and autocorrelation consistent errors.
    Hac(NeweyWestConfig),
}

impl Default for CovarianceType {
    fn default() -> Self {
        Self::Hac(NeweyWestConfig::default())
    }
}

impl CovarianceType {
    fn estimator(&self) -> Box<dyn CovarianceEstimator> {
        match self {
            Self::NonRobust => Box::new(HomoskedasticCovariance),
            Self::Hac(config) => Box::new(NeweyWestCovariance::new(*config)),
        }
    }
}

/// Configuration for the three-factor regression.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegressionConfig {
    /// Covariance estimator for standard errors (default: HAC with 5 lags).
    pub covariance: CovarianceType,
    /// Reference distribution for p-values (default: normal).
    pub distribution: ReferenceDistribution,
}

/// Inference for a single regression term.
///
/// Standard error, t-statistic and p-value are `None` when the term is not
/// identified by the sample (for example a factor that is zero on every
/// date) or the covariance is undefined.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coefficient {
    /// Which term this is.
    pub term: Term,
    /// Point estimate.
    pub estimate: f64,
    /// Standard error.
    pub std_error: Option<f64>,
    /// Estimate divided by standard error.
    pub t_value: Option<f64>,
    /// Two-sided p-value.
    pub p_value: Option<f64>,
}

/// An estimated three-factor model.
#[derive(Debug, Clone)]
pub struct FittedModel {
    coefficients: [Coefficient; N_PARAMS],
    covariance: Array2<f64>,
    covariance_name: &'static str,
    fitted: Array1<f64>,
    residuals: Array1<f64>,
    r_squared: Option<f64>,
    adj_r_squared: Option<f64>,
    rank: usize,
    df_resid: usize,
}

impl FittedModel {
    /// All coefficients in term order.
    #[must_use]
    pub const fn coefficients(&self) -> &[Coefficient; N_PARAMS] {
        &self.coefficients
    }

    /// Coefficient of a single term.
    #[must_use]
    pub const fn coefficient(&self, term: Term) -> &Coefficient {
        &self.coefficients[term as usize]
    }

    /// Daily alpha.
    #[must_use]
    pub const fn alpha(&self) -> f64 {
        self.coefficients[0].estimate
    }

    /// Coefficient covariance matrix (4 x 4).
    #[must_use]
    pub const fn covariance(&self) -> &Array2<f64> {
        &self.covariance
    }

    /// Name of the covariance estimator, `"HAC"` or `"nonrobust"`.
    #[must_use]
    pub const fn covariance_name(&self) -> &'static str {
        self.covariance_name
    }

    /// Fitted excess returns.
    #[must_use]
    pub const fn fitted(&self) -> &Array1<f64> {
        &self.fitted
    }

    /// Residuals.
    #[must_use]
    pub const fn residuals(&self) -> &Array1<f64> {
        &self.residuals
    }

    /// R-squared, `None` when the excess return is constant.
    #[must_use]
    pub const fn r_squared(&self) -> Option<f64> {
        self.r_squared
    }

    /// Adjusted R-squared.
    #[must_use]
    pub const fn adj_r_squared(&self) -> Option<f64> {
        self.adj_r_squared
    }

    /// Number of observations used.
    #[must_use]
    pub fn n_obs(&self) -> usize {
        self.residuals.len()
    }

    /// Numerical rank of the design matrix.
    #[must_use]
    pub const fn rank(&self) -> usize {
        self.rank
    }

    /// Residual degrees of freedom.
    #[must_use]
    pub const fn df_resid(&self) -> usize {
        self.df_resid
    }
}

/// Three-factor regression estimator.
#[derive(Debug, Clone, Default)]
pub struct ThreeFactorRegression {
    config: RegressionConfig,
}

impl ThreeFactorRegression {
    /// Create a new estimator with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an estimator with the given configuration.
    #[must_use]
    pub const fn with_config(config: RegressionConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &RegressionConfig {
        &self.config
    }

    /// Fit the model on an aligned panel.
    ///
    /// # Errors
    /// Returns [`ModelError::InsufficientData`] if the panel has fewer rows
    /// than parameters, or a math error if the fit fails.
    pub fn fit(&self, panel: &AlignedPanel) -> Result<FittedModel, ModelError> {
        let n = panel.len();
        if n < N_PARAMS {
            return Err(ModelError::InsufficientData { required: N_PARAMS, actual: n });
        }

        let y = panel.excess_returns();
        let x = panel.design_matrix();

        let fit = ordinary_least_squares(&y, &x)?;
        if fit.rank < N_PARAMS {
            warn!(rank = fit.rank, "design matrix is rank deficient, using minimum-norm solution");
        }

        let estimator = self.config.covariance.estimator();
        let covariance = estimator.estimate(&x, &fit)?;

        let coefficients = Term::ALL.map(|term| {
            let i = term as usize;
            let estimate = fit.coefficients[i];
            let variance = covariance[[i, i]];
            let std_error = (fit.estimable[i] && variance.is_finite() && variance > 0.0)
                .then(|| variance.sqrt());
            let t_value = std_error.map(|se| estimate / se);
            let p_value = t_value.and_then(|t| {
                self.config.distribution.two_sided_p_value(t, fit.df_resid).ok()
            });
            Coefficient { term, estimate, std_error, t_value, p_value }
        });

        debug!(
            n_obs = n,
            covariance = estimator.name(),
            alpha = coefficients[0].estimate,
            r_squared = fit.r_squared,
            "fitted three-factor regression"
        );

        Ok(FittedModel {
            coefficients,
            covariance,
            covariance_name: estimator.name(),
            fitted: fit.fitted,
            residuals: fit.residuals,
            r_squared: fit.r_squared,
            adj_r_squared: fit.adj_r_squared,
            rank: fit.rank,
            df_resid: fit.df_resid,
        })
    }
}

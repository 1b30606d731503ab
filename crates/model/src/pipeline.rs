//! End-to-end estimation for one instrument.

use famafrench_primitives::{AlignedPanel, FactorPanel, PriceSeries, ReturnSeries};
use tracing::info;

use crate::{
    FittedModel, ModelError, RegressionConfig, SummaryRecord, TRADING_DAYS_PER_YEAR,
    ThreeFactorRegression, align_panel, simple_returns,
};

/// Configuration for a full three-factor run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ff3Config {
    /// Regression settings.
    pub regression: RegressionConfig,
    /// Trading days used to annualize alpha (default: 252).
    pub trading_days: u32,
}

impl Default for Ff3Config {
    fn default() -> Self {
        Self { regression: RegressionConfig::default(), trading_days: TRADING_DAYS_PER_YEAR }
    }
}

/// Everything produced by a run.
#[derive(Debug, Clone)]
pub struct Ff3Estimate {
    /// Asset simple returns.
    pub returns: ReturnSeries,
    /// Regression sample.
    pub panel: AlignedPanel,
    /// Fitted model.
    pub model: FittedModel,
    /// Flat report of the model.
    pub summary: SummaryRecord,
}

/// Prices and factors in, summary out.
#[derive(Debug, Clone, Default)]
pub struct Ff3Pipeline {
    config: Ff3Config,
}

impl Ff3Pipeline {
    /// Create a pipeline with the given configuration.
    #[must_use]
    pub const fn new(config: Ff3Config) -> Self {
        Self { config }
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &Ff3Config {
        &self.config
    }

    /// Compute returns, align them with the factors, fit and summarize.
    ///
    /// # Errors
    /// Returns [`ModelError::MissingFactor`] if a factor column is absent,
    /// [`ModelError::InsufficientData`] if fewer than four aligned rows
    /// remain, or any numerical error raised by the fit.
    pub fn run(
        &self,
        prices: &PriceSeries,
        factors: &FactorPanel,
    ) -> Result<Ff3Estimate, ModelError> {
        let returns = simple_returns(prices);
        let panel = align_panel(&returns, factors)?;
        info!(
            prices = prices.len(),
            returns = returns.len(),
            aligned = panel.len(),
            "prepared regression sample"
        );

        let model = ThreeFactorRegression::with_config(self.config.regression).fit(&panel)?;
        let summary = SummaryRecord::from_model(&model, self.config.trading_days);

        info!(
            alpha_daily = summary.alpha_daily,
            alpha_annualized = summary.alpha_annualized,
            r2 = summary.r2,
            n_obs = summary.n_obs,
            "three-factor fit complete"
        );

        Ok(Ff3Estimate { returns, panel, model, summary })
    }
}

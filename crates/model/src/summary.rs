//! Flat summary of a fitted three-factor model.

use serde::{Deserialize, Serialize};

use crate::{FittedModel, Term};

/// Trading days used to annualize daily alpha.
pub const TRADING_DAYS_PER_YEAR: u32 = 252;

/// Compound a daily alpha over `trading_days`: `(1 + alpha)^days - 1`.
#[must_use]
pub fn annualize_alpha(alpha_daily: f64, trading_days: u32) -> f64 {
    (1.0 + alpha_daily).powf(f64::from(trading_days)) - 1.0
}

/// One-row report of a fitted model.
///
/// Coefficient-derived statistics are `None` when the term could not be
/// estimated and serialize as empty cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRecord {
    /// Daily intercept.
    pub alpha_daily: f64,
    /// Compounded annual intercept.
    pub alpha_annualized: f64,
    /// Market loading.
    pub beta_mkt: f64,
    /// Size loading.
    pub beta_smb: f64,
    /// Value loading.
    pub beta_hml: f64,
    /// t-statistic of alpha.
    pub t_alpha: Option<f64>,
    /// t-statistic of the market loading.
    pub t_mkt: Option<f64>,
    /// t-statistic of the size loading.
    pub t_smb: Option<f64>,
    /// t-statistic of the value loading.
    pub t_hml: Option<f64>,
    /// p-value of alpha.
    pub p_alpha: Option<f64>,
    /// p-value of the market loading.
    pub p_mkt: Option<f64>,
    /// p-value of the size loading.
    pub p_smb: Option<f64>,
    /// p-value of the value loading.
    pub p_hml: Option<f64>,
    /// R-squared, `None` when the excess return is constant.
    pub r2: Option<f64>,
    /// Number of observations in the fit.
    pub n_obs: usize,
}

impl SummaryRecord {
    /// Summarize a fitted model, annualizing alpha over `trading_days`.
    #[must_use]
    pub fn from_model(model: &FittedModel, trading_days: u32) -> Self {
        let c = |term| model.coefficient(term);
        let alpha_daily = model.alpha();

        Self {
            alpha_daily,
            alpha_annualized: annualize_alpha(alpha_daily, trading_days),
            beta_mkt: c(Term::MktRf).estimate,
            beta_smb: c(Term::Smb).estimate,
            beta_hml: c(Term::Hml).estimate,
            t_alpha: c(Term::Alpha).t_value,
            t_mkt: c(Term::MktRf).t_value,
            t_smb: c(Term::Smb).t_value,
            t_hml: c(Term::Hml).t_value,
            p_alpha: c(Term::Alpha).p_value,
            p_mkt: c(Term::MktRf).p_value,
            p_smb: c(Term::Smb).p_value,
            p_hml: c(Term::Hml).p_value,
            r2: model.r_squared(),
            n_obs: model.n_obs(),
        }
    }

    /// Field names and values in column order, `None` for missing values.
    #[must_use]
    pub fn fields(&self) -> [(&'static str, Option<f64>); 15] {
        [
            ("alpha_daily", Some(self.alpha_daily)),
            ("alpha_annualized", Some(self.alpha_annualized)),
            ("beta_mkt", Some(self.beta_mkt)),
            ("beta_smb", Some(self.beta_smb)),
            ("beta_hml", Some(self.beta_hml)),
            ("t_alpha", self.t_alpha),
            ("t_mkt", self.t_mkt),
            ("t_smb", self.t_smb),
            ("t_hml", self.t_hml),
            ("p_alpha", self.p_alpha),
            ("p_mkt", self.p_mkt),
            ("p_smb", self.p_smb),
            ("p_hml", self.p_hml),
            ("r2", self.r2),
            ("n_obs", Some(self.n_obs as f64)),
        ]
    }
}

/// Two-line table: header row, then values with 6 decimals.
impl std::fmt::Display for SummaryRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cells: Vec<(&str, String)> = self
            .fields()
            .into_iter()
            .map(|(name, value)| {
                let text = match (name, value) {
                    ("n_obs", _) => self.n_obs.to_string(),
                    (_, Some(v)) => format!("{v:.6}"),
                    (_, None) => "NaN".to_string(),
                };
                (name, text)
            })
            .collect();

        let widths: Vec<usize> =
            cells.iter().map(|(name, text)| name.len().max(text.len())).collect();

        for (i, (name, _)) in cells.iter().enumerate() {
            if i > 0 {
                f.write_str("  ")?;
            }
            write!(f, "{name:>width$}", width = widths[i])?;
        }
        writeln!(f)?;
        for (i, (_, text)) in cells.iter().enumerate() {
            if i > 0 {
                f.write_str("  ")?;
            }
            write!(f, "{text:>width$}", width = widths[i])?;
        }
        Ok(())
    }
}

//! Error types for three-factor estimation.

use famafrench_math::MathError;
use famafrench_primitives::Factor;

/// Errors that can occur during three-factor model estimation.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// A factor column required by the model is absent.
    #[error("factor {0} missing in factor data")]
    MissingFactor(Factor),

    /// Too few aligned observations to fit the model.
    #[error("insufficient data: need at least {required} observations, got {actual}")]
    InsufficientData {
        /// Required number of observations.
        required: usize,
        /// Actual number of observations.
        actual: usize,
    },

    /// Math error.
    #[error("math error: {0}")]
    Math(#[from] MathError),

    /// Polars error.
    #[error("data processing error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),

    /// Missing required column.
    #[error("missing required column: {0}")]
    MissingColumn(String),

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ModelError {
    /// Returns whether a longer sample could make the estimation succeed.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::InsufficientData { .. })
    }
}

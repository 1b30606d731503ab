//! Error types for the regression numerics.

/// Errors raised by least squares, covariance and p-value computations.
#[derive(Debug, thiserror::Error)]
pub enum MathError {
    /// Operand shapes disagree.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimension.
        expected: usize,
        /// Actual dimension.
        actual: usize,
    },

    /// Matrix is not square.
    #[error("expected a square matrix, got {rows}x{cols}")]
    NotSquare {
        /// Row count.
        rows: usize,
        /// Column count.
        cols: usize,
    },

    /// The eigen-decomposition ran out of sweeps.
    #[error("eigen-decomposition did not converge in {sweeps} sweeps")]
    NoConvergence {
        /// Sweeps performed.
        sweeps: usize,
    },

    /// No observations or no regressors.
    #[error("empty data provided")]
    EmptyData,

    /// NaN or infinity where a finite value is required.
    #[error("non-finite value in {0}")]
    NonFinite(&'static str),

    /// Invalid distribution parameters.
    #[error("invalid distribution: {0}")]
    Distribution(String),
}

impl MathError {
    /// Whether the failure comes from the input data rather than the
    /// numerics; cleaning or extending the sample may fix it.
    #[must_use]
    pub const fn is_data_error(&self) -> bool {
        matches!(self, Self::EmptyData | Self::NonFinite(_))
    }
}

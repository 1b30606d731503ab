//! Data source trait definitions.

use std::path::PathBuf;

use famafrench_primitives::{DateRange, FactorPanel, PriceSeries, Symbol};

/// Errors that can occur while loading price or factor data.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Local file does not exist.
    #[error("{} not found", .0.display())]
    FileNotFound(PathBuf),

    /// File exists but could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Remote service failed (network, HTTP status, API error).
    #[error("remote source {source_name} failed: {reason}")]
    Remote {
        /// Name of the failing source.
        source_name: String,
        /// Failure description.
        reason: String,
    },

    /// Payload could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),

    /// A required column is missing from the payload.
    #[error("missing required column: {0}")]
    MissingColumn(String),

    /// Source returned no rows for the request.
    #[error("no data returned for {0}")]
    Empty(String),

    /// Neither the primary source nor its fallback could supply data.
    #[error("data unavailable: primary failed ({primary}); fallback failed ({fallback})")]
    Unavailable {
        /// Error of the primary source.
        primary: Box<SourceError>,
        /// Error of the fallback source.
        fallback: Box<SourceError>,
    },
}

impl SourceError {
    /// Returns whether another source may still succeed after this error.
    ///
    /// Only an exhausted fallback chain is final.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Unavailable { .. })
    }
}

/// A provider of daily adjusted closing prices.
pub trait PriceSource {
    /// Short name used in log messages.
    fn name(&self) -> &str;

    /// Fetch adjusted closes for `symbol` over `range`.
    ///
    /// # Errors
    /// Returns `SourceError` if the data cannot be retrieved or parsed.
    fn fetch_prices(&self, symbol: &Symbol, range: &DateRange)
    -> Result<PriceSeries, SourceError>;
}

/// A provider of daily Fama-French factor returns, in decimals.
pub trait FactorSource {
    /// Short name used in log messages.
    fn name(&self) -> &str;

    /// Fetch the factor panel over `range`.
    ///
    /// # Errors
    /// Returns `SourceError` if the data cannot be retrieved or parsed.
    fn fetch_factors(&self, range: &DateRange) -> Result<FactorPanel, SourceError>;
}

impl<T: PriceSource + ?Sized> PriceSource for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn fetch_prices(
        &self,
        symbol: &Symbol,
        range: &DateRange,
    ) -> Result<PriceSeries, SourceError> {
        (**self).fetch_prices(symbol, range)
    }
}

impl<T: FactorSource + ?Sized> FactorSource for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn fetch_factors(&self, range: &DateRange) -> Result<FactorPanel, SourceError> {
        (**self).fetch_factors(range)
    }
}

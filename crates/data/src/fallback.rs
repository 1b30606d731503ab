//! Primary-then-secondary source chaining.

use famafrench_primitives::{DateRange, FactorPanel, PriceSeries, Symbol};
use famafrench_traits::{FactorSource, PriceSource, SourceError};
use tracing::warn;

/// Tries `primary` first and `fallback` when it fails.
///
/// A primary failure is logged as a warning. When both fail the result is
/// [`SourceError::Unavailable`] carrying both causes.
#[derive(Debug, Clone)]
pub struct Fallback<P, S> {
    primary: P,
    fallback: S,
}

impl<P, S> Fallback<P, S> {
    /// Chain two sources.
    pub const fn new(primary: P, fallback: S) -> Self {
        Self { primary, fallback }
    }

    /// The source tried first.
    pub const fn primary(&self) -> &P {
        &self.primary
    }

    /// The source tried after a primary failure.
    pub const fn fallback(&self) -> &S {
        &self.fallback
    }
}

fn recover<T>(
    primary_name: &str,
    fallback_name: &str,
    primary: Result<T, SourceError>,
    fallback: impl FnOnce() -> Result<T, SourceError>,
) -> Result<T, SourceError> {
    match primary {
        Ok(value) => Ok(value),
        Err(primary_err) => {
            warn!(
                source = primary_name,
                error = %primary_err,
                "falling back to {fallback_name}"
            );
            fallback().map_err(|fallback_err| SourceError::Unavailable {
                primary: Box::new(primary_err),
                fallback: Box::new(fallback_err),
            })
        }
    }
}

impl<P: PriceSource, S: PriceSource> PriceSource for Fallback<P, S> {
    fn name(&self) -> &str {
        self.primary.name()
    }

    fn fetch_prices(
        &self,
        symbol: &Symbol,
        range: &DateRange,
    ) -> Result<PriceSeries, SourceError> {
        recover(
            self.primary.name(),
            self.fallback.name(),
            self.primary.fetch_prices(symbol, range),
            || self.fallback.fetch_prices(symbol, range),
        )
    }
}

impl<P: FactorSource, S: FactorSource> FactorSource for Fallback<P, S> {
    fn name(&self) -> &str {
        self.primary.name()
    }

    fn fetch_factors(&self, range: &DateRange) -> Result<FactorPanel, SourceError> {
        recover(
            self.primary.name(),
            self.fallback.name(),
            self.primary.fetch_factors(range),
            || self.fallback.fetch_factors(range),
        )
    }
}

//! Daily adjusted closes from Yahoo Finance.

use chrono::{DateTime, NaiveTime};
use famafrench_primitives::{Date, DateRange, PriceSeries, Symbol};
use famafrench_traits::{PriceSource, SourceError};
use time::OffsetDateTime;
use tracing::{debug, info};
use yahoo_finance_api as yahoo;

use crate::runtime::BlockingRuntime;

const SOURCE_NAME: &str = "Yahoo Finance";

/// Yahoo Finance price provider.
///
/// The end of the requested range is exclusive, matching the upstream API.
pub struct YahooPriceSource {
    provider: yahoo::YahooConnector,
    runtime: BlockingRuntime,
}

impl std::fmt::Debug for YahooPriceSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YahooPriceSource").finish_non_exhaustive()
    }
}

fn remote(e: impl std::fmt::Display) -> SourceError {
    SourceError::Remote { source_name: SOURCE_NAME.to_string(), reason: e.to_string() }
}

fn to_offset_date_time(date: Date) -> Result<OffsetDateTime, SourceError> {
    let timestamp = date.and_time(NaiveTime::MIN).and_utc().timestamp();
    OffsetDateTime::from_unix_timestamp(timestamp)
        .map_err(|e| SourceError::Parse(format!("time conversion failed for {date}: {e}")))
}

fn to_date(timestamp: i64) -> Result<Date, SourceError> {
    DateTime::from_timestamp(timestamp, 0)
        .map(|dt| dt.date_naive())
        .ok_or_else(|| SourceError::Parse(format!("invalid quote timestamp {timestamp}")))
}

impl YahooPriceSource {
    /// Create a new Yahoo Finance price source.
    ///
    /// # Errors
    /// Returns [`SourceError::Remote`] if the connector or runtime cannot be
    /// created.
    pub fn new() -> Result<Self, SourceError> {
        Ok(Self {
            provider: yahoo::YahooConnector::new().map_err(remote)?,
            runtime: BlockingRuntime::new(SOURCE_NAME)?,
        })
    }
}

impl PriceSource for YahooPriceSource {
    fn name(&self) -> &str {
        SOURCE_NAME
    }

    fn fetch_prices(
        &self,
        symbol: &Symbol,
        range: &DateRange,
    ) -> Result<PriceSeries, SourceError> {
        if range.is_empty() {
            return Err(SourceError::Parse(format!("invalid date range {range}")));
        }

        let start = to_offset_date_time(range.start)?;
        let end = to_offset_date_time(range.end)?;

        info!(%symbol, %range, "fetching prices from Yahoo Finance");
        let response = self
            .runtime
            .block_on(self.provider.get_quote_history(symbol.as_str(), start, end))
            .map_err(remote)?;
        let quotes = response.quotes().map_err(remote)?;

        let mut observations = Vec::with_capacity(quotes.len());
        for quote in &quotes {
            let timestamp = i64::try_from(quote.timestamp)
                .map_err(|e| SourceError::Parse(format!("quote timestamp out of range: {e}")))?;
            let date = to_date(timestamp)?;
            if quote.adjclose.is_finite() && date >= range.start && date < range.end {
                observations.push((date, quote.adjclose));
            }
        }

        if observations.is_empty() {
            return Err(SourceError::Empty(symbol.to_string()));
        }

        debug!(%symbol, quotes = observations.len(), "received quotes");
        Ok(PriceSeries::from_observations(observations))
    }
}

//! Offline CSV copies of price and factor data.

use std::{
    fs::File,
    path::{Path, PathBuf},
};

use famafrench_primitives::{Date, DateRange, Factor, FactorPanel, PriceSeries, Symbol};
use famafrench_traits::{FactorSource, PriceSource, SourceError};
use tracing::debug;

/// Default price file, relative to the data directory.
pub const DEFAULT_PRICE_FILE: &str = "asset_prices.csv";

/// Default factor file, relative to the data directory.
pub const DEFAULT_FACTOR_FILE: &str = "ff_factors.csv";

const DATE_HEADER: &str = "Date";
const ADJ_CLOSE_HEADER: &str = "Adj Close";

/// Parse a `YYYY-MM-DD` date, tolerating a trailing time component.
///
/// # Errors
/// Returns [`SourceError::Parse`] if no date can be read.
pub fn parse_date(value: &str) -> Result<Date, SourceError> {
    let value = value.trim();
    Date::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| Date::parse_from_str(value.get(..10).unwrap_or(value), "%Y-%m-%d"))
        .map_err(|e| SourceError::Parse(format!("invalid date {value:?}: {e}")))
}

fn parse_cell(value: &str, column: &str) -> Result<Option<f64>, SourceError> {
    let value = value.trim();
    if value.is_empty() || value.eq_ignore_ascii_case("nan") {
        return Ok(None);
    }
    value
        .parse::<f64>()
        .map(Some)
        .map_err(|e| SourceError::Parse(format!("invalid {column} value {value:?}: {e}")))
}

fn open_reader(path: &Path) -> Result<csv::Reader<File>, SourceError> {
    if !path.exists() {
        return Err(SourceError::FileNotFound(path.to_path_buf()));
    }
    let file =
        File::open(path).map_err(|source| SourceError::Io { path: path.to_path_buf(), source })?;
    Ok(csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(file))
}

fn header_index(headers: &csv::StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h == name)
}

fn csv_error(path: &Path, e: csv::Error) -> SourceError {
    SourceError::Parse(format!("{}: {e}", path.display()))
}

/// Adjusted closes from a CSV with `Date` and `Adj Close` columns.
///
/// The file holds a single instrument, so the requested symbol is only used
/// in messages. Rows with an empty `Adj Close` are dropped.
#[derive(Debug, Clone)]
pub struct LocalPriceCsv {
    path: PathBuf,
}

impl LocalPriceCsv {
    /// Read prices from `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read `asset_prices.csv` inside `data_dir`.
    pub fn in_dir(data_dir: impl AsRef<Path>) -> Self {
        Self::new(data_dir.as_ref().join(DEFAULT_PRICE_FILE))
    }

    /// Location of the CSV file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PriceSource for LocalPriceCsv {
    fn name(&self) -> &str {
        "local prices"
    }

    fn fetch_prices(
        &self,
        symbol: &Symbol,
        range: &DateRange,
    ) -> Result<PriceSeries, SourceError> {
        let mut reader = open_reader(&self.path)?;
        let headers = reader.headers().map_err(|e| csv_error(&self.path, e))?.clone();
        let date_idx = header_index(&headers, DATE_HEADER)
            .ok_or_else(|| SourceError::MissingColumn(DATE_HEADER.to_string()))?;
        let price_idx = header_index(&headers, ADJ_CLOSE_HEADER)
            .ok_or_else(|| SourceError::MissingColumn(ADJ_CLOSE_HEADER.to_string()))?;

        let mut observations = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| csv_error(&self.path, e))?;
            let date = parse_date(record.get(date_idx).unwrap_or_default())?;
            let price = parse_cell(record.get(price_idx).unwrap_or_default(), ADJ_CLOSE_HEADER)?;
            if let Some(price) = price.filter(|_| range.contains(date)) {
                observations.push((date, price));
            }
        }

        if observations.is_empty() {
            return Err(SourceError::Empty(format!("{symbol} in {}", self.path.display())));
        }

        debug!(path = %self.path.display(), rows = observations.len(), "loaded local prices");
        Ok(PriceSeries::from_observations(observations))
    }
}

/// Daily factors from a CSV with `Date, Mkt-RF, SMB, HML, RF` columns.
///
/// Values are taken as decimals. A factor whose column is absent is simply
/// absent from the returned panel; empty cells become missing values.
#[derive(Debug, Clone)]
pub struct LocalFactorCsv {
    path: PathBuf,
}

impl LocalFactorCsv {
    /// Read factors from `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read `ff_factors.csv` inside `data_dir`.
    pub fn in_dir(data_dir: impl AsRef<Path>) -> Self {
        Self::new(data_dir.as_ref().join(DEFAULT_FACTOR_FILE))
    }

    /// Location of the CSV file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FactorSource for LocalFactorCsv {
    fn name(&self) -> &str {
        "local factors"
    }

    fn fetch_factors(&self, range: &DateRange) -> Result<FactorPanel, SourceError> {
        let mut reader = open_reader(&self.path)?;
        let headers = reader.headers().map_err(|e| csv_error(&self.path, e))?.clone();
        let date_idx = header_index(&headers, DATE_HEADER)
            .ok_or_else(|| SourceError::MissingColumn(DATE_HEADER.to_string()))?;
        let factor_idx: Vec<(Factor, usize)> = Factor::ALL
            .into_iter()
            .filter_map(|f| {
                headers.iter().position(|h| Factor::from_header(h) == Some(f)).map(|i| (f, i))
            })
            .collect();

        let mut dates = Vec::new();
        let mut columns: Vec<Vec<Option<f64>>> = vec![Vec::new(); factor_idx.len()];
        for record in reader.records() {
            let record = record.map_err(|e| csv_error(&self.path, e))?;
            let date = parse_date(record.get(date_idx).unwrap_or_default())?;
            if !range.contains(date) {
                continue;
            }
            dates.push(date);
            for ((factor, idx), column) in factor_idx.iter().zip(columns.iter_mut()) {
                column.push(parse_cell(
                    record.get(*idx).unwrap_or_default(),
                    factor.source_label(),
                )?);
            }
        }

        if dates.is_empty() {
            return Err(SourceError::Empty(format!("factors in {}", self.path.display())));
        }

        debug!(
            path = %self.path.display(),
            rows = dates.len(),
            factors = factor_idx.len(),
            "loaded local factors"
        );

        Ok(factor_idx
            .into_iter()
            .zip(columns)
            .fold(FactorPanel::new(dates), |panel, ((factor, _), values)| {
                panel.with_column(factor, values)
            }))
    }
}

//! Daily three-factor data from the Kenneth R. French data library.

use std::io::{Cursor, Read};

use famafrench_primitives::{Date, DateRange, Factor, FactorPanel};
use famafrench_traits::{FactorSource, SourceError};
use tracing::{debug, info};

use crate::runtime::BlockingRuntime;

/// Zipped CSV of daily `Mkt-RF`, `SMB`, `HML` and `RF`, in percent.
pub const FRENCH_FACTORS_URL: &str = "https://mba.tuck.dartmouth.edu/pages/faculty/ken.french/ftp/F-F_Research_Data_Factors_daily_CSV.zip";

const SOURCE_NAME: &str = "Ken French data library";

/// Parse the daily factor CSV shipped inside the library's zip file.
///
/// The file starts with free-text notes, then a header row whose first cell
/// is empty (`,Mkt-RF,SMB,HML,RF`), then rows keyed by `YYYYMMDD`. Parsing
/// stops at the first non-date row after the data starts, which skips the
/// copyright trailer. Values are divided by 100 and only rows inside `range`
/// are kept.
///
/// # Errors
/// Returns [`SourceError::Parse`] if the header is missing or a value is
/// malformed, and [`SourceError::Empty`] if no row falls inside `range`.
pub fn parse_french_factors(text: &str, range: &DateRange) -> Result<FactorPanel, SourceError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut layout: Option<Vec<(Factor, usize)>> = None;
    let mut dates = Vec::new();
    let mut columns: Vec<Vec<Option<f64>>> = Vec::new();
    let mut seen_rows = false;

    for record in reader.records() {
        let record = record.map_err(|e| SourceError::Parse(e.to_string()))?;
        let first = record.get(0).unwrap_or_default();

        let Some(layout) = layout.as_ref() else {
            if first.is_empty() && record.iter().any(|c| c == Factor::MktRf.source_label()) {
                let found: Vec<(Factor, usize)> = record
                    .iter()
                    .enumerate()
                    .filter_map(|(i, h)| Factor::from_header(h).map(|f| (f, i)))
                    .collect();
                columns = vec![Vec::new(); found.len()];
                layout = Some(found);
            }
            continue;
        };

        let Some(date) = parse_compact_date(first) else {
            if seen_rows {
                break;
            }
            continue;
        };
        seen_rows = true;

        if !range.contains(date) {
            continue;
        }
        dates.push(date);
        for ((factor, idx), column) in layout.iter().zip(columns.iter_mut()) {
            let cell = record.get(*idx).unwrap_or_default();
            let value = if cell.is_empty() {
                None
            } else {
                let pct = cell.parse::<f64>().map_err(|e| {
                    SourceError::Parse(format!("invalid {factor} value {cell:?} on {date}: {e}"))
                })?;
                Some(pct / 100.0)
            };
            column.push(value);
        }
    }

    let Some(layout) = layout else {
        return Err(SourceError::Parse("factor header row not found".to_string()));
    };
    if dates.is_empty() {
        return Err(SourceError::Empty(format!("factors in {range}")));
    }

    Ok(layout
        .into_iter()
        .zip(columns)
        .fold(FactorPanel::new(dates), |panel, ((factor, _), values)| {
            panel.with_column(factor, values)
        }))
}

fn parse_compact_date(value: &str) -> Option<Date> {
    if value.len() != 8 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Date::parse_from_str(value, "%Y%m%d").ok()
}

/// Downloads the daily factor file on every fetch.
#[derive(Debug)]
pub struct FrenchFactorSource {
    client: reqwest::Client,
    url: String,
    runtime: BlockingRuntime,
}

impl FrenchFactorSource {
    /// Create a source for the library's public URL.
    ///
    /// # Errors
    /// Returns [`SourceError::Remote`] if the HTTP client or runtime cannot
    /// be created.
    pub fn new() -> Result<Self, SourceError> {
        Self::with_url(FRENCH_FACTORS_URL)
    }

    /// Create a source for a mirror of the zip file.
    ///
    /// # Errors
    /// Returns [`SourceError::Remote`] if the HTTP client or runtime cannot
    /// be created.
    pub fn with_url(url: impl Into<String>) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("famafrench-rs/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(remote)?;
        Ok(Self { client, url: url.into(), runtime: BlockingRuntime::new(SOURCE_NAME)? })
    }

    async fn download(&self) -> Result<Vec<u8>, reqwest::Error> {
        let response = self.client.get(&self.url).send().await?.error_for_status()?;
        Ok(response.bytes().await?.to_vec())
    }
}

fn remote(e: impl std::fmt::Display) -> SourceError {
    SourceError::Remote { source_name: SOURCE_NAME.to_string(), reason: e.to_string() }
}

/// Text of the first entry in a zip archive.
fn unzip_first(bytes: Vec<u8>) -> Result<String, SourceError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).map_err(remote)?;
    let mut entry = archive.by_index(0).map_err(remote)?;
    let mut text = String::new();
    entry
        .read_to_string(&mut text)
        .map_err(|e| SourceError::Parse(format!("{}: {e}", entry.name())))?;
    Ok(text)
}

impl FactorSource for FrenchFactorSource {
    fn name(&self) -> &str {
        SOURCE_NAME
    }

    fn fetch_factors(&self, range: &DateRange) -> Result<FactorPanel, SourceError> {
        info!(url = %self.url, "downloading Fama-French daily factors");
        let bytes = self.runtime.block_on(self.download()).map_err(remote)?;
        debug!(bytes = bytes.len(), "downloaded factor archive");

        let text = unzip_first(bytes)?;
        parse_french_factors(&text, range)
    }
}

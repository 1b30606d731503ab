//! CSV reports of a three-factor run.

use std::{
    fs::{self, File},
    path::{Path, PathBuf},
};

use famafrench_model::{Ff3Estimate, SummaryRecord};
use famafrench_primitives::{AlignedPanel, Symbol};
use thiserror::Error;
use tracing::info;

/// Errors that can occur while writing reports.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV serialization error.
    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),

    /// IO error.
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        /// Path being written.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

/// Files written for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPaths {
    /// One-row summary table.
    pub summary: PathBuf,
    /// The aligned regression sample.
    pub merged: PathBuf,
}

/// Writes `ff3_summary_{SYMBOL}.csv` and `ff3_merged_{SYMBOL}.csv`.
#[derive(Debug, Clone)]
pub struct ReportWriter {
    output_dir: PathBuf,
}

impl ReportWriter {
    /// Write into `output_dir`, created on first write.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self { output_dir: output_dir.into() }
    }

    /// Target directory.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Path of the summary file for `symbol`.
    #[must_use]
    pub fn summary_path(&self, symbol: &Symbol) -> PathBuf {
        self.output_dir.join(format!("ff3_summary_{symbol}.csv"))
    }

    /// Path of the merged sample file for `symbol`.
    #[must_use]
    pub fn merged_path(&self, symbol: &Symbol) -> PathBuf {
        self.output_dir.join(format!("ff3_merged_{symbol}.csv"))
    }

    /// Write both reports for a completed run.
    ///
    /// # Errors
    /// Returns `ExportError` if the directory or either file cannot be written.
    pub fn write(&self, symbol: &Symbol, estimate: &Ff3Estimate) -> Result<ReportPaths, ExportError> {
        Ok(ReportPaths {
            summary: self.write_summary(symbol, &estimate.summary)?,
            merged: self.write_merged(symbol, &estimate.panel)?,
        })
    }

    /// Write the one-row summary. Missing statistics become empty cells.
    ///
    /// # Errors
    /// Returns `ExportError` if the file cannot be written.
    pub fn write_summary(
        &self,
        symbol: &Symbol,
        summary: &SummaryRecord,
    ) -> Result<PathBuf, ExportError> {
        let path = self.summary_path(symbol);
        let mut wtr = self.writer(&path)?;
        wtr.serialize(summary)?;
        wtr.flush().map_err(|source| ExportError::Io { path: path.clone(), source })?;
        info!(path = %path.display(), "saved summary");
        Ok(path)
    }

    /// Write the aligned sample, one row per date.
    ///
    /// # Errors
    /// Returns `ExportError` if the file cannot be written.
    pub fn write_merged(
        &self,
        symbol: &Symbol,
        panel: &AlignedPanel,
    ) -> Result<PathBuf, ExportError> {
        let path = self.merged_path(symbol);
        let mut wtr = self.writer(&path)?;
        for row in panel.rows() {
            wtr.serialize(row)?;
        }
        wtr.flush().map_err(|source| ExportError::Io { path: path.clone(), source })?;
        info!(path = %path.display(), rows = panel.len(), "saved dataset");
        Ok(path)
    }

    fn writer(&self, path: &Path) -> Result<csv::Writer<File>, ExportError> {
        fs::create_dir_all(&self.output_dir)
            .map_err(|source| ExportError::Io { path: self.output_dir.clone(), source })?;
        let file = File::create(path)
            .map_err(|source| ExportError::Io { path: path.to_path_buf(), source })?;
        Ok(csv::Writer::from_writer(file))
    }
}

//! Factor-related type definitions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::Date;

/// One of the columns of the Fama-French three-factor data set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Factor {
    /// Market excess return.
    MktRf,
    /// Size premium (small minus big).
    Smb,
    /// Value premium (high minus low).
    Hml,
    /// Risk-free rate.
    Rf,
}

impl Factor {
    /// All factor columns, in canonical order.
    pub const ALL: [Self; 4] = [Self::MktRf, Self::Smb, Self::Hml, Self::Rf];

    /// The three priced factors used as regressors.
    pub const REGRESSORS: [Self; 3] = [Self::MktRf, Self::Smb, Self::Hml];

    /// Canonical column name used inside the workspace.
    #[must_use]
    pub const fn column_name(&self) -> &'static str {
        match self {
            Self::MktRf => "MKT_RF",
            Self::Smb => "SMB",
            Self::Hml => "HML",
            Self::Rf => "RF",
        }
    }

    /// Column header used by the Kenneth French data library files.
    #[must_use]
    pub const fn source_label(&self) -> &'static str {
        match self {
            Self::MktRf => "Mkt-RF",
            Self::Smb => "SMB",
            Self::Hml => "HML",
            Self::Rf => "RF",
        }
    }

    /// Look up a factor by either its canonical or its source header.
    #[must_use]
    pub fn from_header(header: &str) -> Option<Self> {
        let header = header.trim();
        Self::ALL
            .into_iter()
            .find(|f| f.column_name() == header || f.source_label() == header)
    }
}

impl std::fmt::Display for Factor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.column_name())
    }
}

/// Date-indexed table of daily factor returns, in decimals.
///
/// Columns are optional so that a source which does not carry a factor can
/// still be represented; cells are optional so that missing observations
/// survive until alignment drops them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FactorPanel {
    dates: Vec<Date>,
    columns: BTreeMap<Factor, Vec<Option<f64>>>,
}

impl FactorPanel {
    /// Create an empty panel over the given dates.
    #[must_use]
    pub const fn new(dates: Vec<Date>) -> Self {
        Self { dates, columns: BTreeMap::new() }
    }

    /// Attach a factor column. Replaces any existing column for `factor`.
    #[must_use]
    pub fn with_column(mut self, factor: Factor, values: Vec<Option<f64>>) -> Self {
        debug_assert_eq!(values.len(), self.dates.len());
        self.columns.insert(factor, values);
        self
    }

    /// Attach a fully observed factor column.
    #[must_use]
    pub fn with_values(self, factor: Factor, values: Vec<f64>) -> Self {
        self.with_column(factor, values.into_iter().map(Some).collect())
    }

    /// Dates of the panel.
    #[must_use]
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Values of a factor column, if present.
    #[must_use]
    pub fn column(&self, factor: Factor) -> Option<&[Option<f64>]> {
        self.columns.get(&factor).map(Vec::as_slice)
    }

    /// Whether the panel carries a column for `factor`.
    #[must_use]
    pub fn has(&self, factor: Factor) -> bool {
        self.columns.contains_key(&factor)
    }

    /// Factors present in the panel, in canonical order.
    #[must_use]
    pub fn factors(&self) -> Vec<Factor> {
        self.columns.keys().copied().collect()
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Check if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Get the value of `factor` on `date`.
    #[must_use]
    pub fn get(&self, date: Date, factor: Factor) -> Option<f64> {
        let idx = self.dates.iter().position(|d| *d == date)?;
        self.columns.get(&factor).and_then(|c| c.get(idx).copied().flatten())
    }

    /// Whether any date appears more than once.
    #[must_use]
    pub fn has_duplicate_dates(&self) -> bool {
        let mut seen = std::collections::BTreeSet::new();
        !self.dates.iter().all(|d| seen.insert(*d))
    }

    /// Copy of the panel with one row per date, sorted by date. The last
    /// row for a repeated date wins.
    #[must_use]
    pub fn deduplicated(&self) -> Self {
        let last: BTreeMap<Date, usize> =
            self.dates.iter().enumerate().map(|(i, d)| (*d, i)).collect();
        let rows: Vec<usize> = last.values().copied().collect();

        let columns = self
            .columns
            .iter()
            .map(|(factor, values)| {
                let kept = rows.iter().map(|&i| values.get(i).copied().flatten()).collect();
                (*factor, kept)
            })
            .collect();

        Self { dates: last.into_keys().collect(), columns }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factor_headers() {
        assert_eq!(Factor::from_header("Mkt-RF"), Some(Factor::MktRf));
        assert_eq!(Factor::from_header("MKT_RF"), Some(Factor::MktRf));
        assert_eq!(Factor::from_header(" RF "), Some(Factor::Rf));
        assert_eq!(Factor::from_header("UMD"), None);
        assert_eq!(Factor::Hml.to_string(), "HML");
    }

    #[test]
    fn factor_panel_columns() {
        let d1 = Date::from_ymd_opt(2024, 1, 2).unwrap();
        let d2 = Date::from_ymd_opt(2024, 1, 3).unwrap();
        let panel = FactorPanel::new(vec![d1, d2])
            .with_values(Factor::MktRf, vec![0.01, -0.02])
            .with_column(Factor::Rf, vec![Some(0.0001), None]);

        assert_eq!(panel.len(), 2);
        assert!(panel.has(Factor::MktRf));
        assert!(!panel.has(Factor::Smb));
        assert_eq!(panel.factors(), vec![Factor::MktRf, Factor::Rf]);
        assert_eq!(panel.get(d2, Factor::MktRf), Some(-0.02));
        assert_eq!(panel.get(d2, Factor::Rf), None);
        assert_eq!(panel.get(d1, Factor::Hml), None);
        assert!(!panel.has_duplicate_dates());
    }

    #[test]
    fn short_column_reads_as_missing() {
        let d1 = Date::from_ymd_opt(2024, 1, 2).unwrap();
        let d2 = Date::from_ymd_opt(2024, 1, 3).unwrap();
        let panel = FactorPanel {
            dates: vec![d1, d2],
            columns: BTreeMap::from([(Factor::Rf, vec![Some(0.0001)])]),
        };

        assert_eq!(panel.get(d1, Factor::Rf), Some(0.0001));
        assert_eq!(panel.get(d2, Factor::Rf), None);
    }

    #[test]
    fn deduplicated_keeps_last_row() {
        let d = |day| Date::from_ymd_opt(2024, 1, day).unwrap();
        let panel = FactorPanel::new(vec![d(2), d(4), d(3), d(4)])
            .with_values(Factor::MktRf, vec![0.01, 0.02, 0.03, 0.04])
            .with_column(Factor::Rf, vec![Some(0.1), Some(0.2), None, None]);
        assert!(panel.has_duplicate_dates());

        let unique = panel.deduplicated();

        assert!(!unique.has_duplicate_dates());
        assert_eq!(unique.dates(), &[d(2), d(3), d(4)]);
        assert_eq!(unique.column(Factor::MktRf), Some(&[Some(0.01), Some(0.03), Some(0.04)][..]));
        assert_eq!(unique.column(Factor::Rf), Some(&[Some(0.1), None, None][..]));
    }
}

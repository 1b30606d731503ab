//! Instrument and date range definitions.

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::Date;

/// Stock ticker symbol.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub struct Symbol(pub String);

impl Symbol {
    /// Create a new symbol, normalized to upper case.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into().trim().to_uppercase())
    }

    /// Get the symbol as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Symbol {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// Calendar range requested from a data source.
///
/// Both bounds are inclusive; sources whose upstream API treats the end
/// as exclusive document that themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[display("{start}..={end}")]
pub struct DateRange {
    /// First date of the range.
    pub start: Date,
    /// Last date of the range.
    pub end: Date,
}

impl DateRange {
    /// Create a new date range.
    #[must_use]
    pub const fn new(start: Date, end: Date) -> Self {
        Self { start, end }
    }

    /// Whether `date` falls inside the range.
    #[must_use]
    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }

    /// Whether the range is empty (start after end).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbol_normalized() {
        let sym: Symbol = " aapl ".into();
        assert_eq!(sym.as_str(), "AAPL");
        assert_eq!(sym.to_string(), "AAPL");
    }

    #[test]
    fn date_range_contains_bounds() {
        let start = Date::from_ymd_opt(2024, 1, 1).unwrap();
        let end = Date::from_ymd_opt(2024, 1, 31).unwrap();
        let range = DateRange::new(start, end);

        assert!(range.contains(start));
        assert!(range.contains(end));
        assert!(!range.contains(Date::from_ymd_opt(2024, 2, 1).unwrap()));
        assert!(!range.is_empty());
        assert_eq!(range.to_string(), "2024-01-01..=2024-01-31");
    }

    #[test]
    fn date_range_empty() {
        let range = DateRange::new(
            Date::from_ymd_opt(2024, 2, 1).unwrap(),
            Date::from_ymd_opt(2024, 1, 1).unwrap(),
        );
        assert!(range.is_empty());
    }
}

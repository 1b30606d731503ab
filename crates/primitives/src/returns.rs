//! Price and return series definitions.

use ndarray::Array1;

use crate::Date;

/// Adjusted closing prices for one instrument, indexed by date.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    /// Observation dates, strictly increasing.
    pub dates: Vec<Date>,
    /// Adjusted closing prices.
    pub prices: Array1<f64>,
}

impl PriceSeries {
    /// Create a new price series from dates already in increasing order.
    #[must_use]
    pub fn new(dates: Vec<Date>, prices: Array1<f64>) -> Self {
        debug_assert_eq!(dates.len(), prices.len());
        debug_assert!(dates.windows(2).all(|w| w[0] < w[1]));
        Self { dates, prices }
    }

    /// Build a series from unordered observations.
    ///
    /// Observations are sorted by date; when a date repeats, the last
    /// observation for it wins.
    #[must_use]
    pub fn from_observations(mut observations: Vec<(Date, f64)>) -> Self {
        // stable sort keeps input order within a date
        observations.sort_by_key(|(date, _)| *date);

        let mut dates: Vec<Date> = Vec::with_capacity(observations.len());
        let mut prices: Vec<f64> = Vec::with_capacity(observations.len());
        for (date, price) in observations {
            if dates.last() == Some(&date) {
                if let Some(last) = prices.last_mut() {
                    *last = price;
                }
            } else {
                dates.push(date);
                prices.push(price);
            }
        }

        Self { dates, prices: Array1::from_vec(prices) }
    }

    /// Number of observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Check if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Get the price on a specific date.
    #[must_use]
    pub fn get(&self, date: Date) -> Option<f64> {
        self.dates.binary_search(&date).ok().map(|i| self.prices[i])
    }
}

/// Simple returns for one instrument, indexed by date.
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnSeries {
    /// Dates of the returns (the later date of each price pair).
    pub dates: Vec<Date>,
    /// Return values.
    pub returns: Array1<f64>,
}

impl ReturnSeries {
    /// Create new returns.
    #[must_use]
    pub fn new(dates: Vec<Date>, returns: Array1<f64>) -> Self {
        debug_assert_eq!(dates.len(), returns.len());
        Self { dates, returns }
    }

    /// Series with no observations.
    #[must_use]
    pub fn empty() -> Self {
        Self { dates: Vec::new(), returns: Array1::zeros(0) }
    }

    /// Number of returns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Check if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Get the return for a specific date.
    #[must_use]
    pub fn get(&self, date: Date) -> Option<f64> {
        self.dates.binary_search(&date).ok().map(|i| self.returns[i])
    }

    /// Arithmetic mean of the returns.
    #[must_use]
    pub fn mean(&self) -> Option<f64> {
        self.returns.mean()
    }
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    fn day(d: u32) -> Date {
        Date::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn price_series_from_unordered_observations() {
        let prices =
            PriceSeries::from_observations(vec![(day(3), 12.0), (day(2), 10.0), (day(3), 11.0)]);

        assert_eq!(prices.dates, vec![day(2), day(3)]);
        assert_eq!(prices.get(day(2)), Some(10.0));
        // later duplicate wins
        assert_eq!(prices.get(day(3)), Some(11.0));
        assert_eq!(prices.get(day(4)), None);
    }

    #[test]
    fn return_series_get() {
        let returns = ReturnSeries::new(vec![day(2), day(3)], array![0.01, -0.02]);

        assert_eq!(returns.len(), 2);
        assert_eq!(returns.get(day(3)), Some(-0.02));
        assert_eq!(returns.get(day(1)), None);
        assert!(ReturnSeries::empty().is_empty());
    }
}

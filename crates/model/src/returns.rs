//! Simple return computation.

use famafrench_primitives::{PriceSeries, ReturnSeries};
use ndarray::Array1;

/// Compute simple daily returns `p[t] / p[t-1] - 1`.
///
/// The first date has no prior price and is dropped, so the output is one
/// element shorter than the input. Fewer than two prices yield an empty
/// series.
#[must_use]
pub fn simple_returns(prices: &PriceSeries) -> ReturnSeries {
    if prices.len() < 2 {
        return ReturnSeries::empty();
    }

    let returns: Array1<f64> =
        prices.prices.windows(2).into_iter().map(|w| w[1] / w[0] - 1.0).collect();

    ReturnSeries::new(prices.dates[1..].to_vec(), returns)
}

//! The aligned regression sample.

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use crate::Date;

/// Asset returns joined with factor returns on date, with no missing cells.
///
/// This is the exact sample the regression is fitted on.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedPanel {
    /// Sample dates, increasing.
    pub dates: Vec<Date>,
    /// Asset simple returns.
    pub asset_ret: Array1<f64>,
    /// Market excess return.
    pub mkt_rf: Array1<f64>,
    /// Size premium.
    pub smb: Array1<f64>,
    /// Value premium.
    pub hml: Array1<f64>,
    /// Risk-free rate.
    pub rf: Array1<f64>,
}

impl AlignedPanel {
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

    /// Asset return in excess of the risk-free rate.
    #[must_use]
    pub fn excess_returns(&self) -> Array1<f64> {
        &self.asset_ret - &self.rf
    }

    /// Regressor matrix `[1, MKT_RF, SMB, HML]` (n x 4).
    #[must_use]
    pub fn design_matrix(&self) -> Array2<f64> {
        let n = self.len();
        let mut x = Array2::zeros((n, 4));
        for i in 0..n {
            x[[i, 0]] = 1.0;
            x[[i, 1]] = self.mkt_rf[i];
            x[[i, 2]] = self.smb[i];
            x[[i, 3]] = self.hml[i];
        }
        x
    }

    /// Row-wise view of the panel, for persistence.
    pub fn rows(&self) -> impl Iterator<Item = AlignedRow> + '_ {
        (0..self.len()).map(move |i| AlignedRow {
            date: self.dates[i],
            asset_ret: self.asset_ret[i],
            mkt_rf: self.mkt_rf[i],
            smb: self.smb[i],
            hml: self.hml[i],
            rf: self.rf[i],
        })
    }
}

/// One row of an [`AlignedPanel`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlignedRow {
    /// Observation date.
    #[serde(rename = "Date")]
    pub date: Date,
    /// Asset simple return.
    pub asset_ret: f64,
    /// Market excess return.
    #[serde(rename = "MKT_RF")]
    pub mkt_rf: f64,
    /// Size premium.
    #[serde(rename = "SMB")]
    pub smb: f64,
    /// Value premium.
    #[serde(rename = "HML")]
    pub hml: f64,
    /// Risk-free rate.
    #[serde(rename = "RF")]
    pub rf: f64,
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use ndarray::array;

    use super::*;

    fn panel() -> AlignedPanel {
        AlignedPanel {
            dates: vec![
                Date::from_ymd_opt(2024, 1, 2).unwrap(),
                Date::from_ymd_opt(2024, 1, 3).unwrap(),
            ],
            asset_ret: array![0.010, -0.005],
            mkt_rf: array![0.008, -0.004],
            smb: array![0.001, 0.002],
            hml: array![-0.003, 0.000],
            rf: array![0.0002, 0.0002],
        }
    }

    #[test]
    fn excess_returns_subtract_rf() {
        let excess = panel().excess_returns();
        assert_relative_eq!(excess[0], 0.0098, epsilon = 1e-12);
        assert_relative_eq!(excess[1], -0.0052, epsilon = 1e-12);
    }

    #[test]
    fn design_matrix_has_constant() {
        let x = panel().design_matrix();
        assert_eq!(x.dim(), (2, 4));
        assert_eq!(x.column(0).to_vec(), vec![1.0, 1.0]);
        assert_eq!(x[[1, 1]], -0.004);
        assert_eq!(x[[0, 3]], -0.003);
    }

    #[test]
    fn rows_follow_dates() {
        let rows: Vec<AlignedRow> = panel().rows().collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].smb, 0.002);
    }
}

//! Alignment of asset returns with factor returns.

use chrono::Datelike;
use famafrench_primitives::{AlignedPanel, Date, Factor, FactorPanel, ReturnSeries};
use ndarray::Array1;
use polars::prelude::*;
use tracing::{debug, warn};

use crate::ModelError;

/// Join key shared by the return and factor frames.
pub const DATE_COLUMN: &str = "date";

/// Column holding the asset's simple returns.
pub const ASSET_RETURN_COLUMN: &str = "asset_ret";

/// Days between 0001-01-01 (CE day 1) and 1970-01-01.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Inner-join asset returns with factor returns on date.
///
/// Only dates present in both inputs are kept, rows with any missing or
/// non-finite value are dropped, and the result is sorted by date. A date
/// repeated in the factor panel keeps its last row.
///
/// # Errors
/// Returns [`ModelError::MissingFactor`] if the factor panel lacks any of
/// `MKT_RF`, `SMB`, `HML` or `RF`. The check happens before any join.
pub fn align_panel(
    returns: &ReturnSeries,
    factors: &FactorPanel,
) -> Result<AlignedPanel, ModelError> {
    for factor in Factor::ALL {
        if !factors.has(factor) {
            return Err(ModelError::MissingFactor(factor));
        }
    }

    let unique;
    let factors = if factors.has_duplicate_dates() {
        unique = factors.deduplicated();
        warn!(
            rows = factors.len(),
            dates = unique.len(),
            "factor panel repeats dates, keeping the last row for each"
        );
        &unique
    } else {
        factors
    };

    let returns_df = returns_frame(returns)?;
    let factors_df = factors_frame(factors)?;

    let complete = Factor::ALL
        .iter()
        .fold(col(ASSET_RETURN_COLUMN).is_not_null(), |acc, f| {
            acc.and(col(f.column_name()).is_not_null())
        });

    let joined = returns_df
        .lazy()
        .join(
            factors_df.lazy(),
            [col(DATE_COLUMN)],
            [col(DATE_COLUMN)],
            JoinArgs::new(JoinType::Inner),
        )
        .filter(complete)
        .sort([DATE_COLUMN], SortMultipleOptions::default())
        .collect()?;

    debug!(
        returns = returns.len(),
        factor_rows = factors.len(),
        aligned = joined.height(),
        "aligned asset returns with factors"
    );

    Ok(AlignedPanel {
        dates: extract_dates(&joined)?,
        asset_ret: extract_array(&joined, ASSET_RETURN_COLUMN)?,
        mkt_rf: extract_array(&joined, Factor::MktRf.column_name())?,
        smb: extract_array(&joined, Factor::Smb.column_name())?,
        hml: extract_array(&joined, Factor::Hml.column_name())?,
        rf: extract_array(&joined, Factor::Rf.column_name())?,
    })
}

fn date_column(dates: &[Date]) -> Result<Column, ModelError> {
    let days: Vec<i32> =
        dates.iter().map(|d| d.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE).collect();
    Ok(Column::new(DATE_COLUMN.into(), days).cast(&DataType::Date)?)
}

/// NaN and infinities become nulls so the completeness filter drops them.
fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

fn returns_frame(returns: &ReturnSeries) -> Result<DataFrame, ModelError> {
    let values: Vec<Option<f64>> = returns.returns.iter().copied().map(finite).collect();
    Ok(DataFrame::new(vec![
        date_column(&returns.dates)?,
        Column::new(ASSET_RETURN_COLUMN.into(), values),
    ])?)
}

fn factors_frame(factors: &FactorPanel) -> Result<DataFrame, ModelError> {
    let mut columns = vec![date_column(factors.dates())?];
    for factor in Factor::ALL {
        let values = factors.column(factor).ok_or(ModelError::MissingFactor(factor))?;
        let values: Vec<Option<f64>> = values.iter().map(|v| v.and_then(finite)).collect();
        columns.push(Column::new(factor.column_name().into(), values));
    }
    Ok(DataFrame::new(columns)?)
}

fn extract_dates(df: &DataFrame) -> Result<Vec<Date>, ModelError> {
    let days = df
        .column(DATE_COLUMN)
        .map_err(|_| ModelError::MissingColumn(DATE_COLUMN.to_string()))?
        .cast(&DataType::Int32)?;

    days.i32()?
        .into_iter()
        .map(|d| {
            d.and_then(|d| Date::from_num_days_from_ce_opt(d + UNIX_EPOCH_DAYS_FROM_CE))
                .ok_or_else(|| ModelError::InvalidConfig(format!("invalid date value: {d:?}")))
        })
        .collect()
}

fn extract_array(df: &DataFrame, col_name: &str) -> Result<Array1<f64>, ModelError> {
    let series =
        df.column(col_name).map_err(|_| ModelError::MissingColumn(col_name.to_string()))?;

    let chunked = series
        .f64()
        .map_err(|_| ModelError::InvalidConfig(format!("column {col_name} is not f64")))?;

    Ok(chunked.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect())
}

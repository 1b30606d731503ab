//! End-to-end tests of the three-factor pipeline.
#![allow(missing_docs)]

use approx::assert_relative_eq;
use famafrench_model::{
    CovarianceType, Ff3Config, Ff3Pipeline, ModelError, RegressionConfig, TRADING_DAYS_PER_YEAR,
};
use famafrench_primitives::{Date, Factor, FactorPanel, PriceSeries};
use ndarray::Array1;
use rstest::rstest;

const PRICES: [f64; 10] = [100.0, 101.0, 99.0, 102.0, 103.0, 101.0, 104.0, 105.0, 103.0, 106.0];

fn business_days(n: usize) -> Vec<Date> {
    let mut day = Date::from_ymd_opt(2024, 1, 1).unwrap();
    let mut out = Vec::with_capacity(n);
    while out.len() < n {
        if chrono::Datelike::weekday(&day).number_from_monday() <= 5 {
            out.push(day);
        }
        day = day.succ_opt().unwrap();
    }
    out
}

fn zero_factors(dates: &[Date]) -> FactorPanel {
    let n = dates.len();
    FactorPanel::new(dates.to_vec())
        .with_values(Factor::MktRf, vec![0.0; n])
        .with_values(Factor::Smb, vec![0.0; n])
        .with_values(Factor::Hml, vec![0.0; n])
        .with_values(Factor::Rf, vec![0.0; n])
}

fn ten_prices() -> PriceSeries {
    PriceSeries::new(business_days(10), Array1::from(PRICES.to_vec()))
}

#[test]
fn zero_factor_scenario() {
    let prices = ten_prices();
    let factors = zero_factors(&prices.dates);

    let estimate = Ff3Pipeline::default().run(&prices, &factors).unwrap();

    let mean = estimate.returns.mean().unwrap();
    let s = &estimate.summary;
    assert_eq!(s.n_obs, 9);
    assert_relative_eq!(s.alpha_daily, mean, epsilon = 1e-12);
    assert_relative_eq!(s.beta_mkt, 0.0, epsilon = 1e-12);
    assert_relative_eq!(s.beta_smb, 0.0, epsilon = 1e-12);
    assert_relative_eq!(s.beta_hml, 0.0, epsilon = 1e-12);
    assert_relative_eq!(s.r2.unwrap(), 0.0, epsilon = 1e-12);
    assert_eq!(s.t_mkt, None);
    assert_eq!(s.p_hml, None);
    assert!(s.t_alpha.is_some());
    assert_relative_eq!(
        s.alpha_annualized,
        (1.0 + mean).powi(TRADING_DAYS_PER_YEAR as i32) - 1.0,
        epsilon = 1e-12
    );
}

#[test]
fn missing_risk_free_rate_fails() {
    let prices = ten_prices();
    let n = prices.len();
    let factors = FactorPanel::new(prices.dates.clone())
        .with_values(Factor::MktRf, vec![0.0; n])
        .with_values(Factor::Smb, vec![0.0; n])
        .with_values(Factor::Hml, vec![0.0; n]);

    let result = Ff3Pipeline::default().run(&prices, &factors);
    assert!(matches!(result, Err(ModelError::MissingFactor(Factor::Rf))));
}

#[rstest]
#[case(3, false)]
#[case(4, true)]
#[case(5, true)]
fn minimum_overlap(#[case] overlap: usize, #[case] succeeds: bool) {
    let prices = ten_prices();
    // returns exist from the second price date on
    let factor_dates = prices.dates[1..=overlap].to_vec();
    let n = factor_dates.len();
    let factors = FactorPanel::new(factor_dates)
        .with_values(Factor::MktRf, (0..n).map(|i| 0.002 * i as f64 - 0.003).collect())
        .with_values(Factor::Smb, (0..n).map(|i| 0.001 * (i * i) as f64).collect())
        .with_values(Factor::Hml, (0..n).map(|i| if i % 2 == 0 { 0.001 } else { -0.002 }).collect())
        .with_values(Factor::Rf, vec![0.0001; n]);

    let result = Ff3Pipeline::default().run(&prices, &factors);
    if succeeds {
        assert_eq!(result.unwrap().summary.n_obs, overlap);
    } else {
        assert!(matches!(
            result,
            Err(ModelError::InsufficientData { required: 4, actual: 3 })
        ));
    }
}

#[test]
fn covariance_choice_only_changes_inference() {
    let dates = business_days(120);
    let n = dates.len();
    let mkt: Vec<f64> = (0..n).map(|i| 0.01 * (i as f64 * 0.41).sin()).collect();
    let smb: Vec<f64> = (0..n).map(|i| 0.004 * (i as f64 * 1.1).cos()).collect();
    let hml: Vec<f64> = (0..n).map(|i| 0.003 * (i as f64 * 0.23).sin()).collect();

    let mut price = 50.0;
    let mut prices = vec![price];
    for i in 1..n {
        price *= 1.0 + 0.0001 + 0.0002 + 1.1 * mkt[i] - 0.3 * smb[i] + 0.002 * (i as f64 * 2.9).sin();
        prices.push(price);
    }
    let prices = PriceSeries::new(dates.clone(), Array1::from(prices));
    let factors = FactorPanel::new(dates)
        .with_values(Factor::MktRf, mkt)
        .with_values(Factor::Smb, smb)
        .with_values(Factor::Hml, hml)
        .with_values(Factor::Rf, vec![0.0001; n]);

    let hac = Ff3Pipeline::default().run(&prices, &factors).unwrap();
    let plain = Ff3Pipeline::new(Ff3Config {
        regression: RegressionConfig { covariance: CovarianceType::NonRobust, ..Default::default() },
        ..Default::default()
    })
    .run(&prices, &factors)
    .unwrap();

    assert_relative_eq!(hac.summary.alpha_daily, plain.summary.alpha_daily, epsilon = 1e-14);
    assert_relative_eq!(hac.summary.beta_mkt, plain.summary.beta_mkt, epsilon = 1e-12);
    assert_eq!(hac.summary.r2, plain.summary.r2);
    assert_ne!(hac.summary.t_mkt, plain.summary.t_mkt);
    assert_relative_eq!(hac.summary.beta_mkt, 1.1, epsilon = 0.05);
    assert_eq!(hac.panel.len(), n - 1);
}

#[test]
fn panel_is_the_regression_sample() {
    let prices = ten_prices();
    let factors = zero_factors(&prices.dates);

    let estimate = Ff3Pipeline::default().run(&prices, &factors).unwrap();

    assert_eq!(estimate.panel.dates, prices.dates[1..].to_vec());
    assert_eq!(estimate.panel.len(), estimate.model.n_obs());
    assert_eq!(estimate.model.residuals().len(), estimate.panel.len());
}

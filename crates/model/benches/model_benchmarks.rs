//! Benchmarks for famafrench-model estimation.
#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use famafrench_model::{
    CovarianceType, Ff3Config, Ff3Pipeline, RegressionConfig, ThreeFactorRegression, align_panel,
    simple_returns,
};
use famafrench_primitives::{Date, Factor, FactorPanel, PriceSeries};
use ndarray::Array1;
use rand::Rng;

fn dates(n: usize) -> Vec<Date> {
    let start = Date::from_ymd_opt(2000, 1, 3).unwrap();
    start.iter_days().take(n).collect()
}

fn random_prices(n: usize) -> PriceSeries {
    let mut rng = rand::thread_rng();
    let mut price = 100.0;
    let prices = Array1::from_iter((0..n).map(|_| {
        price *= 1.0 + rng.r#gen::<f64>() * 0.04 - 0.02;
        price
    }));
    PriceSeries::new(dates(n), prices)
}

fn random_factors(n: usize) -> FactorPanel {
    let mut rng = rand::thread_rng();
    let mut column = |scale: f64| -> Vec<f64> {
        (0..n).map(|_| (rng.r#gen::<f64>() - 0.5) * scale).collect()
    };
    let mkt = column(0.03);
    let smb = column(0.01);
    let hml = column(0.01);
    FactorPanel::new(dates(n))
        .with_values(Factor::MktRf, mkt)
        .with_values(Factor::Smb, smb)
        .with_values(Factor::Hml, hml)
        .with_values(Factor::Rf, vec![0.0001; n])
}

fn bench_align(c: &mut Criterion) {
    let mut group = c.benchmark_group("align_panel");

    for n in [252, 1260, 5040] {
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            let returns = simple_returns(&random_prices(n));
            let factors = random_factors(n);
            b.iter(|| align_panel(black_box(&returns), black_box(&factors)).unwrap());
        });
    }

    group.finish();
}

fn bench_regression(c: &mut Criterion) {
    let mut group = c.benchmark_group("three_factor_regression");

    let scenarios = [
        (252, "one_year"),
        (1260, "five_years"),
        (5040, "twenty_years"),
    ];

    for (n, name) in scenarios {
        let returns = simple_returns(&random_prices(n));
        let panel = align_panel(&returns, &random_factors(n)).unwrap();

        for (label, covariance) in [
            ("hac", CovarianceType::default()),
            ("nonrobust", CovarianceType::NonRobust),
        ] {
            let model = ThreeFactorRegression::with_config(RegressionConfig {
                covariance,
                ..Default::default()
            });
            group.bench_with_input(BenchmarkId::new(label, name), &panel, |b, panel| {
                b.iter(|| model.fit(black_box(panel)).unwrap());
            });
        }
    }

    group.finish();
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    group.sample_size(50);

    let n = 1400;
    let prices = random_prices(n);
    let factors = random_factors(n);
    let pipeline = Ff3Pipeline::new(Ff3Config::default());

    group.bench_function("aapl_sized_run", |b| {
        b.iter(|| pipeline.run(black_box(&prices), black_box(&factors)).unwrap());
    });

    group.finish();
}

criterion_group!(benches, bench_align, bench_regression, bench_pipeline);

criterion_main!(benches);

//! Benchmarks for famafrench-math operations.
#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use famafrench_math::{
    CovarianceEstimator, HomoskedasticCovariance, NeweyWestCovariance, ordinary_least_squares,
    pseudo_inverse_symmetric,
};
use ndarray::{Array1, Array2};
use rand::{SeedableRng, rngs::StdRng};
use rand_distr::{Distribution, Normal};

/// Daily factor-like design: constant plus `k` columns with ~1% volatility.
fn random_design(rng: &mut StdRng, n: usize, k: usize) -> Array2<f64> {
    let normal = Normal::new(0.0, 0.01).unwrap();
    Array2::from_shape_fn((n, k + 1), |(_, j)| if j == 0 { 1.0 } else { normal.sample(rng) })
}

fn random_response(rng: &mut StdRng, x: &Array2<f64>) -> Array1<f64> {
    let noise = Normal::new(0.0, 0.015).unwrap();
    x.rows().into_iter().map(|r| 0.0003 + r.sum() - 1.0 + noise.sample(rng)).collect()
}

fn bench_ols(c: &mut Criterion) {
    let mut group = c.benchmark_group("ols");

    for n in [252, 1260, 2520, 10_000] {
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            let mut rng = StdRng::seed_from_u64(7);
            let x = random_design(&mut rng, n, 3);
            let y = random_response(&mut rng, &x);
            b.iter(|| ordinary_least_squares(black_box(&y), black_box(&x)).unwrap());
        });
    }

    group.finish();
}

fn bench_covariance(c: &mut Criterion) {
    let mut group = c.benchmark_group("covariance");

    for n in [252, 1260, 2520] {
        let mut rng = StdRng::seed_from_u64(11);
        let x = random_design(&mut rng, n, 3);
        let y = random_response(&mut rng, &x);
        let fit = ordinary_least_squares(&y, &x).unwrap();

        group.bench_with_input(BenchmarkId::new("nonrobust", n), &n, |b, _| {
            b.iter(|| HomoskedasticCovariance.estimate(black_box(&x), black_box(&fit)).unwrap());
        });

        for lags in [5, 20] {
            let estimator = NeweyWestCovariance::with_lags(lags);
            group.bench_with_input(
                BenchmarkId::new("newey_west", format!("{n}_lag{lags}")),
                &n,
                |b, _| {
                    b.iter(|| estimator.estimate(black_box(&x), black_box(&fit)).unwrap());
                },
            );
        }
    }

    group.finish();
}

fn bench_pseudo_inverse(c: &mut Criterion) {
    let mut group = c.benchmark_group("pseudo_inverse");

    for k in [4, 10, 25] {
        let mut rng = StdRng::seed_from_u64(3);
        let x = random_design(&mut rng, 500, k - 1);
        let xtx = x.t().dot(&x);
        group.bench_with_input(BenchmarkId::from_parameter(k), &k, |b, _| {
            b.iter(|| pseudo_inverse_symmetric(black_box(&xtx)).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_ols, bench_covariance, bench_pseudo_inverse);

criterion_main!(benches);

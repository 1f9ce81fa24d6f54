//! Benchmarks for the calibration and decomposition core.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pronostico::calibration::IsotonicRegression;
use pronostico::decomposition::decompose;
use pronostico::functional::Functional;
use pronostico::stats::DEFAULT_N_BINS;
use pronostico::synthetic::make_synthetic_hetero;

fn bench_isotonic_fit(c: &mut Criterion) {
    let mut group = c.benchmark_group("isotonic_fit");

    for &n in &[100usize, 1_000, 10_000, 100_000] {
        group.throughput(Throughput::Elements(n as u64));
        let data = make_synthetic_hetero(n, 42);

        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| {
                let mut iso = IsotonicRegression::new();
                iso.fit(black_box(&data.mean_pred), black_box(&data.y))
                    .expect("fit");
                iso
            });
        });
    }

    group.finish();
}

fn bench_decompose(c: &mut Criterion) {
    let mut group = c.benchmark_group("decompose");

    for &n in &[1_000usize, 10_000, 100_000] {
        group.throughput(Throughput::Elements(n as u64));
        let data = make_synthetic_hetero(n, 42);

        group.bench_with_input(BenchmarkId::new("mean", n), &n, |b, _| {
            b.iter(|| {
                decompose(
                    black_box(&data.y),
                    black_box(&data.mean_pred),
                    Functional::Mean,
                    DEFAULT_N_BINS,
                )
                .expect("decompose")
            });
        });

        group.bench_with_input(BenchmarkId::new("quantile_0.9", n), &n, |b, _| {
            b.iter(|| {
                decompose(
                    black_box(&data.y),
                    black_box(&data.q90_pred),
                    Functional::Quantile(0.9),
                    DEFAULT_N_BINS,
                )
                .expect("decompose")
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_isotonic_fit, bench_decompose);
criterion_main!(benches);

//! Benchmarks for the decomposition methods and the ensemble forecaster.

use anofox_decompose::decomposition::{decompose_values, DecompositionMethod, DecompositionParams};
use anofox_decompose::models::{advanced_forecast, EnsembleConfig};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn generate_seasonal(n: usize, period: usize) -> Vec<f64> {
    (0..n)
        .map(|i| {
            100.0
                + 0.05 * i as f64
                + 10.0 * (2.0 * std::f64::consts::PI * i as f64 / period as f64).sin()
                + ((i * 7919) % 13) as f64 * 0.1
        })
        .collect()
}

fn bench_methods(c: &mut Criterion) {
    let mut group = c.benchmark_group("decomposition_methods");

    for size in [120, 480, 1920].iter() {
        let series = generate_seasonal(*size, 12);

        for method in DecompositionMethod::all() {
            let params = DecompositionParams::new(12).with_method(method);
            group.bench_with_input(BenchmarkId::new(method.as_str(), size), size, |b, _| {
                b.iter(|| decompose_values(black_box(&series), &params))
            });
        }

        let robust = DecompositionParams::new(12).robust();
        group.bench_with_input(BenchmarkId::new("stl_robust", size), size, |b, _| {
            b.iter(|| decompose_values(black_box(&series), &robust))
        });
    }

    group.finish();
}

fn bench_forecasting(c: &mut Criterion) {
    let mut group = c.benchmark_group("forecasting");

    for size in [60, 240, 960].iter() {
        let series = generate_seasonal(*size, 12);

        let params = DecompositionParams::new(12).with_forecast_periods(24);
        group.bench_with_input(BenchmarkId::new("decomposition", size), size, |b, _| {
            b.iter(|| decompose_values(black_box(&series), &params))
        });

        let config = EnsembleConfig::new(24);
        group.bench_with_input(BenchmarkId::new("ensemble", size), size, |b, _| {
            b.iter(|| advanced_forecast(black_box(&series), &config))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_methods, bench_forecasting);
criterion_main!(benches);

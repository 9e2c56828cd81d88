//! Benchmarks for indicator implementations.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use daytrader_core::traits::{Indicator, MultiOutputIndicator, OhlcvIndicator};
use daytrader_core::types::Bar;
use daytrader_indicators::{BollingerBands, Ema, EmaSeed, Macd, Rsi, RsiSmoothing, Vwap};

fn generate_test_data(size: usize) -> Vec<f64> {
    (0..size)
        .map(|i| 100.0 + (i as f64 * 0.1).sin() * 10.0)
        .collect()
}

fn benchmark_ema(c: &mut Criterion) {
    let mut group = c.benchmark_group("EMA");

    for size in [1000, 10000, 100000].iter() {
        let data = generate_test_data(*size);

        for seed in [EmaSeed::Sma, EmaSeed::First, EmaSeed::Adjusted] {
            group.bench_with_input(
                BenchmarkId::new(format!("{seed:?}"), size),
                &data,
                |b, data| {
                    let ema = Ema::with_seed(20, seed);
                    b.iter(|| ema.calculate(black_box(data)))
                },
            );
        }
    }

    group.finish();
}

fn benchmark_rsi(c: &mut Criterion) {
    let mut group = c.benchmark_group("RSI");

    for size in [1000, 10000, 100000].iter() {
        let data = generate_test_data(*size);

        group.bench_with_input(BenchmarkId::new("wilder", size), &data, |b, data| {
            let rsi = Rsi::new(14);
            b.iter(|| rsi.calculate(black_box(data)))
        });

        group.bench_with_input(BenchmarkId::new("simple", size), &data, |b, data| {
            let rsi = Rsi::with_smoothing(14, RsiSmoothing::Simple);
            b.iter(|| rsi.calculate(black_box(data)))
        });
    }

    group.finish();
}

fn benchmark_bands_and_macd(c: &mut Criterion) {
    let mut group = c.benchmark_group("Bands/MACD");

    for size in [1000, 10000].iter() {
        let data = generate_test_data(*size);

        group.bench_with_input(BenchmarkId::new("bollinger", size), &data, |b, data| {
            let bb = BollingerBands::new();
            b.iter(|| bb.calculate(black_box(data)))
        });

        group.bench_with_input(BenchmarkId::new("macd", size), &data, |b, data| {
            let macd = Macd::new();
            b.iter(|| macd.calculate(black_box(data)))
        });
    }

    group.finish();
}

fn benchmark_vwap(c: &mut Criterion) {
    let bars: Vec<Bar> = generate_test_data(10000)
        .into_iter()
        .enumerate()
        .map(|(i, p)| Bar::new(i as i64, p, p + 1.0, p - 1.0, p, 1000.0))
        .collect();

    c.bench_function("VWAP/10000", |b| {
        let vwap = Vwap::new();
        b.iter(|| vwap.calculate_bars(black_box(&bars)))
    });
}

criterion_group!(
    benches,
    benchmark_ema,
    benchmark_rsi,
    benchmark_bands_and_macd,
    benchmark_vwap
);
criterion_main!(benches);

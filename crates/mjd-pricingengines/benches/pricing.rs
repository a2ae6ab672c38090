use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use mjd_instruments::OptionType;
use mjd_pricingengines::{black_scholes_price, implied_volatility, merton_price};
use mjd_processes::ModelParameters;

fn bench_black_scholes(c: &mut Criterion) {
    c.bench_function("black_scholes_price", |b| {
        b.iter(|| {
            black_scholes_price(
                OptionType::Call,
                black_box(100.0),
                black_box(105.0),
                0.05,
                1.0,
                0.2,
            )
            .unwrap()
        })
    });
}

fn bench_merton(c: &mut Criterion) {
    let params = ModelParameters::new(0.2, 0.8, -0.1, 0.15).unwrap();
    let mut group = c.benchmark_group("merton_price");
    for &n_terms in &[20usize, 200] {
        group.bench_with_input(BenchmarkId::from_parameter(n_terms), &n_terms, |b, &n| {
            b.iter(|| {
                merton_price(
                    black_box(&params),
                    100.0,
                    black_box(105.0),
                    0.05,
                    1.0,
                    OptionType::Call,
                    n,
                )
                .unwrap()
            })
        });
    }
    group.finish();
}

fn bench_implied_vol(c: &mut Criterion) {
    let price = black_scholes_price(OptionType::Put, 100.0, 95.0, 0.03, 0.5, 0.35).unwrap();
    c.bench_function("implied_volatility", |b| {
        b.iter(|| {
            implied_volatility(
                black_box(price),
                100.0,
                95.0,
                0.03,
                0.5,
                OptionType::Put,
                1e-6,
                5.0,
            )
            .unwrap()
        })
    });
}

criterion_group!(benches, bench_black_scholes, bench_merton, bench_implied_vol);
criterion_main!(benches);

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mjd_instruments::{ContractTerms, OptionType};
use mjd_models::{MarketQuote, MertonCalibrator};
use mjd_pricingengines::MertonClosedFormEngine;
use mjd_processes::ModelParameters;

fn bench_calibration(c: &mut Criterion) {
    let truth = ModelParameters::new(0.2, 0.8, -0.1, 0.15).unwrap();
    let engine = MertonClosedFormEngine::new(60).unwrap();
    let quotes: Vec<MarketQuote> = [0.5, 1.0]
        .iter()
        .flat_map(|&t| [80.0, 90.0, 100.0, 110.0, 120.0].map(move |k| (k, t)))
        .map(|(k, t)| {
            let terms = ContractTerms::new(100.0, k, t, 0.05, OptionType::Call).unwrap();
            MarketQuote::new(k, t, engine.price(&truth, &terms).unwrap()).unwrap()
        })
        .collect();
    let guess = ModelParameters::new(0.25, 0.5, -0.05, 0.2).unwrap();
    let calibrator = MertonCalibrator::new().with_n_terms(60).unwrap();

    let mut group = c.benchmark_group("calibration");
    group.sample_size(10);
    group.bench_function("merton_10_quotes", |b| {
        b.iter(|| {
            calibrator
                .calibrate(black_box(&quotes), 100.0, 0.05, black_box(&guess))
                .unwrap()
        })
    });
    group.finish();
}

criterion_group!(benches, bench_calibration);
criterion_main!(benches);

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use sethares_dsp::{DissonanceMeasure, SpectrumConfig};

use crate::PARTIAL_COUNTS;

pub fn bench_measure(c: &mut Criterion) {
    let mut group = c.benchmark_group("roughness/measure");
    let measure = DissonanceMeasure::default();

    for &partials in PARTIAL_COUNTS {
        let config = SpectrumConfig::default().partials(partials);
        // Two tones a fifth apart
        let mut spectrum = config.tone(440.0).unwrap();
        spectrum.extend(config.tone(660.0).unwrap());

        let frequencies: Vec<f64> = spectrum.iter().map(|p| p.frequency).collect();
        let amplitudes: Vec<f64> = spectrum.iter().map(|p| p.amplitude).collect();

        group.bench_with_input(BenchmarkId::new("dyad", partials), &partials, |b, _| {
            b.iter(|| {
                measure
                    .measure(black_box(&frequencies), black_box(&amplitudes))
                    .unwrap()
            })
        });

        group.bench_with_input(BenchmarkId::new("pairs", partials), &partials, |b, _| {
            b.iter(|| measure.pair_contributions(black_box(&spectrum)))
        });
    }

    group.finish();
}

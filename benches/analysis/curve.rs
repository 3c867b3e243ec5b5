use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use sethares_dsp::CurveGenerator;

use crate::PARTIAL_COUNTS;

pub fn bench_curve(c: &mut Criterion) {
    let mut group = c.benchmark_group("analysis/curve");
    group.sample_size(20);

    for &partials in PARTIAL_COUNTS {
        // One octave at 0.01 resolution: 101 steps
        let generator = CurveGenerator::new(440.0)
            .partials(partials)
            .ratio_range(1.0, 2.0)
            .step(0.01);
        group.bench_with_input(BenchmarkId::new("octave", partials), &partials, |b, _| {
            b.iter(|| black_box(&generator).generate().unwrap())
        });
    }

    group.finish();
}

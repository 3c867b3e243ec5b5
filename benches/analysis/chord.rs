use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use sethares_dsp::{Chord, ChordDissonance, ChordTimeline, SpectrumConfig};

use crate::PARTIAL_COUNTS;

pub fn bench_chord(c: &mut Criterion) {
    let mut group = c.benchmark_group("analysis/chord");
    let triad = Chord::from_midi(&[60, 64, 67]);
    let seventh = Chord::from_midi(&[55, 59, 62, 65]);

    for &partials in PARTIAL_COUNTS {
        let engine = ChordDissonance::new(SpectrumConfig::default().partials(partials));

        group.bench_with_input(BenchmarkId::new("triad", partials), &partials, |b, _| {
            b.iter(|| engine.dissonance(black_box(&triad)).unwrap())
        });

        group.bench_with_input(BenchmarkId::new("seventh", partials), &partials, |b, _| {
            b.iter(|| engine.dissonance(black_box(&seventh)).unwrap())
        });
    }

    // 64 measures alternating tonic and dominant seventh
    let mut timeline = ChordTimeline::new(64);
    for measure in 1..=64 {
        let chord = if measure % 2 == 0 { &seventh } else { &triad };
        timeline.push(measure as f64, chord.clone());
    }
    let engine = ChordDissonance::default();
    group.bench_function("series/64", |b| {
        b.iter(|| engine.series(black_box(&timeline)).unwrap())
    });

    group.finish();
}

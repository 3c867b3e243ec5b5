use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use sethares_dsp::{Chord, DyadHeatmapBuilder};

pub fn bench_heatmap(c: &mut Criterion) {
    let mut group = c.benchmark_group("analysis/heatmap");
    let builder = DyadHeatmapBuilder::default();

    for notes in [3usize, 6, 12] {
        let midi: Vec<i32> = (0..notes as i32).map(|i| 48 + i * 2).collect();
        let chord = Chord::from_midi(&midi);
        group.bench_with_input(BenchmarkId::new("whole_tone", notes), &notes, |b, _| {
            b.iter(|| builder.build(black_box(&chord)).unwrap())
        });
    }

    group.finish();
}

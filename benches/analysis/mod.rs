//! Benchmarks for curves, chord series and heatmaps.

mod chord;
mod curve;
mod heatmap;

pub use chord::bench_chord;
pub use curve::bench_curve;
pub use heatmap::bench_heatmap;

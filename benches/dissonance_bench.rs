//! Benchmarks for the roughness measure and the analyses built on it.
//!
//! Run with: cargo bench
//!
//! Pair count grows with the square of the partial count, so every group
//! sweeps spectrum size:
//!   - 6 partials per tone  = reference model
//!   - 12, 24               = richer timbres
//!
//! Benchmark groups:
//!   - roughness/*  Spectrum measure and pair generation
//!   - analysis/*   Ratio sweeps, chord series, heatmaps

use criterion::{criterion_group, criterion_main};

mod analysis;
mod roughness;

/// Partials per tone used across benchmarks.
pub const PARTIAL_COUNTS: &[usize] = &[6, 12, 24];

criterion_group!(
    benches,
    roughness::bench_measure,
    analysis::bench_curve,
    analysis::bench_chord,
    analysis::bench_heatmap,
);
criterion_main!(benches);

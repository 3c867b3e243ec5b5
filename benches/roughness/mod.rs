//! Benchmarks for the spectrum-wide roughness measure.

mod measure;

pub use measure::bench_measure;

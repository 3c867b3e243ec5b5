//! Plomp-Levelt roughness and its aggregation into sensory dissonance.
//!
//! `kernel` holds the pure per-pair formula; `measure` sorts, merges and pairs
//! the partials of a spectrum and sums the kernel over every pair.

/// Per-pair roughness formula and amplitude models.
pub mod kernel;
/// Spectrum-wide dissonance (pair generation and summation).
pub mod measure;

pub use kernel::{roughness, AmplitudeModel};
pub use measure::{merge_partials, DissonanceMeasure, Measurement, PairContribution, PairPolicy};

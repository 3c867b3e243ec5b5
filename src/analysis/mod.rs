//! Dissonance analyses built on the roughness measure: ratio sweeps, chord
//! series, timeline reduction and dyad heatmaps.

pub mod chord;
/// Ratio sweep of two copies of one harmonic spectrum.
pub mod curve;
pub mod heatmap;
pub mod series;
/// Reduction of long series to a fixed number of points.
pub mod timeline;

pub use chord::{ChordDissonance, PairAggregator};
pub use curve::{CurveGenerator, DissonanceCurve, NotableInterval, NOTABLE_INTERVALS};
pub use heatmap::{DyadHeatmap, DyadHeatmapBuilder, DyadMatrix, DyadRow};
pub use series::{DissonanceSample, DissonanceSeries};
pub use timeline::{InterpolatedPoint, InterpolatedSeries, TimelineAggregator};

pub mod analysis; // Curves, chord series, timelines, heatmaps
pub mod config;
pub mod error;
pub mod io; // Pitch and frequency conversions
pub mod roughness; // Plomp-Levelt kernel and spectrum measure
pub mod score;
pub mod spectrum;

mod parallel;

pub use analysis::{
    ChordDissonance, CurveGenerator, DissonanceCurve, DissonanceSample, DissonanceSeries,
    DyadHeatmap, DyadHeatmapBuilder, DyadMatrix, InterpolatedSeries, NotableInterval,
    PairAggregator, TimelineAggregator,
};
pub use config::{SpectrumConfig, SpectrumSettings};
pub use error::{DissonanceError, Result};
pub use roughness::{AmplitudeModel, DissonanceMeasure, Measurement, PairContribution, PairPolicy};
pub use score::{Chord, ChordNotes, ChordTimeline, Note, ScoreChords};
pub use spectrum::{harmonic_spectrum, AmplitudeSource, Partial};

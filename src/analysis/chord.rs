use std::fmt;
use std::sync::Arc;

use tracing::{debug, debug_span, trace};

use super::series::{DissonanceSample, DissonanceSeries};
use crate::config::SpectrumConfig;
use crate::error::Result;
use crate::parallel::try_map_ordered;
use crate::roughness::{Measurement, PairContribution};
use crate::score::{ChordNotes, ScoreChords};
use crate::spectrum::Partial;

/// Reduces the pair contributions of a spectrum to one dissonance value.
///
/// Replaces the plain sum over pairs. Any `Fn(&[PairContribution]) -> f64`
/// closure that is `Send + Sync` is an aggregator.
pub trait PairAggregator: Send + Sync {
    fn aggregate(&self, pairs: &[PairContribution]) -> f64;
}

impl<F> PairAggregator for F
where
    F: Fn(&[PairContribution]) -> f64 + Send + Sync,
{
    fn aggregate(&self, pairs: &[PairContribution]) -> f64 {
        self(pairs)
    }
}

/// Sensory dissonance of whole chords.
///
/// Every note is expanded into its harmonic partials, all partials are pooled
/// into one spectrum and that spectrum is measured once, giving one value per
/// chord.
#[derive(Clone, Default)]
pub struct ChordDissonance {
    spectrum: SpectrumConfig,
    aggregator: Option<Arc<dyn PairAggregator>>,
}

impl ChordDissonance {
    pub fn new(spectrum: SpectrumConfig) -> Self {
        Self {
            spectrum,
            aggregator: None,
        }
    }

    /// Use `aggregator` instead of summing pair roughness
    pub fn with_aggregator<A: PairAggregator + 'static>(mut self, aggregator: A) -> Self {
        self.aggregator = Some(Arc::new(aggregator));
        self
    }

    pub fn spectrum(&self) -> &SpectrumConfig {
        &self.spectrum
    }

    /// All notes' partials concatenated in note order.
    pub fn chord_spectrum(&self, fundamentals: &[f64]) -> Result<Vec<Partial>> {
        let mut partials = Vec::with_capacity(fundamentals.len() * self.spectrum.num_partials);
        for &fundamental in fundamentals {
            partials.extend(self.spectrum.tone(fundamental)?);
        }
        Ok(partials)
    }

    /// Dissonance of one chord plus the pairs behind it. An empty chord is
    /// silent and never reaches the kernel.
    pub fn measure<C: ChordNotes + ?Sized>(&self, chord: &C) -> Result<Measurement> {
        self.measure_fundamentals(&chord.fundamentals())
    }

    pub fn measure_fundamentals(&self, fundamentals: &[f64]) -> Result<Measurement> {
        if fundamentals.is_empty() {
            return Ok(Measurement::silent());
        }
        self.spectrum.validate()?;

        let partials = self.chord_spectrum(fundamentals)?;
        let pairs = self.spectrum.measure.pair_contributions(&partials);
        let dissonance = match &self.aggregator {
            Some(aggregator) => aggregator.aggregate(&pairs),
            None => pairs.iter().map(|p| p.roughness).sum::<f64>(),
        };
        Ok(Measurement { dissonance, pairs })
    }

    pub fn dissonance<C: ChordNotes + ?Sized>(&self, chord: &C) -> Result<f64> {
        Ok(self.measure(chord)?.dissonance)
    }

    /// Timeline sample for a chord at `position`.
    pub fn sample<C: ChordNotes + ?Sized>(&self, position: f64, chord: &C) -> Result<DissonanceSample> {
        let measurement = self.measure(chord)?;
        trace!(position, dissonance = measurement.dissonance, "chord measured");
        Ok(DissonanceSample::new(position, measurement.dissonance)
            .with_pairs(measurement.pairs)
            .with_chord(chord.size(), chord.labels()))
    }

    /// One sample per chord of `score`, in score order.
    pub fn series<S: ScoreChords + ?Sized>(&self, score: &S) -> Result<DissonanceSeries> {
        let chords = score.chords();
        let _span = debug_span!("chord_series", chords = chords.len()).entered();

        let samples = try_map_ordered(&chords, |&(position, chord)| self.sample(position, chord))?;
        let series = DissonanceSeries::from(samples);
        debug!(mean = ?series.mean(), "chord series measured");
        Ok(series)
    }
}

impl fmt::Debug for ChordDissonance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChordDissonance")
            .field("spectrum", &self.spectrum)
            .field("custom_aggregator", &self.aggregator.is_some())
            .finish()
    }
}

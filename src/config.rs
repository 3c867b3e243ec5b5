//! Shared spectrum configuration for curves, chords and heatmaps.

use crate::error::{DissonanceError, Result};
use crate::roughness::{AmplitudeModel, DissonanceMeasure, PairPolicy};
use crate::spectrum::{harmonic_spectrum, AmplitudeSource, Partial};

/// Default number of partials per tone.
pub const DEFAULT_PARTIALS: usize = 6;

/// How each tone is expanded into partials and how the result is measured.
///
/// Builder style:
///
/// ```
/// use sethares_dsp::{AmplitudeModel, SpectrumConfig};
///
/// let config = SpectrumConfig::default()
///     .partials(8)
///     .decay(0.9)
///     .model(AmplitudeModel::Product);
/// assert_eq!(config.num_partials, 8);
/// ```
#[derive(Debug, Clone)]
pub struct SpectrumConfig {
    pub num_partials: usize,
    pub amplitude: AmplitudeSource,
    pub measure: DissonanceMeasure,
}

impl SpectrumConfig {
    /// Set the number of partials per tone (fundamental included)
    pub fn partials(mut self, num_partials: usize) -> Self {
        self.num_partials = num_partials;
        self
    }

    /// Exponentially decaying amplitudes, `rate^i` for partial `i`
    pub fn decay(mut self, rate: f64) -> Self {
        self.amplitude = AmplitudeSource::Decay(rate);
        self
    }

    /// Compute amplitudes from the partial frequencies with a callback
    pub fn amplitude_callback<F>(mut self, callback: F) -> Self
    where
        F: Fn(&[f64]) -> Vec<f64> + Send + Sync + 'static,
    {
        self.amplitude = AmplitudeSource::custom(callback);
        self
    }

    pub fn amplitude_source(mut self, source: AmplitudeSource) -> Self {
        self.amplitude = source;
        self
    }

    pub fn model(mut self, model: AmplitudeModel) -> Self {
        self.measure.model = model;
        self
    }

    pub fn pairs(mut self, pairs: PairPolicy) -> Self {
        self.measure.pairs = pairs;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.num_partials == 0 {
            return Err(DissonanceError::invalid(
                "num_partials",
                "at least one partial is required",
            ));
        }
        Ok(())
    }

    /// Harmonic partials of one tone.
    pub fn tone(&self, fundamental: f64) -> Result<Vec<Partial>> {
        harmonic_spectrum(fundamental, self.num_partials, &self.amplitude)
    }
}

impl Default for SpectrumConfig {
    fn default() -> Self {
        Self {
            num_partials: DEFAULT_PARTIALS,
            amplitude: AmplitudeSource::default(),
            measure: DissonanceMeasure::default(),
        }
    }
}

/// Plain-data form of [`SpectrumConfig`] for loading from settings files.
///
/// Amplitude callbacks cannot be serialized, so settings always describe a
/// decaying spectrum.
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpectrumSettings {
    pub num_partials: usize,
    pub decay: f64,
    pub model: AmplitudeModel,
    pub pairs: PairPolicy,
}

impl Default for SpectrumSettings {
    fn default() -> Self {
        Self {
            num_partials: DEFAULT_PARTIALS,
            decay: AmplitudeSource::DEFAULT_DECAY,
            model: AmplitudeModel::default(),
            pairs: PairPolicy::default(),
        }
    }
}

impl From<SpectrumSettings> for SpectrumConfig {
    fn from(settings: SpectrumSettings) -> Self {
        SpectrumConfig::default()
            .partials(settings.num_partials)
            .decay(settings.decay)
            .model(settings.model)
            .pairs(settings.pairs)
    }
}

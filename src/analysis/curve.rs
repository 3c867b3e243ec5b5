use std::fmt;

use tracing::{debug, debug_span};

use super::series::{DissonanceSample, DissonanceSeries};
use crate::config::SpectrumConfig;
use crate::error::{DissonanceError, Result};
use crate::parallel::try_map_ordered;
use crate::roughness::{AmplitudeModel, Measurement};
use crate::spectrum::Partial;

/// Just interval marked on dissonance curves for reference.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotableInterval {
    pub numerator: u32,
    pub denominator: u32,
}

impl NotableInterval {
    pub const fn new(numerator: u32, denominator: u32) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    pub fn ratio(&self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }
}

impl fmt::Display for NotableInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

/// Unison, minor and major third, fourth, fifth, major sixth, then octaves.
pub const NOTABLE_INTERVALS: [NotableInterval; 11] = [
    NotableInterval::new(1, 1),
    NotableInterval::new(6, 5),
    NotableInterval::new(5, 4),
    NotableInterval::new(4, 3),
    NotableInterval::new(3, 2),
    NotableInterval::new(5, 3),
    NotableInterval::new(2, 1),
    NotableInterval::new(4, 1),
    NotableInterval::new(8, 1),
    NotableInterval::new(16, 1),
    NotableInterval::new(32, 1),
];

/// Result of a ratio sweep.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct DissonanceCurve {
    pub fundamental: f64,
    pub num_partials: usize,
    /// One sample per ratio step, ascending ratio
    pub series: DissonanceSeries,
    /// Reference intervals that fall inside the swept range
    pub notable_intervals: Vec<NotableInterval>,
}

impl DissonanceCurve {
    /// Curve sample closest to a reference interval.
    pub fn at_interval(&self, interval: NotableInterval) -> Option<&DissonanceSample> {
        self.series.nearest(interval.ratio())
    }
}

/// Sweeps the frequency ratio between two copies of a harmonic spectrum.
///
/// ```
/// use sethares_dsp::CurveGenerator;
///
/// let curve = CurveGenerator::new(440.0)
///     .ratio_range(1.0, 2.0)
///     .step(0.01)
///     .generate()
///     .unwrap();
/// assert_eq!(curve.series.len(), 101);
/// ```
#[derive(Debug, Clone)]
pub struct CurveGenerator {
    fundamental: f64,
    ratio_low: f64,
    ratio_high: f64,
    ratio_step: f64,
    spectrum: SpectrumConfig,
}

impl CurveGenerator {
    pub const DEFAULT_RATIO_LOW: f64 = 1.0;
    pub const DEFAULT_RATIO_HIGH: f64 = 2.3;
    pub const DEFAULT_RATIO_STEP: f64 = 0.001;
    /// Largest ratio axis a sweep may allocate.
    pub const MAX_RATIO_STEPS: usize = 10_000_000;

    pub fn new(fundamental: f64) -> Self {
        Self {
            fundamental,
            ratio_low: Self::DEFAULT_RATIO_LOW,
            ratio_high: Self::DEFAULT_RATIO_HIGH,
            ratio_step: Self::DEFAULT_RATIO_STEP,
            spectrum: SpectrumConfig::default(),
        }
    }

    /// Set the swept ratio interval (both ends inclusive)
    pub fn ratio_range(mut self, low: f64, high: f64) -> Self {
        self.ratio_low = low;
        self.ratio_high = high;
        self
    }

    pub fn step(mut self, step: f64) -> Self {
        self.ratio_step = step;
        self
    }

    pub fn spectrum(mut self, spectrum: SpectrumConfig) -> Self {
        self.spectrum = spectrum;
        self
    }

    pub fn partials(mut self, num_partials: usize) -> Self {
        self.spectrum = self.spectrum.partials(num_partials);
        self
    }

    pub fn decay(mut self, rate: f64) -> Self {
        self.spectrum = self.spectrum.decay(rate);
        self
    }

    pub fn amplitude_callback<F>(mut self, callback: F) -> Self
    where
        F: Fn(&[f64]) -> Vec<f64> + Send + Sync + 'static,
    {
        self.spectrum = self.spectrum.amplitude_callback(callback);
        self
    }

    pub fn model(mut self, model: AmplitudeModel) -> Self {
        self.spectrum = self.spectrum.model(model);
        self
    }

    /// Ratios visited by the sweep: `floor((high - low) / step) + 1` points,
    /// linearly spaced from `low` to `high`.
    pub fn ratios(&self) -> Result<Vec<f64>> {
        let (low, high, step) = (self.ratio_low, self.ratio_high, self.ratio_step);
        if !(step > 0.0) || !step.is_finite() {
            return Err(DissonanceError::invalid(
                "ratio_step",
                format!("must be a positive finite value, got {step}"),
            ));
        }
        if !(low > 0.0) || !high.is_finite() || high < low {
            return Err(DissonanceError::invalid(
                "ratio_range",
                format!("expected 0 < low <= high, got {low}..{high}"),
            ));
        }

        let intervals = ((high - low) / step).floor();
        if !intervals.is_finite() || intervals >= Self::MAX_RATIO_STEPS as f64 {
            return Err(DissonanceError::invalid(
                "ratio_step",
                format!(
                    "{step} over {low}..{high} exceeds {} ratio steps",
                    Self::MAX_RATIO_STEPS
                ),
            ));
        }
        let num_points = intervals as usize + 1;
        if num_points == 1 {
            return Ok(vec![low]);
        }

        let delta = (high - low) / (num_points - 1) as f64;
        let mut ratios: Vec<f64> = (0..num_points).map(|i| low + i as f64 * delta).collect();
        ratios[num_points - 1] = high;
        Ok(ratios)
    }

    /// Dissonance of the base spectrum against itself scaled by `ratio`.
    pub fn dissonance_at(&self, ratio: f64) -> Result<Measurement> {
        let base = self.base_partials()?;
        Ok(self.measure_ratio(&base, ratio))
    }

    pub fn generate(&self) -> Result<DissonanceCurve> {
        let base = self.base_partials()?;
        let ratios = self.ratios()?;

        let _span = debug_span!(
            "dissonance_curve",
            fundamental = self.fundamental,
            steps = ratios.len()
        )
        .entered();

        let samples = try_map_ordered(&ratios, |&ratio| {
            let measurement = self.measure_ratio(&base, ratio);
            Ok(DissonanceSample::new(ratio, measurement.dissonance).with_pairs(measurement.pairs))
        })?;
        let series = DissonanceSeries::from(samples);

        let notable_intervals = NOTABLE_INTERVALS
            .iter()
            .copied()
            .filter(|i| i.ratio() <= self.ratio_high)
            .collect();

        if let (Some(min), Some(max)) = (series.min(), series.max()) {
            debug!(
                min_ratio = min.position,
                min = min.dissonance,
                max_ratio = max.position,
                max = max.dissonance,
                "dissonance curve generated"
            );
        }

        Ok(DissonanceCurve {
            fundamental: self.fundamental,
            num_partials: self.spectrum.num_partials,
            series,
            notable_intervals,
        })
    }

    fn base_partials(&self) -> Result<Vec<Partial>> {
        self.spectrum.validate()?;
        self.spectrum.tone(self.fundamental)
    }

    fn measure_ratio(&self, base: &[Partial], ratio: f64) -> Measurement {
        let combined: Vec<Partial> = base
            .iter()
            .copied()
            .chain(
                base.iter()
                    .map(|p| Partial::new(p.frequency * ratio, p.amplitude)),
            )
            .collect();
        self.spectrum.measure.measure_partials(&combined)
    }
}

impl Default for CurveGenerator {
    fn default() -> Self {
        Self::new(440.0)
    }
}

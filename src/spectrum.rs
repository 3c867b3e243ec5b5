//! Partials and harmonic spectra.

use std::fmt;
use std::sync::Arc;

use crate::error::{DissonanceError, Result};

/// One sinusoidal component of a tone.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Partial {
    /// Frequency in Hz
    pub frequency: f64,
    /// Linear amplitude (0.0 = silent)
    pub amplitude: f64,
}

impl Partial {
    pub const fn new(frequency: f64, amplitude: f64) -> Self {
        Self {
            frequency,
            amplitude,
        }
    }
}

/// Callback mapping partial frequencies to their amplitudes.
pub type AmplitudeFn = dyn Fn(&[f64]) -> Vec<f64> + Send + Sync;

/// Where partial amplitudes come from.
#[derive(Clone)]
pub enum AmplitudeSource {
    /// `amplitude_i = rate^i` with `i = 0` for the fundamental.
    Decay(f64),
    /// User supplied mapping; must return one amplitude per frequency.
    Custom(Arc<AmplitudeFn>),
}

impl AmplitudeSource {
    /// Default decay rate of harmonic amplitudes.
    pub const DEFAULT_DECAY: f64 = 0.88;

    pub fn custom<F>(callback: F) -> Self
    where
        F: Fn(&[f64]) -> Vec<f64> + Send + Sync + 'static,
    {
        AmplitudeSource::Custom(Arc::new(callback))
    }

    /// Amplitudes for `frequencies`, in the same order. Every amplitude must be
    /// finite and non-negative.
    pub fn amplitudes(&self, frequencies: &[f64]) -> Result<Vec<f64>> {
        match self {
            AmplitudeSource::Decay(rate) => {
                if !rate.is_finite() || *rate < 0.0 {
                    return Err(DissonanceError::invalid(
                        "decay",
                        format!("must be finite and non-negative, got {rate}"),
                    ));
                }
                Ok((0..frequencies.len())
                    .map(|i| rate.powi(i as i32))
                    .collect())
            }
            AmplitudeSource::Custom(callback) => {
                let amplitudes = callback(frequencies);
                if amplitudes.len() != frequencies.len() {
                    return Err(DissonanceError::AmplitudeLengthMismatch {
                        expected: frequencies.len(),
                        actual: amplitudes.len(),
                    });
                }
                check_amplitudes(&amplitudes)?;
                Ok(amplitudes)
            }
        }
    }
}

/// Rejects NaN, infinite or negative amplitudes.
pub(crate) fn check_amplitudes(amplitudes: &[f64]) -> Result<()> {
    match amplitudes.iter().find(|a| !a.is_finite() || **a < 0.0) {
        Some(bad) => Err(DissonanceError::invalid(
            "amplitude",
            format!("must be finite and non-negative, got {bad}"),
        )),
        None => Ok(()),
    }
}

impl Default for AmplitudeSource {
    fn default() -> Self {
        AmplitudeSource::Decay(Self::DEFAULT_DECAY)
    }
}

impl fmt::Debug for AmplitudeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AmplitudeSource::Decay(rate) => f.debug_tuple("Decay").field(rate).finish(),
            AmplitudeSource::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Fundamental plus `num_partials - 1` integer harmonics: `f0, 2·f0, …, N·f0`.
pub fn harmonic_spectrum(
    fundamental: f64,
    num_partials: usize,
    source: &AmplitudeSource,
) -> Result<Vec<Partial>> {
    if !(fundamental > 0.0) {
        return Err(DissonanceError::invalid(
            "fundamental",
            format!("must be a positive frequency, got {fundamental}"),
        ));
    }
    if num_partials == 0 {
        return Err(DissonanceError::invalid(
            "num_partials",
            "at least one partial is required",
        ));
    }

    let frequencies: Vec<f64> = (1..=num_partials)
        .map(|k| fundamental * k as f64)
        .collect();
    let amplitudes = source.amplitudes(&frequencies)?;

    Ok(frequencies
        .into_iter()
        .zip(amplitudes)
        .map(|(frequency, amplitude)| Partial::new(frequency, amplitude))
        .collect())
}

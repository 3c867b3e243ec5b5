/*
Plomp-Levelt Roughness Kernel
=============================

Two sine partials sounding together beat against each other. Plomp and Levelt
measured how rough listeners judge such a pair as a function of the distance
between the frequencies; Sethares fitted that curve with a difference of two
exponentials and scaled it by the critical bandwidth at the lower frequency.

Vocabulary
----------

  f1, f2      Frequencies of the pair in Hz, f1 <= f2.

  s           Critical band scaling at f1. Low frequencies have narrow bands
              in Hz so the same Hz difference is rougher down there.

  x           Scaled distance s * (f2 - f1). The curve peaks near x = 0.24
              (DSTAR) and decays towards zero as x grows.

  amplitude   How loud the beating is. The "min" model uses the quieter
              partial (that is the beat amplitude); the older "product" model
              multiplies both.


The Shape
---------

  roughness
     ┐   ╱╲
     │  ╱  ╲
     │ ╱    ╲___
     │╱         ‾‾‾‾───____
     └─────────────────────→ x
     0  0.24

  r(x) = amp * (C1 * e^(A1 * x) + C2 * e^(A2 * x))

C1 + C2 = 0, so a unison pair (x = 0) is never rough. Individual terms can be
negative for degenerate inputs, so callers must not assume per-pair positivity.
*/

use std::fmt;
use std::str::FromStr;

use crate::error::DissonanceError;
use crate::spectrum::Partial;

/// Scaled frequency distance at maximum roughness
pub const DSTAR: f64 = 0.24;
pub const S1: f64 = 0.0207;
pub const S2: f64 = 18.96;
pub const C1: f64 = 5.0;
pub const C2: f64 = -5.0;
pub const A1: f64 = -3.51;
pub const A2: f64 = -5.75;

/// How the amplitudes of two partials combine into a beat amplitude.
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AmplitudeModel {
    /// Quieter partial sets the beat amplitude
    #[default]
    Min,
    /// Product of both amplitudes (older model)
    Product,
}

impl AmplitudeModel {
    #[inline]
    pub fn combine(self, a1: f64, a2: f64) -> f64 {
        match self {
            AmplitudeModel::Min => a1.min(a2),
            AmplitudeModel::Product => a1 * a2,
        }
    }

    /// `Min` when `use_min` is set, `Product` otherwise.
    pub fn from_min_flag(use_min: bool) -> Self {
        if use_min {
            AmplitudeModel::Min
        } else {
            AmplitudeModel::Product
        }
    }
}

impl FromStr for AmplitudeModel {
    type Err = DissonanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "min" => Ok(AmplitudeModel::Min),
            "product" => Ok(AmplitudeModel::Product),
            _ => Err(DissonanceError::InvalidModel(s.to_string())),
        }
    }
}

impl fmt::Display for AmplitudeModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AmplitudeModel::Min => f.write_str("min"),
            AmplitudeModel::Product => f.write_str("product"),
        }
    }
}

/// Critical band scaling at the lower frequency of a pair.
#[inline]
pub fn band_scale(f_low: f64) -> f64 {
    DSTAR / (S1 * f_low + S2)
}

/// Roughness curve at a scaled distance, before amplitude weighting.
#[inline]
pub fn curve(x: f64) -> f64 {
    C1 * (A1 * x).exp() + C2 * (A2 * x).exp()
}

/// Roughness of one partial pair. `low.frequency <= high.frequency` is expected;
/// the distance is taken as given.
#[inline]
pub fn roughness(low: Partial, high: Partial, model: AmplitudeModel) -> f64 {
    let s = band_scale(low.frequency);
    let fdif = high.frequency - low.frequency;
    model.combine(low.amplitude, high.amplitude) * curve(s * fdif)
}

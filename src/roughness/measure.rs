use ndarray::{Array1, Axis, Zip};

use super::kernel::{band_scale, curve, AmplitudeModel};
use crate::error::{DissonanceError, Result};
use crate::spectrum::{check_amplitudes, Partial};

/// Which unordered partial pairs enter the sum.
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PairPolicy {
    /// Upper triangle including the diagonal: every partial also pairs with itself.
    #[default]
    WithSelfPairs,
    /// Strict upper triangle: distinct partials only.
    DistinctOnly,
}

impl PairPolicy {
    fn diagonal_offset(self) -> usize {
        match self {
            PairPolicy::WithSelfPairs => 0,
            PairPolicy::DistinctOnly => 1,
        }
    }
}

/// One partial pair and what it contributed to the total.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairContribution {
    pub low: Partial,
    pub high: Partial,
    /// Beat amplitude after applying the amplitude model
    pub combined_amplitude: f64,
    pub roughness: f64,
}

impl PairContribution {
    /// Frequency ratio `high / low` of the pair.
    pub fn ratio(&self) -> f64 {
        self.high.frequency / self.low.frequency
    }

    pub fn is_self_pair(&self) -> bool {
        self.low.frequency == self.high.frequency
    }
}

/// Total dissonance of a spectrum and the pairs it was summed over.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Measurement {
    pub dissonance: f64,
    pub pairs: Vec<PairContribution>,
}

impl Measurement {
    /// Measurement of silence: no pairs, no dissonance.
    pub fn silent() -> Self {
        Self::default()
    }

    /// Pairs ordered from roughest to smoothest.
    pub fn roughest_pairs(&self) -> Vec<PairContribution> {
        let mut pairs = self.pairs.clone();
        pairs.sort_by(|a, b| b.roughness.total_cmp(&a.roughness));
        pairs
    }
}

/// Sethares sensory dissonance of a combined spectrum.
///
/// The spectrum is sorted by frequency, partials sharing an exact frequency are
/// merged by summing their amplitudes, and the roughness kernel is summed over
/// every unordered pair of the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DissonanceMeasure {
    pub model: AmplitudeModel,
    pub pairs: PairPolicy,
}

impl DissonanceMeasure {
    pub fn new(model: AmplitudeModel) -> Self {
        Self {
            model,
            pairs: PairPolicy::default(),
        }
    }

    pub fn with_pairs(mut self, pairs: PairPolicy) -> Self {
        self.pairs = pairs;
        self
    }

    /// Dissonance of parallel frequency and amplitude sequences.
    pub fn measure(&self, frequencies: &[f64], amplitudes: &[f64]) -> Result<Measurement> {
        if frequencies.len() != amplitudes.len() {
            return Err(DissonanceError::AmplitudeLengthMismatch {
                expected: frequencies.len(),
                actual: amplitudes.len(),
            });
        }
        check_amplitudes(amplitudes)?;
        let partials: Vec<Partial> = frequencies
            .iter()
            .zip(amplitudes)
            .map(|(&f, &a)| Partial::new(f, a))
            .collect();
        Ok(self.measure_partials(&partials))
    }

    pub fn measure_partials(&self, partials: &[Partial]) -> Measurement {
        let pairs = self.pair_contributions(partials);
        let dissonance = pairs.iter().map(|p| p.roughness).sum::<f64>();
        Measurement { dissonance, pairs }
    }

    /// Kernel roughness of every pair of the merged spectrum, low pair index first.
    pub fn pair_contributions(&self, partials: &[Partial]) -> Vec<PairContribution> {
        let merged = merge_partials(partials);
        if merged.is_empty() {
            return Vec::new();
        }

        let (lo, hi) = triangle_indices(merged.len(), self.pairs.diagonal_offset());
        if lo.is_empty() {
            return Vec::new();
        }

        let freqs: Array1<f64> = merged.iter().map(|p| p.frequency).collect();
        let amps: Array1<f64> = merged.iter().map(|p| p.amplitude).collect();

        let f_low = freqs.select(Axis(0), &lo);
        let f_high = freqs.select(Axis(0), &hi);
        let a_low = amps.select(Axis(0), &lo);
        let a_high = amps.select(Axis(0), &hi);

        let x = f_low.mapv(band_scale) * (&f_high - &f_low);
        let beat = match self.model {
            AmplitudeModel::Min => Zip::from(&a_low)
                .and(&a_high)
                .map_collect(|&l, &h| l.min(h)),
            AmplitudeModel::Product => &a_low * &a_high,
        };
        let roughness = &beat * &x.mapv(curve);

        lo.iter()
            .zip(&hi)
            .enumerate()
            .map(|(k, (&i, &j))| PairContribution {
                low: merged[i],
                high: merged[j],
                combined_amplitude: beat[k],
                roughness: roughness[k],
            })
            .collect()
    }
}

/// Stable sort by frequency, then collapse exact duplicate frequencies into one
/// partial carrying the summed amplitude.
pub fn merge_partials(partials: &[Partial]) -> Vec<Partial> {
    let mut sorted = partials.to_vec();
    sorted.sort_by(|a, b| a.frequency.total_cmp(&b.frequency));

    let mut merged: Vec<Partial> = Vec::with_capacity(sorted.len());
    for partial in sorted {
        match merged.last_mut() {
            Some(last) if last.frequency == partial.frequency => {
                last.amplitude += partial.amplitude;
            }
            _ => merged.push(partial),
        }
    }
    merged
}

/// Row/column indices of the upper triangle of an `n × n` matrix starting at
/// diagonal `offset`, in row-major order.
fn triangle_indices(n: usize, offset: usize) -> (Vec<usize>, Vec<usize>) {
    let mut rows = Vec::new();
    let mut cols = Vec::new();
    for i in 0..n {
        for j in (i + offset)..n {
            rows.push(i);
            cols.push(j);
        }
    }
    (rows, cols)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn measure() -> DissonanceMeasure {
        DissonanceMeasure::default()
    }

    #[test]
    fn triangle_includes_diagonal() {
        let (rows, cols) = triangle_indices(3, 0);
        assert_eq!(rows, vec![0, 0, 0, 1, 1, 2]);
        assert_eq!(cols, vec![0, 1, 2, 1, 2, 2]);

        let (rows, cols) = triangle_indices(3, 1);
        assert_eq!(rows, vec![0, 0, 1]);
        assert_eq!(cols, vec![1, 2, 2]);
    }

    #[test]
    fn duplicates_are_merged() {
        let merged = merge_partials(&[
            Partial::new(880.0, 0.5),
            Partial::new(440.0, 1.0),
            Partial::new(880.0, 0.25),
        ]);
        assert_eq!(
            merged,
            vec![Partial::new(440.0, 1.0), Partial::new(880.0, 0.75)]
        );
    }

    #[test]
    fn single_frequency_yields_one_self_pair() {
        let m = measure()
            .measure(&[440.0, 440.0], &[1.0, 1.0])
            .unwrap();
        assert_eq!(m.pairs.len(), 1);
        assert!(m.pairs[0].is_self_pair());
        assert_eq!(m.pairs[0].low.amplitude, 2.0);
        assert_eq!(m.dissonance, 0.0);

        let distinct = measure()
            .with_pairs(PairPolicy::DistinctOnly)
            .measure(&[440.0], &[1.0])
            .unwrap();
        assert!(distinct.pairs.is_empty());
        assert_eq!(distinct.dissonance, 0.0);
    }

    #[test]
    fn two_partials() {
        let m = measure().measure(&[450.0, 440.0], &[1.0, 1.0]).unwrap();
        assert_eq!(m.pairs.len(), 3);
        assert!((m.dissonance - 0.645_574_149).abs() < 1e-6);
        // Self pairs never add roughness, so both policies agree
        let distinct = measure()
            .with_pairs(PairPolicy::DistinctOnly)
            .measure(&[450.0, 440.0], &[1.0, 1.0])
            .unwrap();
        assert_eq!(distinct.pairs.len(), 1);
        assert!((m.dissonance - distinct.dissonance).abs() < 1e-12);
    }

    #[test]
    fn invariant_under_reordering() {
        let freqs = [261.6, 523.2, 329.6, 659.2, 392.0, 784.0];
        let amps = [1.0, 0.88, 1.0, 0.88, 1.0, 0.88];
        let forward = measure().measure(&freqs, &amps).unwrap();

        let mut reversed_f = freqs;
        let mut reversed_a = amps;
        reversed_f.reverse();
        reversed_a.reverse();
        let reversed = measure().measure(&reversed_f, &reversed_a).unwrap();

        assert_eq!(forward.dissonance, reversed.dissonance);
        assert_eq!(forward.pairs, reversed.pairs);
    }

    #[test]
    fn product_model_differs() {
        let freqs = [440.0, 466.16];
        let amps = [0.5, 0.5];
        let min = DissonanceMeasure::new(AmplitudeModel::Min)
            .measure(&freqs, &amps)
            .unwrap();
        let product = DissonanceMeasure::new(AmplitudeModel::Product)
            .measure(&freqs, &amps)
            .unwrap();
        assert!((product.dissonance - 0.5 * min.dissonance).abs() < 1e-12);
    }

    #[test]
    fn mismatched_lengths() {
        assert_eq!(
            measure().measure(&[440.0, 880.0], &[1.0]),
            Err(DissonanceError::AmplitudeLengthMismatch {
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn negative_amplitudes_rejected() {
        assert!(matches!(
            measure().measure(&[440.0, 450.0], &[1.0, -1.0]),
            Err(DissonanceError::InvalidParameter { name: "amplitude", .. })
        ));
    }

    #[test]
    fn empty_spectrum_is_silent() {
        assert_eq!(measure().measure(&[], &[]).unwrap(), Measurement::silent());
    }

    #[test]
    fn roughest_pairs_first() {
        let m = measure()
            .measure(&[440.0, 450.0, 880.0], &[1.0, 1.0, 1.0])
            .unwrap();
        let ranked = m.roughest_pairs();
        assert_eq!(ranked[0].low.frequency, 440.0);
        assert_eq!(ranked[0].high.frequency, 450.0);
        assert!((ranked[0].ratio() - 450.0 / 440.0).abs() < 1e-12);
    }
}

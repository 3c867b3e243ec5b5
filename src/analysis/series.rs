use crate::roughness::PairContribution;

/// Dissonance at one point of a ratio axis or a score timeline.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct DissonanceSample {
    /// Frequency ratio (curves) or measure / time position (timelines)
    pub position: f64,
    pub dissonance: f64,
    /// Pairs the value was summed over
    pub pairs: Vec<PairContribution>,
    /// Number of sounding notes, for chord samples
    pub chord_size: Option<usize>,
    /// Pitch labels of the chord notes, for chord samples
    pub labels: Vec<String>,
}

impl DissonanceSample {
    pub fn new(position: f64, dissonance: f64) -> Self {
        Self {
            position,
            dissonance,
            pairs: Vec::new(),
            chord_size: None,
            labels: Vec::new(),
        }
    }

    pub fn with_pairs(mut self, pairs: Vec<PairContribution>) -> Self {
        self.pairs = pairs;
        self
    }

    pub fn with_chord(mut self, chord_size: usize, labels: Vec<String>) -> Self {
        self.chord_size = Some(chord_size);
        self.labels = labels;
        self
    }
}

/// Ordered dissonance samples. Order is ratio or time order and never changes
/// after construction.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DissonanceSeries {
    samples: Vec<DissonanceSample>,
}

impl DissonanceSeries {
    pub fn samples(&self) -> &[DissonanceSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DissonanceSample> {
        self.samples.iter()
    }

    pub fn positions(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.position).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.dissonance).collect()
    }

    /// Mean over samples with a defined (non-NaN) dissonance
    pub fn mean(&self) -> Option<f64> {
        mean(self.samples.iter().map(|s| s.dissonance))
    }

    pub fn min(&self) -> Option<&DissonanceSample> {
        self.defined()
            .min_by(|a, b| a.dissonance.total_cmp(&b.dissonance))
    }

    pub fn max(&self) -> Option<&DissonanceSample> {
        self.defined()
            .max_by(|a, b| a.dissonance.total_cmp(&b.dissonance))
    }

    /// Sample whose position is closest to `position`.
    pub fn nearest(&self, position: f64) -> Option<&DissonanceSample> {
        self.samples.iter().min_by(|a, b| {
            (a.position - position)
                .abs()
                .total_cmp(&(b.position - position).abs())
        })
    }

    pub fn into_samples(self) -> Vec<DissonanceSample> {
        self.samples
    }

    fn defined(&self) -> impl Iterator<Item = &DissonanceSample> {
        self.samples.iter().filter(|s| !s.dissonance.is_nan())
    }
}

impl From<Vec<DissonanceSample>> for DissonanceSeries {
    fn from(samples: Vec<DissonanceSample>) -> Self {
        Self { samples }
    }
}

impl FromIterator<DissonanceSample> for DissonanceSeries {
    fn from_iter<I: IntoIterator<Item = DissonanceSample>>(iter: I) -> Self {
        Self {
            samples: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a DissonanceSeries {
    type Item = &'a DissonanceSample;
    type IntoIter = std::slice::Iter<'a, DissonanceSample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

/// Arithmetic mean ignoring NaN values; `None` when nothing is defined.
pub(crate) fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values
        .filter(|v| !v.is_nan())
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

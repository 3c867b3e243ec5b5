use ndarray::Array2;
use tracing::debug;

use super::chord::ChordDissonance;
use crate::config::SpectrumConfig;
use crate::error::{DissonanceError, Result};
use crate::parallel::try_map_ordered;
use crate::score::ChordNotes;

/// Dissonance of one ordered note pair of a chord.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct DyadRow {
    pub base_frequency: f64,
    pub target_frequency: f64,
    pub base_label: String,
    pub target_label: String,
    pub dissonance: f64,
}

/// Target × base frequency grid of dyad dissonance.
///
/// Rows are target frequencies and columns base frequencies, both ascending.
/// Cells without a dyad above the threshold are `None`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct DyadMatrix {
    pub base_frequencies: Vec<f64>,
    pub target_frequencies: Vec<f64>,
    pub values: Array2<Option<f64>>,
}

impl DyadMatrix {
    fn from_rows(rows: &[DyadRow]) -> Self {
        let base_frequencies = sorted_unique(rows.iter().map(|r| r.base_frequency));
        let target_frequencies = sorted_unique(rows.iter().map(|r| r.target_frequency));

        let mut values = Array2::from_elem((target_frequencies.len(), base_frequencies.len()), None);
        for row in rows {
            let (Some(r), Some(c)) = (
                index_of(&target_frequencies, row.target_frequency),
                index_of(&base_frequencies, row.base_frequency),
            ) else {
                continue;
            };
            // Repeated notes give identical dyads; the first one wins
            values[[r, c]].get_or_insert(row.dissonance);
        }

        Self {
            base_frequencies,
            target_frequencies,
            values,
        }
    }

    pub fn get(&self, base_frequency: f64, target_frequency: f64) -> Option<f64> {
        let r = index_of(&self.target_frequencies, target_frequency)?;
        let c = index_of(&self.base_frequencies, base_frequency)?;
        self.values[[r, c]]
    }

    /// `(rows, columns)`
    pub fn shape(&self) -> (usize, usize) {
        self.values.dim()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Dyad table, matrix and whole-chord summary of one chord.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct DyadHeatmap {
    /// Dyads above the threshold, base note order then target note order
    pub rows: Vec<DyadRow>,
    pub matrix: DyadMatrix,
    /// Sum over every ordered dyad, before thresholding
    pub total_dissonance: f64,
}

/// Builds pairwise note-to-note dissonance heatmaps for a chord.
#[derive(Debug, Clone)]
pub struct DyadHeatmapBuilder {
    engine: ChordDissonance,
    threshold: f64,
}

impl DyadHeatmapBuilder {
    pub const DEFAULT_THRESHOLD: f64 = 0.1;

    pub fn new(spectrum: SpectrumConfig) -> Self {
        Self::with_engine(ChordDissonance::new(spectrum))
    }

    /// Measure each dyad with an existing chord engine
    pub fn with_engine(engine: ChordDissonance) -> Self {
        Self {
            engine,
            threshold: Self::DEFAULT_THRESHOLD,
        }
    }

    /// Dyads at or below `threshold` are left out of the matrix
    pub fn threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn build<C: ChordNotes + ?Sized>(&self, chord: &C) -> Result<DyadHeatmap> {
        if !(self.threshold >= 0.0) {
            return Err(DissonanceError::invalid(
                "dissonance_threshold",
                format!("must be non-negative, got {}", self.threshold),
            ));
        }

        let fundamentals = chord.fundamentals();
        let labels = chord.labels();
        let n = fundamentals.len();

        // (a, b) and (b, a) share a spectrum, so each unordered dyad is measured once
        let unordered: Vec<(usize, usize)> = (0..n)
            .flat_map(|i| ((i + 1)..n).map(move |j| (i, j)))
            .collect();
        let measured = try_map_ordered(&unordered, |&(i, j)| {
            self.engine
                .dissonance(&[fundamentals[i], fundamentals[j]][..])
        })?;

        let mut grid = vec![vec![0.0; n]; n];
        for (&(i, j), &d) in unordered.iter().zip(&measured) {
            grid[i][j] = d;
            grid[j][i] = d;
        }

        let mut all_rows = Vec::with_capacity(n * n.saturating_sub(1));
        for base in 0..n {
            for target in (0..n).filter(|&t| t != base) {
                all_rows.push(DyadRow {
                    base_frequency: fundamentals[base],
                    target_frequency: fundamentals[target],
                    base_label: labels.get(base).cloned().unwrap_or_default(),
                    target_label: labels.get(target).cloned().unwrap_or_default(),
                    dissonance: grid[base][target],
                });
            }
        }

        let total_dissonance = all_rows.iter().map(|r| r.dissonance).sum();
        let rows: Vec<DyadRow> = all_rows
            .into_iter()
            .filter(|r| r.dissonance > self.threshold)
            .collect();
        let matrix = DyadMatrix::from_rows(&rows);

        debug!(
            notes = n,
            kept = rows.len(),
            total = total_dissonance,
            "dyad heatmap built"
        );

        Ok(DyadHeatmap {
            rows,
            matrix,
            total_dissonance,
        })
    }
}

impl Default for DyadHeatmapBuilder {
    fn default() -> Self {
        Self::new(SpectrumConfig::default())
    }
}

fn sorted_unique(values: impl Iterator<Item = f64>) -> Vec<f64> {
    let mut values: Vec<f64> = values.collect();
    values.sort_by(f64::total_cmp);
    values.dedup();
    values
}

fn index_of(sorted: &[f64], value: f64) -> Option<usize> {
    sorted.binary_search_by(|v| v.total_cmp(&value)).ok()
}

//! Text and JSON rendering of analysis results

use std::collections::BTreeMap;

use color_eyre::eyre::Result;
use serde::Serialize;

use sethares_dsp::analysis::InterpolatedSeries;
use sethares_dsp::io::frequency_to_pitch;
use sethares_dsp::{
    ChordNotes, DissonanceCurve, DissonanceSeries, DyadHeatmap, Measurement, PairContribution,
};

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn label(frequency: f64) -> String {
    frequency_to_pitch(frequency)
        .map(|p| p.to_string())
        .unwrap_or_else(|| "?".to_string())
}

/* Curve ==================================================================== */

#[derive(Serialize)]
pub struct CurveReport {
    fundamental: f64,
    num_partials: usize,
    ratios: Vec<f64>,
    dissonance: Vec<f64>,
    notable_intervals: Vec<IntervalReport>,
}

#[derive(Serialize)]
struct IntervalReport {
    interval: String,
    ratio: f64,
    dissonance: Option<f64>,
}

impl CurveReport {
    pub fn new(curve: &DissonanceCurve) -> Self {
        let notable_intervals = curve
            .notable_intervals
            .iter()
            .map(|&interval| IntervalReport {
                interval: interval.to_string(),
                ratio: interval.ratio(),
                dissonance: curve.at_interval(interval).map(|s| s.dissonance),
            })
            .collect();
        Self {
            fundamental: curve.fundamental,
            num_partials: curve.num_partials,
            ratios: curve.series.positions(),
            dissonance: curve.series.values(),
            notable_intervals,
        }
    }

    pub fn print_text(&self, every: usize) {
        println!(
            "dissonance curve: f0 = {} Hz, {} partials, {} steps",
            self.fundamental,
            self.num_partials,
            self.ratios.len()
        );
        println!();
        println!("{:>10}  {:>12}", "ratio", "dissonance");
        let every = every.max(1);
        for (i, (ratio, d)) in self.ratios.iter().zip(&self.dissonance).enumerate() {
            if i % every == 0 || i + 1 == self.ratios.len() {
                println!("{ratio:>10.4}  {d:>12.6}");
            }
        }
        println!();
        println!("{:>10}  {:>10}  {:>12}", "interval", "ratio", "dissonance");
        for interval in &self.notable_intervals {
            let d = interval
                .dissonance
                .map(|d| format!("{d:.6}"))
                .unwrap_or_else(|| "-".to_string());
            println!("{:>10}  {:>10.4}  {:>12}", interval.interval, interval.ratio, d);
        }
    }
}

/* Chord ==================================================================== */

#[derive(Serialize)]
pub struct ChordReport {
    notes: Vec<String>,
    frequencies: Vec<f64>,
    dissonance: f64,
    pair_count: usize,
    roughest_pairs: Vec<PairReport>,
}

#[derive(Serialize)]
struct PairReport {
    low_frequency: f64,
    low_label: String,
    high_frequency: f64,
    high_label: String,
    ratio: f64,
    roughness: f64,
}

impl PairReport {
    fn new(pair: &PairContribution) -> Self {
        Self {
            low_frequency: pair.low.frequency,
            low_label: label(pair.low.frequency),
            high_frequency: pair.high.frequency,
            high_label: label(pair.high.frequency),
            ratio: pair.ratio(),
            roughness: pair.roughness,
        }
    }
}

impl ChordReport {
    pub fn new<C: ChordNotes + ?Sized>(chord: &C, measurement: &Measurement, top: usize) -> Self {
        Self {
            notes: chord.labels(),
            frequencies: chord.fundamentals(),
            dissonance: measurement.dissonance,
            pair_count: measurement.pairs.len(),
            roughest_pairs: measurement
                .roughest_pairs()
                .iter()
                .take(top)
                .map(PairReport::new)
                .collect(),
        }
    }

    pub fn print_text(&self) {
        println!("chord: {}", self.notes.join(" "));
        println!("dissonance: {:.6} over {} partial pairs", self.dissonance, self.pair_count);
        if self.roughest_pairs.is_empty() {
            return;
        }
        println!();
        println!(
            "{:>10}  {:>10}  {:>9}  {:>9}  {:>8}  {:>10}",
            "low Hz", "high Hz", "low", "high", "ratio", "roughness"
        );
        for pair in &self.roughest_pairs {
            println!(
                "{:>10.2}  {:>10.2}  {:>9}  {:>9}  {:>8.4}  {:>10.6}",
                pair.low_frequency,
                pair.high_frequency,
                pair.low_label,
                pair.high_label,
                pair.ratio,
                pair.roughness
            );
        }
    }
}

/* Heatmap ================================================================== */

pub fn print_heatmap(heatmap: &DyadHeatmap) {
    let mut labels = BTreeMap::new();
    for row in &heatmap.rows {
        labels.insert(row.base_frequency.to_bits(), row.base_label.clone());
        labels.insert(row.target_frequency.to_bits(), row.target_label.clone());
    }
    let name = |f: f64| labels.get(&f.to_bits()).cloned().unwrap_or_else(|| label(f));

    let matrix = &heatmap.matrix;
    print!("{:>8}", "");
    for &base in &matrix.base_frequencies {
        print!("  {:>8}", name(base));
    }
    println!();
    for (r, &target) in matrix.target_frequencies.iter().enumerate() {
        print!("{:>8}", name(target));
        for c in 0..matrix.base_frequencies.len() {
            match matrix.values[[r, c]] {
                Some(d) => print!("  {d:>8.4}"),
                None => print!("  {:>8}", "-"),
            }
        }
        println!();
    }
    println!();
    println!("total dissonance: {:.6}", heatmap.total_dissonance);
}

/* Timeline ================================================================= */

#[derive(Serialize)]
pub struct TimelineReport<'a> {
    measures: usize,
    mean: Option<f64>,
    chords: &'a DissonanceSeries,
    interpolated: &'a InterpolatedSeries,
}

impl<'a> TimelineReport<'a> {
    pub fn new(
        measures: usize,
        chords: &'a DissonanceSeries,
        interpolated: &'a InterpolatedSeries,
    ) -> Self {
        Self {
            measures,
            mean: chords.mean(),
            chords,
            interpolated,
        }
    }

    pub fn print_text(&self) {
        println!(
            "{} chords over {} measures, mean dissonance {}",
            self.chords.len(),
            self.measures,
            self.mean.map(|m| format!("{m:.6}")).unwrap_or_else(|| "-".into())
        );
        println!();
        println!(
            "{:>8}  {:>12}  {:>12}  {:>10}  {:>7}",
            "position", "range", "dissonance", "notes", "chords"
        );
        for point in self.interpolated.points() {
            let d = point
                .dissonance
                .map(|d| format!("{d:.6}"))
                .unwrap_or_else(|| "-".into());
            let size = point
                .chord_size_mean
                .map(|s| format!("{s:.2}"))
                .unwrap_or_else(|| "-".into());
            println!(
                "{:>8.1}  {:>12}  {:>12}  {:>10}  {:>7}",
                point.position,
                format!("{}..{}", point.start, point.stop),
                d,
                size,
                point.sample_count
            );
        }
    }
}

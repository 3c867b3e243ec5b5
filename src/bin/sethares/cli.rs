//! Command-line arguments and input files

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::{eyre, Result, WrapErr};
use serde::Deserialize;

use sethares_dsp::{
    AmplitudeModel, Chord, ChordTimeline, CurveGenerator, DyadHeatmapBuilder, PairPolicy,
    SpectrumConfig, SpectrumSettings,
};

#[derive(Parser)]
#[command(name = "sethares")]
#[command(about = "Sensory dissonance of spectra, chords and scores", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Print JSON instead of text tables
    #[arg(long, global = true)]
    pub json: bool,

    /// Log at debug level unless RUST_LOG is set
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Sweep the frequency ratio between two copies of a harmonic tone
    Curve {
        /// Fundamental frequency in Hz
        #[arg(short, long, default_value_t = 440.0)]
        fundamental: f64,

        #[arg(long, default_value_t = CurveGenerator::DEFAULT_RATIO_LOW)]
        low: f64,

        #[arg(long, default_value_t = CurveGenerator::DEFAULT_RATIO_HIGH)]
        high: f64,

        #[arg(long, default_value_t = CurveGenerator::DEFAULT_RATIO_STEP)]
        step: f64,

        /// Print every n-th sample in the text table
        #[arg(long, default_value_t = 50)]
        every: usize,

        #[command(flatten)]
        spectrum: SpectrumArgs,
    },

    /// Dissonance of one chord, e.g. `chord C3 E3 G3`
    Chord {
        #[arg(required = true)]
        pitches: Vec<String>,

        /// Number of roughest partial pairs to list
        #[arg(long, default_value_t = 5)]
        top: usize,

        #[command(flatten)]
        spectrum: SpectrumArgs,
    },

    /// Note-to-note dissonance matrix of one chord
    Heatmap {
        #[arg(required = true)]
        pitches: Vec<String>,

        /// Dyads at or below this value are left out
        #[arg(long, default_value_t = DyadHeatmapBuilder::DEFAULT_THRESHOLD)]
        threshold: f64,

        #[command(flatten)]
        spectrum: SpectrumArgs,
    },

    /// Chord series of a score file, reduced to a few points
    Timeline {
        /// JSON file: {"measures": 8, "chords": [{"position": 1, "pitches": ["C4", "E4"]}]}
        file: PathBuf,

        #[arg(short, long, default_value_t = 10)]
        points: usize,

        #[command(flatten)]
        spectrum: SpectrumArgs,
    },
}

/// Spectrum options shared by every subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct SpectrumArgs {
    /// JSON file with spectrum settings; flags below override it
    #[arg(long, value_name = "FILE")]
    settings: Option<PathBuf>,

    /// Partials per tone
    #[arg(long)]
    partials: Option<usize>,

    /// Geometric amplitude decay per partial
    #[arg(long)]
    decay: Option<f64>,

    /// Amplitude model: min or product
    #[arg(long)]
    model: Option<AmplitudeModel>,

    /// Leave self pairs out of the sum
    #[arg(long)]
    distinct_only: bool,
}

impl SpectrumArgs {
    pub fn resolve(&self) -> Result<SpectrumConfig> {
        let mut settings = match &self.settings {
            Some(path) => read_json::<SpectrumSettings>(path)?,
            None => SpectrumSettings::default(),
        };
        if let Some(partials) = self.partials {
            settings.num_partials = partials;
        }
        if let Some(decay) = self.decay {
            settings.decay = decay;
        }
        if let Some(model) = self.model {
            settings.model = model;
        }
        if self.distinct_only {
            settings.pairs = PairPolicy::DistinctOnly;
        }

        let config = SpectrumConfig::from(settings);
        config.validate()?;
        Ok(config)
    }
}

/// Score file read by the `timeline` subcommand.
#[derive(Debug, Deserialize)]
pub struct TimelineFile {
    #[serde(default)]
    measures: Option<usize>,
    chords: Vec<TimelineEntry>,
}

#[derive(Debug, Deserialize)]
struct TimelineEntry {
    position: f64,
    pitches: Vec<String>,
}

impl TimelineFile {
    pub fn load(path: &Path) -> Result<ChordTimeline> {
        read_json::<TimelineFile>(path)?.into_timeline()
    }

    fn into_timeline(self) -> Result<ChordTimeline> {
        // Without an explicit count the last chord's measure closes the score
        let measures = self.measures.unwrap_or_else(|| {
            self.chords
                .iter()
                .map(|c| c.position.floor().max(0.0) as usize)
                .max()
                .unwrap_or(0)
        });

        let mut timeline = ChordTimeline::new(measures);
        for entry in self.chords {
            if !entry.position.is_finite() {
                return Err(eyre!("chord position must be finite, got {}", entry.position));
            }
            let chord = Chord::from_pitches(&entry.pitches)
                .wrap_err_with(|| format!("bad chord at position {}", entry.position))?;
            timeline.push(entry.position, chord);
        }
        Ok(timeline)
    }
}

pub fn parse_chord(pitches: &[String]) -> Result<Chord> {
    Ok(Chord::from_pitches(pitches)?)
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).wrap_err_with(|| format!("failed to parse {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sethares_dsp::{ChordNotes, ScoreChords};

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "sethares", "chord", "C4", "E4", "--partials", "3", "--model", "product",
            "--distinct-only",
        ])
        .unwrap();
        let Command::Chord { pitches, spectrum, .. } = cli.command else {
            panic!("expected chord subcommand");
        };
        assert_eq!(pitches, vec!["C4", "E4"]);
        let config = spectrum.resolve().unwrap();
        assert_eq!(config.num_partials, 3);
        assert_eq!(config.measure.model, AmplitudeModel::Product);
        assert_eq!(config.measure.pairs, PairPolicy::DistinctOnly);
    }

    #[test]
    fn unknown_model_is_rejected() {
        assert!(Cli::try_parse_from(["sethares", "chord", "C4", "--model", "max"]).is_err());
    }

    #[test]
    fn timeline_file_builds_sorted_timeline() {
        let file: TimelineFile = serde_json::from_str(
            r#"{"chords": [
                {"position": 3, "pitches": ["G4"]},
                {"position": 1.5, "pitches": ["C4", "E4", "G4"]}
            ]}"#,
        )
        .unwrap();
        let timeline = file.into_timeline().unwrap();
        assert_eq!(timeline.measure_count(), 3);
        let chords = timeline.chords();
        assert_eq!(chords[0].0, 1.5);
        assert_eq!(chords[0].1.size(), 3);
    }

    #[test]
    fn timeline_file_reports_bad_pitch() {
        let file: TimelineFile =
            serde_json::from_str(r#"{"measures": 2, "chords": [{"position": 1, "pitches": ["H4"]}]}"#)
                .unwrap();
        assert!(file.into_timeline().is_err());
    }
}

//! sethares - sensory dissonance from the command line
//!
//! Run with: cargo run -- chord C4 E4 G4

mod cli;
mod report;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cli::{parse_chord, Cli, Command, TimelineFile};
use report::{print_heatmap, print_json, ChordReport, CurveReport, TimelineReport};
use sethares_dsp::{
    ChordDissonance, CurveGenerator, DyadHeatmapBuilder, ScoreChords, TimelineAggregator,
};

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    run(cli)
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Curve {
            fundamental,
            low,
            high,
            step,
            every,
            spectrum,
        } => {
            let curve = CurveGenerator::new(fundamental)
                .spectrum(spectrum.resolve()?)
                .ratio_range(low, high)
                .step(step)
                .generate()?;
            let report = CurveReport::new(&curve);
            if cli.json {
                print_json(&report)?;
            } else {
                report.print_text(every);
            }
        }

        Command::Chord {
            pitches,
            top,
            spectrum,
        } => {
            let chord = parse_chord(&pitches)?;
            let measurement = ChordDissonance::new(spectrum.resolve()?).measure(&chord)?;
            let report = ChordReport::new(&chord, &measurement, top);
            if cli.json {
                print_json(&report)?;
            } else {
                report.print_text();
            }
        }

        Command::Heatmap {
            pitches,
            threshold,
            spectrum,
        } => {
            let chord = parse_chord(&pitches)?;
            let heatmap = DyadHeatmapBuilder::new(spectrum.resolve()?)
                .threshold(threshold)
                .build(&chord)?;
            if cli.json {
                print_json(&heatmap)?;
            } else {
                print_heatmap(&heatmap);
            }
        }

        Command::Timeline {
            file,
            points,
            spectrum,
        } => {
            let timeline = TimelineFile::load(&file)?;
            info!(chords = timeline.entries.len(), path = %file.display(), "score loaded");
            let series = ChordDissonance::new(spectrum.resolve()?).series(&timeline)?;
            let interpolated = TimelineAggregator::new(points).interpolate(&series)?;
            let report = TimelineReport::new(timeline.measure_count(), &series, &interpolated);
            if cli.json {
                print_json(&report)?;
            } else {
                report.print_text();
            }
        }
    }
    Ok(())
}

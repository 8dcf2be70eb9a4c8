use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;

use promo_slideshow::constants::DEFAULT_STEP_DURATION;
use promo_slideshow::definition::SlideshowDefinition;
use promo_slideshow::simulate::{SimulationOptions, simulate};

#[derive(Parser)]
#[command(version, about = "Promo slideshow player")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Open a window and play a slideshow
    Play {
        /// Slideshow definition (TOML)
        #[arg(required_unless_present = "dir")]
        definition: Option<PathBuf>,

        /// Play every picture of a directory instead of a definition file
        #[arg(long, conflicts_with = "definition")]
        dir: Option<PathBuf>,

        /// Seconds per picture when playing a directory
        #[arg(long, default_value_t = DEFAULT_STEP_DURATION)]
        duration: u32,
    },
    /// Play a slideshow headless on a virtual clock and print a report
    Simulate {
        definition: PathBuf,

        #[arg(long, default_value_t = 0)]
        seed: u64,

        /// Upper bound of the simulated content latency, in seconds
        #[arg(long, default_value_t = 0.5)]
        max_latency: f32,

        /// Tap the page at this virtual time, in seconds (repeatable)
        #[arg(long = "tap-at", value_name = "SECS")]
        taps: Vec<f32>,
    },
}

fn load_definition(definition: Option<PathBuf>, dir: Option<PathBuf>, duration: u32) -> Result<SlideshowDefinition> {
    match (definition, dir) {
        (_, Some(dir)) => SlideshowDefinition::from_directory(&dir, duration)
            .with_context(|| format!("Failed to build slideshow from {}", dir.display())),
        (Some(path), None) => SlideshowDefinition::load(&path)
            .with_context(|| format!("Failed to load slideshow definition {}", path.display())),
        (None, None) => anyhow::bail!("either a definition file or --dir is required"),
    }
}

#[cfg(feature = "viewer")]
fn play(definition: &SlideshowDefinition) -> Result<()> {
    promo_slideshow::viewer::run(definition)
}

#[cfg(not(feature = "viewer"))]
fn play(_definition: &SlideshowDefinition) -> Result<()> {
    anyhow::bail!("built without the `viewer` feature")
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Command::Play { definition, dir, duration } => {
            let definition = load_definition(definition, dir, duration)?;
            info!("playing {} steps", definition.steps.len());
            play(&definition)
        }
        Command::Simulate { definition, seed, max_latency, taps } => {
            let definition = load_definition(Some(definition), None, DEFAULT_STEP_DURATION)?;
            let options = SimulationOptions {
                seed,
                max_latency: Duration::from_secs_f32(max_latency.max(0.0)),
                taps: taps.into_iter().map(|t| Duration::from_secs_f32(t.max(0.0))).collect(),
                ..Default::default()
            };
            let report = simulate(&definition, &options)?;
            println!("Visited pages: {:?}", report.visited);
            println!("Taps delivered: {}, ignored: {}", report.taps_delivered, report.taps_ignored);
            println!("Progress updates: {}", report.progress_updates);
            println!("Elapsed: {:.2}s, completed: {}", report.elapsed.as_secs_f32(), report.completed);
            Ok(())
        }
    }
}

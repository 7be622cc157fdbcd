#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a Reef simulation and prints text frames.

use std::{
    fs, io,
    path::{Path, PathBuf},
    time::{SystemTime, UNIX_EPOCH},
};

use anyhow::{Context, Result};
use clap::Parser;
use reef_core::Census;
use reef_rendering::{Frame, RenderCadence, RenderingBackend, TextBackend};
use reef_system_population::{Halt, Simulation, SimulationConfig, LONG_RUN_STEPS};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Grid-based predator/prey ecosystem simulation.
#[derive(Debug, Parser)]
#[command(name = "reef-sim", version)]
struct Cli {
    /// TOML file with field dimensions and seeding probabilities
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of columns; overrides the config file
    #[arg(long)]
    width: Option<u32>,

    /// Number of rows; overrides the config file
    #[arg(long)]
    depth: Option<u32>,

    /// Maximum number of steps to simulate
    #[arg(long, default_value_t = LONG_RUN_STEPS)]
    steps: u64,

    /// Random seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Print a frame every this many steps
    #[arg(long, default_value_t = 100)]
    render_every: u64,

    /// Include the field glyphs in every frame
    #[arg(long)]
    grid: bool,
}

/// Entry point for the Reef command-line interface.
fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = build_config(&cli)?;
    let cadence = RenderCadence::new(cli.render_every)?;
    let seed = cli.seed.unwrap_or_else(clock_seed);
    info!(seed, depth = config.depth, width = config.width, "starting simulation");

    let mut simulation = Simulation::seeded(config, seed);
    let mut backend = TextBackend::new(io::stdout().lock());
    backend.present(&Frame::capture(&simulation, cli.grid))?;

    let mut remaining = cli.steps;
    while remaining > 0 {
        let summary = simulation.run(remaining.min(cadence.every()), Census::is_viable);
        remaining = remaining.saturating_sub(summary.steps);
        if summary.steps > 0 {
            backend.present(&Frame::capture(&simulation, cli.grid))?;
        }
        if summary.halt == Halt::NotViable {
            info!(step = simulation.step_count(), "fewer than two species remain");
            break;
        }
    }

    let census = simulation.census();
    info!(
        steps = simulation.step_count(),
        population = census.total(),
        species = census.species_present(),
        infected_total = simulation.infected_total(),
        "simulation finished"
    );
    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .try_init();
}

fn build_config(cli: &Cli) -> Result<SimulationConfig> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => SimulationConfig::default(),
    };
    if let Some(width) = cli.width {
        config.width = width;
    }
    if let Some(depth) = cli.depth {
        config.depth = depth;
    }
    let config = config.with_fallback_dimensions();
    config
        .validate()
        .context("invalid simulation configuration")?;
    Ok(config)
}

fn load_config(path: &Path) -> Result<SimulationConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("failed to parse config file {}", path.display()))
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs() ^ u64::from(elapsed.subsec_nanos()))
        .unwrap_or_default()
}

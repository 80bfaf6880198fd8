//! Driver binary for the Savanna simulation.
//!
//! Loads configuration, seeds a [`Simulator`], and runs it until the step
//! limit is reached or fewer than two species remain on the field.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration from the path given as the first argument, or
//!    `savanna-config.yaml` in the working directory
//! 3. Build the simulator from the configured seed and populate the field
//! 4. Run `run.steps` ticks, pacing them by `run.tick_delay_ms`
//! 5. Log the result and print it as JSON
//!
//! [`Simulator`]: savanna_core::Simulator

mod error;
mod render;

use std::path::PathBuf;

use savanna_core::runner;
use savanna_core::viability::SpeciesDiversity;
use savanna_core::{SimulationConfig, Simulator};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;
use crate::render::PacedReport;

/// Config file read when no path is given on the command line.
const DEFAULT_CONFIG_PATH: &str = "savanna-config.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded or the simulation
/// fails.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("savanna-engine starting");

    // 2. Load configuration.
    let config = load_config()?;
    info!(
        depth = config.world.depth,
        width = config.world.width,
        seed = config.world.seed,
        steps = config.run.steps,
        tick_delay_ms = config.run.tick_delay_ms,
        "Configuration loaded"
    );

    // 3. Build and populate the simulator.
    let mut simulator = Simulator::from_config(&config).map_err(EngineError::from)?;

    // 4. Run.
    let mut viability = SpeciesDiversity;
    let mut report = PacedReport::new(config.run.tick_delay_ms);
    let result = simulator
        .simulate_with_callback(config.run.steps, &mut viability, &mut report)
        .map_err(EngineError::from)?;

    // 5. Report.
    runner::log_simulation_end(&result);
    let json = serde_json::to_string_pretty(&result).map_err(EngineError::from)?;
    println!("{json}");

    info!("savanna-engine shut down");
    Ok(())
}

/// Load the simulation configuration.
///
/// Uses the first command-line argument as the config path when present.
/// A missing file at the default path falls back to built-in defaults; a
/// missing file at an explicit path is an error.
fn load_config() -> Result<SimulationConfig, EngineError> {
    let (config_path, explicit) = match std::env::args_os().nth(1) {
        Some(arg) => (PathBuf::from(arg), true),
        None => (PathBuf::from(DEFAULT_CONFIG_PATH), false),
    };

    if explicit || config_path.exists() {
        let config = SimulationConfig::from_file(&config_path)?;
        info!(path = %config_path.display(), "Config file loaded");
        Ok(config)
    } else {
        info!("Config file not found, using defaults");
        Ok(SimulationConfig::default())
    }
}

//! Configuration loading and typed config structures for the Savanna simulation.
//!
//! The canonical configuration lives in `savanna-config.yaml` at the project
//! root. This module defines strongly-typed structs that mirror the YAML
//! structure, and provides a loader that reads the file. Every key is
//! optional; a missing key falls back to the default shown below.
//!
//! ```yaml
//! world:
//!   depth: 80
//!   width: 120
//!   seed: 42
//! population:
//!   snake_creation_probability: 0.02
//!   rat_creation_probability: 0.08
//!   zebra_creation_probability: 0.26
//! species:
//!   rat: { breeding_age: 5, max_age: 40, breeding_probability: 0.12, max_litter_size: 4 }
//!   snake: { food_value: 9 }
//! run:
//!   steps: 4000
//!   tick_delay_ms: 0
//! ```

use std::path::Path;

use savanna_agents::SpeciesTable;
use savanna_agents::config::TraitOverrides;
use savanna_types::Species;
use serde::Deserialize;

/// Default grid depth (rows) used when none or an invalid one is configured.
pub const DEFAULT_DEPTH: usize = 80;

/// Default grid width (columns) used when none or an invalid one is configured.
pub const DEFAULT_WIDTH: usize = 120;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level simulation configuration.
///
/// Mirrors the structure of `savanna-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SimulationConfig {
    /// Grid size and random seed.
    #[serde(default)]
    pub world: WorldConfig,

    /// Initial population densities.
    #[serde(default)]
    pub population: PopulationConfig,

    /// Per-species life-cycle overrides.
    #[serde(default)]
    pub species: SpeciesConfig,

    /// Run length and pacing for the driver.
    #[serde(default)]
    pub run: RunConfig,
}

impl SimulationConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yml::from_str(yaml)?;
        Ok(config)
    }
}

/// Grid dimensions and seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct WorldConfig {
    /// Number of rows. Zero falls back to [`DEFAULT_DEPTH`].
    #[serde(default = "default_depth")]
    pub depth: usize,

    /// Number of columns. Zero falls back to [`DEFAULT_WIDTH`].
    #[serde(default = "default_width")]
    pub width: usize,

    /// Random seed for reproducibility.
    #[serde(default = "default_seed")]
    pub seed: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            depth: default_depth(),
            width: default_width(),
            seed: default_seed(),
        }
    }
}

impl WorldConfig {
    /// Whether both dimensions are usable.
    pub const fn has_valid_dimensions(&self) -> bool {
        self.depth > 0 && self.width > 0
    }
}

/// Per-cell creation probabilities for the initial population.
///
/// Each cell draws independently for snake, then rat, then zebra; the first
/// hit places that species.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct PopulationConfig {
    /// Probability that a cell starts with a snake.
    #[serde(default = "default_snake_creation_probability")]
    pub snake_creation_probability: f64,

    /// Probability that a cell starts with a rat.
    #[serde(default = "default_rat_creation_probability")]
    pub rat_creation_probability: f64,

    /// Probability that a cell starts with a zebra.
    #[serde(default = "default_zebra_creation_probability")]
    pub zebra_creation_probability: f64,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            snake_creation_probability: default_snake_creation_probability(),
            rat_creation_probability: default_rat_creation_probability(),
            zebra_creation_probability: default_zebra_creation_probability(),
        }
    }
}

impl PopulationConfig {
    /// Creation probability for `species`.
    pub const fn probability(&self, species: Species) -> f64 {
        match species {
            Species::Snake => self.snake_creation_probability,
            Species::Rat => self.rat_creation_probability,
            Species::Zebra => self.zebra_creation_probability,
        }
    }

    /// A configuration that seeds no animals at all.
    pub const fn empty() -> Self {
        Self {
            snake_creation_probability: 0.0,
            rat_creation_probability: 0.0,
            zebra_creation_probability: 0.0,
        }
    }
}

/// Per-species overrides on top of the built-in species traits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct SpeciesConfig {
    /// Rat overrides.
    #[serde(default)]
    pub rat: TraitOverrides,

    /// Zebra overrides.
    #[serde(default)]
    pub zebra: TraitOverrides,

    /// Snake overrides.
    #[serde(default)]
    pub snake: TraitOverrides,
}

impl SpeciesConfig {
    /// Build the species table for a run.
    pub fn table(&self) -> SpeciesTable {
        let defaults = SpeciesTable::default();
        SpeciesTable {
            rat: self.rat.apply(defaults.rat),
            zebra: self.zebra.apply(defaults.zebra),
            snake: self.snake.apply(defaults.snake),
        }
    }
}

/// Run length and pacing used by the driver binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct RunConfig {
    /// Number of ticks to run.
    #[serde(default = "default_steps")]
    pub steps: u64,

    /// Real-time milliseconds to sleep between ticks (display pacing only).
    #[serde(default)]
    pub tick_delay_ms: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            steps: default_steps(),
            tick_delay_ms: 0,
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions for serde
// ---------------------------------------------------------------------------

const fn default_depth() -> usize {
    DEFAULT_DEPTH
}

const fn default_width() -> usize {
    DEFAULT_WIDTH
}

const fn default_seed() -> u64 {
    42
}

const fn default_snake_creation_probability() -> f64 {
    0.02
}

const fn default_rat_creation_probability() -> f64 {
    0.08
}

const fn default_zebra_creation_probability() -> f64 {
    0.26
}

const fn default_steps() -> u64 {
    crate::runner::LONG_SIMULATION_STEPS
}

//! The simulator: owns the field, the herd, and the population order.
//!
//! A [`Simulator`] drives the tick cycle:
//!
//! 1. **Advance** -- bump the tick counter and flip the field's day phase.
//! 2. **Act** -- every animal in the population list takes its turn via
//!    [`savanna_agents::act`]. Newborns go to a side buffer.
//! 3. **Reap** -- dead animals leave the population list and the herd,
//!    including newborns that were eaten before the tick ended.
//! 4. **Merge** -- surviving newborns join the end of the population list
//!    and act from the next tick on.
//!
//! All randomness flows from the single RNG held by the simulator, so two
//! simulators built from the same config and seed evolve identically.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use savanna_agents::{AgentError, Animal, Herd, act};
use savanna_types::{AgentId, DeathCause, Location, PopulationCounts, Species};
use savanna_world::{Field, WorldError};
use tracing::{debug, info, warn};

use crate::config::{DEFAULT_DEPTH, DEFAULT_WIDTH, PopulationConfig, SimulationConfig};
use crate::tick::{DeathTally, TickSummary};

/// Errors that can occur while setting up or stepping the simulation.
#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    /// An animal's turn failed.
    #[error("agent error for {agent_id}: {source}")]
    Agent {
        /// The animal whose turn failed.
        agent_id: AgentId,
        /// The underlying agent error.
        source: AgentError,
    },

    /// Seeding the initial population failed.
    #[error("populate error: {source}")]
    Populate {
        /// The underlying agent error.
        #[from]
        source: AgentError,
    },

    /// A field operation failed.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: WorldError,
    },

    /// The tick counter overflowed.
    #[error("tick counter overflow")]
    TickOverflow,
}

/// A predator-prey simulation on a rectangular field.
#[derive(Debug)]
pub struct Simulator<R> {
    /// Occupancy grid and day phase.
    field: Field,
    /// Every animal record.
    herd: Herd,
    /// Live animals in acting order.
    population: Vec<AgentId>,
    /// Ticks executed since the last reset.
    tick: u64,
    /// Per-cell creation probabilities used by [`Simulator::reset`].
    creation: PopulationConfig,
    /// The single source of randomness for the run.
    rng: R,
}

impl Simulator<StdRng> {
    /// Build a simulator seeded from `seed`.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError`] if the initial population cannot be placed.
    pub fn from_seed(config: &SimulationConfig, seed: u64) -> Result<Self, SimulationError> {
        Self::new(config, StdRng::seed_from_u64(seed))
    }

    /// Build a simulator seeded from `config.world.seed`.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError`] if the initial population cannot be placed.
    pub fn from_config(config: &SimulationConfig) -> Result<Self, SimulationError> {
        Self::from_seed(config, config.world.seed)
    }
}

impl<R: Rng> Simulator<R> {
    /// Build a simulator with an injected RNG and populate it.
    ///
    /// Zero dimensions are not rejected here: the simulator logs a warning
    /// and falls back to the default 80 x 120 field.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError`] if the field cannot be built or the
    /// initial population cannot be placed.
    pub fn new(config: &SimulationConfig, rng: R) -> Result<Self, SimulationError> {
        let world = config.world;
        let (depth, width) = if world.has_valid_dimensions() {
            (world.depth, world.width)
        } else {
            warn!(
                depth = world.depth,
                width = world.width,
                fallback_depth = DEFAULT_DEPTH,
                fallback_width = DEFAULT_WIDTH,
                "Field dimensions must be positive, using defaults"
            );
            (DEFAULT_DEPTH, DEFAULT_WIDTH)
        };

        let mut simulator = Self {
            field: Field::new(depth, width)?,
            herd: Herd::new(config.species.table()),
            population: Vec::new(),
            tick: 0,
            creation: config.population,
            rng,
        };
        simulator.reset()?;
        Ok(simulator)
    }

    /// Return to tick 0 with a freshly seeded population.
    ///
    /// Clears the field and the herd, sets the phase back to day, then gives
    /// every cell in row-major order a chance to hold a snake, a rat, or a
    /// zebra, drawn in that order. The first hit wins.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::Populate`] if an animal cannot be placed.
    pub fn reset(&mut self) -> Result<(), SimulationError> {
        self.tick = 0;
        self.field.clear();
        self.field.reset_phase();
        self.herd.clear();
        self.population.clear();
        self.populate()?;

        let counts = self.herd.counts();
        info!(
            depth = self.field.depth(),
            width = self.field.width(),
            rats = counts.rats,
            zebras = counts.zebras,
            snakes = counts.snakes,
            "Simulation reset"
        );
        Ok(())
    }

    fn populate(&mut self) -> Result<(), SimulationError> {
        for row in 0..self.field.depth() {
            for col in 0..self.field.width() {
                let location = Location::new(row, col);
                if let Some(species) = self.draw_species() {
                    let id =
                        self.herd
                            .spawn_seed(species, location, &mut self.field, &mut self.rng)?;
                    self.population.push(id);
                }
            }
        }
        Ok(())
    }

    fn draw_species(&mut self) -> Option<Species> {
        for species in Species::ALL {
            let probability = self.creation.probability(species);
            let roll: f64 = self.rng.random();
            if probability > 0.0 && roll <= probability {
                return Some(species);
            }
        }
        None
    }

    /// Run a single tick.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::Agent`] if an animal's turn breaks an
    /// occupancy invariant, or [`SimulationError::TickOverflow`].
    pub fn simulate_one_step(&mut self) -> Result<TickSummary, SimulationError> {
        self.tick = self
            .tick
            .checked_add(1)
            .ok_or(SimulationError::TickOverflow)?;
        let phase = self.field.time_skip();

        let mut newborns: Vec<AgentId> = Vec::new();
        let mut deaths = DeathTally::default();
        let mut births: u32 = 0;

        for &id in &self.population {
            let outcome = act(
                id,
                &mut self.herd,
                &mut self.field,
                &mut self.rng,
                &mut newborns,
            )
            .map_err(|source| SimulationError::Agent {
                agent_id: id,
                source,
            })?;

            births = births.saturating_add(outcome.born);
            if let Some(cause) = outcome.died {
                deaths.record(cause);
            }
            if outcome.ate.is_some() {
                deaths.record(DeathCause::Predation);
            }
        }

        // Collect first, then filter: the population and the newborn buffer
        // may both hold animals killed this tick.
        let dead: Vec<AgentId> = self
            .population
            .iter()
            .chain(newborns.iter())
            .copied()
            .filter(|id| !self.herd.is_alive(*id))
            .collect();
        self.herd.remove_all(&dead);
        self.population.retain(|id| self.herd.is_alive(*id));
        newborns.retain(|id| self.herd.is_alive(*id));
        self.population.extend(newborns);

        let counts = self.herd.counts();
        debug!(
            tick = self.tick,
            phase = %phase,
            births,
            deaths = deaths.total(),
            rats = counts.rats,
            zebras = counts.zebras,
            snakes = counts.snakes,
            "Tick completed"
        );

        Ok(TickSummary {
            tick: self.tick,
            phase,
            births,
            deaths,
            counts,
        })
    }

    /// Add an animal with explicit state at the end of the acting order.
    ///
    /// The builder receives the id the animal will be registered under.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::Populate`] if the cell is taken or out of
    /// bounds.
    pub fn insert_animal<F>(&mut self, build: F) -> Result<AgentId, SimulationError>
    where
        F: FnOnce(AgentId) -> Animal,
    {
        let id = self.herd.insert_with(&mut self.field, build)?;
        self.population.push(id);
        Ok(id)
    }
}

impl<R> Simulator<R> {
    /// Ticks executed since the last reset.
    pub const fn tick(&self) -> u64 {
        self.tick
    }

    /// The occupancy grid.
    pub const fn field(&self) -> &Field {
        &self.field
    }

    /// The animal registry.
    pub const fn herd(&self) -> &Herd {
        &self.herd
    }

    /// Live animal ids in acting order.
    pub fn population(&self) -> &[AgentId] {
        &self.population
    }

    /// Live animals in acting order.
    pub fn animals(&self) -> impl Iterator<Item = &Animal> {
        self.population.iter().filter_map(|id| self.herd.get(*id))
    }

    /// Look up one animal.
    pub fn animal(&self, id: AgentId) -> Option<&Animal> {
        self.herd.get(id)
    }

    /// Live animals per species.
    pub fn counts(&self) -> PopulationCounts {
        self.herd.counts()
    }
}

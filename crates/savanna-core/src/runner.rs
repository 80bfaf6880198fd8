//! Multi-tick run loop.
//!
//! This module adds [`Simulator::simulate`] and
//! [`Simulator::run_long_simulation`] on top of the single-tick
//! [`Simulator::simulate_one_step`]. A run stops when either:
//!
//! - **Step limit**: the requested number of ticks has been executed
//! - **Not viable**: the [`Viability`] policy reports `false` before a tick
//!
//! A [`TickCallback`] sees every completed tick, which is where a driver
//! renders, logs, or paces the run.

use rand::Rng;
use savanna_agents::Herd;
use savanna_world::Field;
use serde::Serialize;
use tracing::{info, warn};

use crate::simulator::{SimulationError, Simulator};
use crate::tick::TickSummary;
use crate::viability::Viability;

/// Number of ticks executed by [`Simulator::run_long_simulation`].
pub const LONG_SIMULATION_STEPS: u64 = 4000;

/// Reason a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SimulationEndReason {
    /// The requested number of ticks was executed.
    StepLimitReached,
    /// The viability policy reported the run as finished.
    NotViable,
}

/// Result of a multi-tick run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SimulationResult {
    /// The reason the run ended.
    pub end_reason: SimulationEndReason,
    /// Number of ticks executed by this run.
    pub ticks_run: u64,
    /// Tick counter of the simulator when the run ended.
    pub final_tick: u64,
    /// The last tick summary, if any tick completed.
    pub final_summary: Option<TickSummary>,
}

/// Callback invoked after each tick completes.
pub trait TickCallback {
    /// Called after a tick completes successfully, with the field and herd
    /// as they stand after the reap.
    fn on_tick(&mut self, summary: &TickSummary, field: &Field, herd: &Herd);
}

/// A tick callback that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpCallback;

impl TickCallback for NoOpCallback {
    fn on_tick(&mut self, _summary: &TickSummary, _field: &Field, _herd: &Herd) {}
}

impl<R: Rng> Simulator<R> {
    /// Run up to `steps` ticks, stopping early when `viability` fails.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError`] if a tick fails.
    pub fn simulate(
        &mut self,
        steps: u64,
        viability: &mut dyn Viability,
    ) -> Result<SimulationResult, SimulationError> {
        self.simulate_with_callback(steps, viability, &mut NoOpCallback)
    }

    /// Run up to `steps` ticks, notifying `callback` after each one.
    ///
    /// Viability is checked before every tick, so a run that starts out
    /// non-viable executes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError`] if a tick fails.
    pub fn simulate_with_callback(
        &mut self,
        steps: u64,
        viability: &mut dyn Viability,
        callback: &mut dyn TickCallback,
    ) -> Result<SimulationResult, SimulationError> {
        let mut ticks_run: u64 = 0;
        let mut final_summary: Option<TickSummary> = None;

        info!(steps, start_tick = self.tick(), "Simulation starting");

        let end_reason = loop {
            if ticks_run >= steps {
                break SimulationEndReason::StepLimitReached;
            }
            if !viability.is_viable(self.field(), self.herd()) {
                info!(tick = self.tick(), "Simulation no longer viable");
                break SimulationEndReason::NotViable;
            }

            let summary = self.simulate_one_step()?;
            ticks_run = ticks_run.saturating_add(1);
            callback.on_tick(&summary, self.field(), self.herd());
            final_summary = Some(summary);
        };

        Ok(SimulationResult {
            end_reason,
            ticks_run,
            final_tick: self.tick(),
            final_summary,
        })
    }

    /// Run a long simulation of [`LONG_SIMULATION_STEPS`] ticks.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError`] if a tick fails.
    pub fn run_long_simulation(
        &mut self,
        viability: &mut dyn Viability,
    ) -> Result<SimulationResult, SimulationError> {
        self.simulate(LONG_SIMULATION_STEPS, viability)
    }
}

/// Log the end of a run.
pub fn log_simulation_end(result: &SimulationResult) {
    info!(
        reason = ?result.end_reason,
        ticks_run = result.ticks_run,
        final_tick = result.final_tick,
        "Simulation ended"
    );

    if let Some(ref summary) = result.final_summary {
        info!(
            tick = summary.tick,
            phase = %summary.phase,
            rats = summary.counts.rats,
            zebras = summary.counts.zebras,
            snakes = summary.counts.snakes,
            "Final tick summary"
        );
    } else {
        warn!("Simulation ended with no ticks executed");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use savanna_agents::Animal;
    use savanna_types::{Location, Sex, Species};

    use super::*;
    use crate::config::{PopulationConfig, SimulationConfig, WorldConfig};
    use crate::viability::{AlwaysViable, SpeciesDiversity};

    fn empty_sim() -> Simulator<SmallRng> {
        let config = SimulationConfig {
            world: WorldConfig {
                depth: 5,
                width: 5,
                seed: 0,
            },
            population: PopulationConfig::empty(),
            ..SimulationConfig::default()
        };
        Simulator::new(&config, SmallRng::seed_from_u64(17)).unwrap()
    }

    struct Recorder {
        ticks: Vec<u64>,
    }

    impl TickCallback for Recorder {
        fn on_tick(&mut self, summary: &TickSummary, _field: &Field, _herd: &Herd) {
            self.ticks.push(summary.tick);
        }
    }

    #[test]
    fn runs_requested_steps() {
        let mut sim = empty_sim();
        let result = sim.simulate(7, &mut AlwaysViable).unwrap();
        assert_eq!(result.end_reason, SimulationEndReason::StepLimitReached);
        assert_eq!(result.ticks_run, 7);
        assert_eq!(result.final_tick, 7);
        assert_eq!(result.final_summary.map(|s| s.tick), Some(7));
    }

    #[test]
    fn zero_steps_runs_nothing() {
        let mut sim = empty_sim();
        let result = sim.simulate(0, &mut AlwaysViable).unwrap();
        assert_eq!(result.ticks_run, 0);
        assert_eq!(result.final_summary, None);
        assert_eq!(sim.tick(), 0);
    }

    #[test]
    fn non_viable_start_runs_nothing() {
        let mut sim = empty_sim();
        let result = sim.simulate(10, &mut SpeciesDiversity).unwrap();
        assert_eq!(result.end_reason, SimulationEndReason::NotViable);
        assert_eq!(result.ticks_run, 0);
    }

    #[test]
    fn stops_once_diversity_is_lost() {
        let mut sim = empty_sim();
        // Both die of old age in the first tick.
        sim.insert_animal(|id| {
            Animal::from_parts(id, Species::Rat, Sex::Male, 40, None, Location::new(0, 0))
        })
        .unwrap();
        sim.insert_animal(|id| {
            Animal::from_parts(id, Species::Zebra, Sex::Male, 48, None, Location::new(4, 4))
        })
        .unwrap();
        let result = sim.simulate(100, &mut SpeciesDiversity).unwrap();
        assert_eq!(result.end_reason, SimulationEndReason::NotViable);
        assert_eq!(result.ticks_run, 1);
    }

    #[test]
    fn callback_sees_every_tick() {
        let mut sim = empty_sim();
        let mut recorder = Recorder { ticks: Vec::new() };
        sim.simulate_with_callback(3, &mut AlwaysViable, &mut recorder)
            .unwrap();
        assert_eq!(recorder.ticks, vec![1, 2, 3]);
    }

    #[test]
    fn long_simulation_runs_four_thousand_ticks() {
        let mut sim = empty_sim();
        let result = sim.run_long_simulation(&mut AlwaysViable).unwrap();
        assert_eq!(result.ticks_run, LONG_SIMULATION_STEPS);
        assert_eq!(sim.tick(), 4000);
    }

    #[test]
    fn result_serializes_to_json() {
        let mut sim = empty_sim();
        let result = sim.simulate(1, &mut AlwaysViable).unwrap();
        let json = serde_json::to_value(result).unwrap();
        assert_eq!(json["end_reason"], "step_limit_reached");
        assert_eq!(json["ticks_run"], 1);
    }
}

//! Configuration, tick orchestration, and run loop for the Savanna simulation.
//!
//! This crate owns the tick cycle that drives the simulation: advance the
//! clock and day phase, let every animal act, reap the dead, and merge the
//! newborns into the population.
//!
//! # Modules
//!
//! - [`config`] -- Configuration loading from `savanna-config.yaml` into
//!   strongly-typed structs.
//! - [`runner`] -- Multi-tick runs, [`TickCallback`], and
//!   [`SimulationResult`].
//! - [`simulator`] -- The [`Simulator`] that owns the field, the herd, and
//!   the population order.
//! - [`tick`] -- Per-tick [`TickSummary`] and death tallies.
//! - [`viability`] -- [`Viability`] policies that stop a run early.
//!
//! [`TickCallback`]: runner::TickCallback
//! [`SimulationResult`]: runner::SimulationResult
//! [`Simulator`]: simulator::Simulator
//! [`TickSummary`]: tick::TickSummary
//! [`Viability`]: viability::Viability

pub mod config;
pub mod runner;
pub mod simulator;
pub mod tick;
pub mod viability;

pub use config::{ConfigError, SimulationConfig};
pub use runner::{SimulationEndReason, SimulationResult, TickCallback};
pub use simulator::{SimulationError, Simulator};
pub use tick::TickSummary;
pub use viability::Viability;

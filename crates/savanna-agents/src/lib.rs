//! Animal state, species traits, and life cycle for the Savanna simulation.
//!
//! This crate contains the logic layer for animals -- everything that
//! operates on animal state and field occupancy without touching I/O. It sits
//! between `savanna-world` (which owns the grid) and `savanna-core` (which
//! orchestrates ticks).
//!
//! # Modules
//!
//! - [`animal`] -- The [`Animal`] record shared by every species
//! - [`breeding`] -- Mate search, litter size, and newborn placement
//! - [`config`] -- Per-species constants ([`SpeciesTraits`], [`SpeciesTable`])
//! - [`death`] -- Age and hunger death checks
//! - [`error`] -- Error types for all animal operations ([`AgentError`])
//! - [`herd`] -- The [`Herd`] registry that creates, looks up, and kills animals
//! - [`lifecycle`] -- The per-tick [`act`] state machine
//!
//! [`act`]: lifecycle::act

pub mod animal;
pub mod breeding;
pub mod config;
pub mod death;
pub mod error;
pub mod herd;
pub mod lifecycle;

// Re-export primary types at crate root for convenience.
pub use animal::Animal;
pub use config::{SpeciesTable, SpeciesTraits};
pub use error::AgentError;
pub use herd::Herd;
pub use lifecycle::{ActOutcome, act};

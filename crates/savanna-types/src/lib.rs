//! Shared type definitions for the Savanna simulation.
//!
//! This crate is the single source of truth for the value types that cross
//! crate boundaries: grid coordinates, agent identifiers, species tags, and
//! population tallies.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe identifier wrapper for agents
//! - [`enums`] -- Enumeration types (species, sex, day phase, death cause)
//! - [`structs`] -- Value structs (grid locations, population counts)

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{DayPhase, DeathCause, Sex, Species};
pub use ids::AgentId;
pub use structs::{Location, PopulationCounts};

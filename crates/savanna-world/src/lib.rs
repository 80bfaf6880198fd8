//! Occupancy grid and environment for the Savanna simulation.
//!
//! This crate models the physical world: a bounded rectangular grid where
//! every cell holds at most one animal, plus the day/night phase that the
//! orchestrator advances once per tick.
//!
//! # Modules
//!
//! - [`error`] -- Error types for grid operations.
//! - [`field`] -- The [`Field`] occupancy grid with adjacency and free-slot
//!   queries.
//!
//! [`Field`]: field::Field

pub mod error;
pub mod field;

// Re-export primary types at crate root.
pub use error::WorldError;
pub use field::Field;

//! Error types for the `savanna-world` crate.
//!
//! All fallible operations in this crate return [`WorldError`] through the
//! standard [`Result`] type alias.

use savanna_types::{AgentId, Location};

/// Errors that can occur during grid operations.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// A grid dimension was zero.
    #[error("invalid field dimensions {depth}x{width}: both must be greater than zero")]
    InvalidDimensions {
        /// Requested number of rows.
        depth: usize,
        /// Requested number of columns.
        width: usize,
    },

    /// A location lies outside the grid.
    #[error("location {location} is outside the {depth}x{width} field")]
    OutOfBounds {
        /// The offending location.
        location: Location,
        /// Number of rows in the field.
        depth: usize,
        /// Number of columns in the field.
        width: usize,
    },

    /// A placement targeted a cell already held by a different animal.
    #[error("cannot place {incoming} at {location}: cell is occupied by {occupant}")]
    CellOccupied {
        /// The contested cell.
        location: Location,
        /// The animal already registered there.
        occupant: AgentId,
        /// The animal that tried to move in.
        incoming: AgentId,
    },

    /// Arithmetic overflow while computing a cell index.
    #[error("arithmetic overflow in grid calculation")]
    ArithmeticOverflow,
}

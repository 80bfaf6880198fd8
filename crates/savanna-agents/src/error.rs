//! Error types for the savanna-agents crate.
//!
//! All operations that can fail return typed errors rather than panicking.
//! A failure here means an occupancy invariant was broken by the caller; the
//! normal life cycle (including every kind of death) is never an error.

use savanna_types::AgentId;
use savanna_world::WorldError;

/// Errors that can occur during animal operations.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    /// Animal with the given ID was not found in the herd.
    #[error("animal not found: {0}")]
    AgentNotFound(AgentId),

    /// A live animal has no location on the field.
    #[error("live animal {0} is not placed on the field")]
    NotPlaced(AgentId),

    /// A field operation failed.
    #[error("field error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: WorldError,
    },

    /// An arithmetic overflow occurred during a counter update.
    #[error("arithmetic overflow: {context}")]
    ArithmeticOverflow {
        /// Description of what was being computed.
        context: String,
    },
}

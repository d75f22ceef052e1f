//! Configuration errors. Illegal moves are never errors; only a malformed
//! house is.

use thiserror::Error;

/// A single location entry that cannot be turned into a typed location.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationConfigError {
    #[error("path location cannot declare exits")]
    PathWithExits,

    #[error("turnable location cannot declare an ending pointer")]
    TurnableWithEndingPointer,
}

/// Fatal problems found while building the location graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("house has no locations")]
    Empty,

    #[error("entry location '{0}' does not exist")]
    MissingEntry(String),

    #[error("location '{location}' has no photos (zero slots)")]
    ZeroSlots { location: String },

    #[error("location '{location}' exit {direction} points to missing location '{target}'")]
    DanglingExit {
        location: String,
        direction: usize,
        target: String,
    },

    #[error("path '{location}' ends at missing location '{target}'")]
    DanglingEndingPointer { location: String, target: String },
}

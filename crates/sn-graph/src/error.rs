//! Graph-subsystem error type.

use thiserror::Error;

use sn_core::{Coordinate, IntersectionId};

/// Errors produced by `sn-graph`.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("map parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("block {number} of street {street:?} has fewer than two points")]
    DegenerateBlock { street: String, number: u32 },

    #[error("intersection at {0} already exists")]
    DuplicateIntersection(Coordinate),

    #[error("intersection {0} not found in network")]
    IntersectionNotFound(IntersectionId),

    #[error("no block connects {from} to {to}")]
    BrokenPath {
        from: IntersectionId,
        to: IntersectionId,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type GraphResult<T> = Result<T, GraphError>;

use thiserror::Error;

use crate::maze::{MIN_DIMENSION, MAX_AGENTS, Point};

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failures raised while configuring or constructing a maze.
///
/// None of these are recoverable inside the crate. Callers are expected to report them and stop.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("maze must be at least {MIN_DIMENSION}x{MIN_DIMENSION}, got {rows}x{cols}")]
    InvalidDimensions { rows: usize, cols: usize },
    #[error("agent count must be between 1 and {MAX_AGENTS}, got {0}")]
    InvalidAgentCount(usize),
    #[error("unrecognized selection: {0}")]
    UnknownAlgorithm(String),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("could not place a marker after {attempts} attempts")]
    PlacementExhausted { attempts: usize },
    #[error("no passable cell found scanning from corner {corner}")]
    NoCornerStart { corner: usize },
    #[error("center cell {point} is not carved")]
    CenterNotCarved { point: Point },
    #[error("cell {point} already carries a conflicting marker")]
    MarkerConflict { point: Point },
    #[error("cell {point} is not a passage")]
    NotPassable { point: Point },
}

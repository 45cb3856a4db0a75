//! Error types for the decision engine.

use std::fmt;

use crate::grid::Cell;

/// Error cases a maze-distance oracle may report.
///
/// The engine never propagates these: each call site absorbs the failure and
/// substitutes [`crate::oracle::UNREACHABLE_DISTANCE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistanceError {
    /// A queried cell lies outside the board.
    OutOfBounds(Cell),
    /// No route exists between the two cells.
    Disconnected(Cell, Cell),
}

impl fmt::Display for DistanceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DistanceError::OutOfBounds(cell) => {
                write!(f, "cell {cell} is outside the board")
            }
            DistanceError::Disconnected(a, b) => {
                write!(f, "no route between {a} and {b}")
            }
        }
    }
}

impl std::error::Error for DistanceError {}

/// Result type for maze-distance queries.
pub type DistanceResult<T> = Result<T, DistanceError>;

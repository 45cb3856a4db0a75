//! Authoritative maze-distance oracle seam.
//!
//! The simulation engine owns the true shortest-path metric; the decision
//! engine only consumes it. [`DistanceOracle`] is the trait boundary, and
//! [`BfsOracle`] is the reference implementation used by the harness, the
//! CLI and the tests.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::error::{DistanceError, DistanceResult};
use crate::grid::Cell;

/// Sentinel distance substituted when an oracle query fails.
///
/// Used only for comparisons ("is anything closer?"), never for routing.
pub const UNREACHABLE_DISTANCE: u32 = 9999;

/// Authoritative shortest-path distance between two cells.
pub trait DistanceOracle {
    /// True maze distance from `a` to `b` through the walled grid.
    ///
    /// # Errors
    ///
    /// Returns an error for out-of-bounds or disconnected queries; callers
    /// inside the engine absorb it via [`distance_or_sentinel`].
    fn maze_distance(&self, a: Cell, b: Cell) -> DistanceResult<u32>;
}

/// Map an oracle result to a comparable distance, absorbing failures.
#[must_use]
pub fn distance_or_sentinel(oracle: &dyn DistanceOracle, a: Cell, b: Cell) -> u32 {
    oracle.maze_distance(a, b).unwrap_or(UNREACHABLE_DISTANCE)
}

/// Reference oracle running breadth-first search over the wall set.
#[derive(Debug, Clone)]
pub struct BfsOracle {
    width: i32,
    height: i32,
    walls: HashSet<Cell>,
}

impl BfsOracle {
    /// Create an oracle for a `width` x `height` board with the given walls.
    #[must_use]
    pub const fn new(width: i32, height: i32, walls: HashSet<Cell>) -> Self {
        Self {
            width,
            height,
            walls,
        }
    }

    /// Whether a cell lies on the board.
    #[must_use]
    pub const fn in_bounds(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.x < self.width && cell.y >= 0 && cell.y < self.height
    }

    fn open(&self, cell: Cell) -> bool {
        self.in_bounds(cell) && !self.walls.contains(&cell)
    }
}

impl DistanceOracle for BfsOracle {
    fn maze_distance(&self, a: Cell, b: Cell) -> DistanceResult<u32> {
        if !self.in_bounds(a) {
            return Err(DistanceError::OutOfBounds(a));
        }
        if !self.in_bounds(b) {
            return Err(DistanceError::OutOfBounds(b));
        }
        if a == b {
            return Ok(0);
        }

        let mut distances: HashMap<Cell, u32> = HashMap::new();
        let mut queue = VecDeque::new();
        distances.insert(a, 0);
        queue.push_back(a);

        while let Some(cell) = queue.pop_front() {
            let Some(&distance) = distances.get(&cell) else {
                continue;
            };

            for neighbor in cell.neighbors() {
                if !self.open(neighbor) || distances.contains_key(&neighbor) {
                    continue;
                }
                if neighbor == b {
                    return Ok(distance + 1);
                }
                distances.insert(neighbor, distance + 1);
                queue.push_back(neighbor);
            }
        }

        Err(DistanceError::Disconnected(a, b))
    }
}

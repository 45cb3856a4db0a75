//! Consumable step sequence produced by the pathfinder.

use std::collections::HashSet;

use crate::grid::Cell;
use crate::nav::find_path;

/// An ordered sequence of cells from (excluding) an origin to a destination,
/// with a cursor marking how many steps have been consumed.
///
/// The cell sequence is immutable once built; only the cursor advances. An
/// empty path (origin equals destination, or no route found) reports
/// completed immediately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    origin: Cell,
    cells: Vec<Cell>,
    cursor: usize,
}

impl Path {
    /// Plan a path by running the pathfinder.
    #[must_use]
    pub fn plan(
        start: Cell,
        end: Cell,
        walls: &HashSet<Cell>,
        forbidden: Option<&HashSet<Cell>>,
    ) -> Self {
        Self::from_cells(start, find_path(start, end, walls, forbidden))
    }

    /// Wrap an already-computed step sequence.
    #[must_use]
    pub const fn from_cells(origin: Cell, cells: Vec<Cell>) -> Self {
        Self {
            origin,
            cells,
            cursor: 0,
        }
    }

    /// Advance the cursor and return the next cell, or `None` when the path
    /// is already exhausted.
    pub fn step(&mut self) -> Option<Cell> {
        let next = self.cells.get(self.cursor).copied()?;
        self.cursor += 1;
        Some(next)
    }

    /// Whether every step has been consumed.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.cursor >= self.cells.len()
    }

    /// Whether the path holds no steps at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of steps in the path.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Cell the path was planned from.
    #[must_use]
    pub const fn origin(&self) -> Cell {
        self.origin
    }

    /// Final cell of the path, or the origin when the path is empty.
    #[must_use]
    pub fn destination(&self) -> Cell {
        self.cells.last().copied().unwrap_or(self.origin)
    }
}

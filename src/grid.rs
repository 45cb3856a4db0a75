//! Board coordinates and cardinal moves.

use std::fmt;

/// A cell on the board grid.
///
/// Equality and hashing are by coordinate. The grid uses the classic board
/// convention where north is +y and east is +x.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    /// X coordinate (column).
    pub x: i32,
    /// Y coordinate (row).
    pub y: i32,
}

impl Cell {
    /// Create a new cell.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Cell shifted by the given delta.
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Same column, different row.
    #[must_use]
    pub const fn with_y(self, y: i32) -> Self {
        Self { x: self.x, y }
    }

    /// Manhattan distance to another cell.
    #[must_use]
    pub const fn manhattan(self, other: Cell) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// The four 4-connected neighbors, in the fixed expansion order
    /// +x, -x, +y, -y.
    ///
    /// Search code relies on this order being stable so candidate expansion
    /// is deterministic for a fixed input.
    #[must_use]
    pub const fn neighbors(self) -> [Cell; 4] {
        [
            Self::new(self.x + 1, self.y),
            Self::new(self.x - 1, self.y),
            Self::new(self.x, self.y + 1),
            Self::new(self.x, self.y - 1),
        ]
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A cardinal move decision returned to the simulation engine.
///
/// Stop is never derived from a step delta; it exists only as the fallback
/// when no plan is executable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    /// Step toward +y.
    North,
    /// Step toward -y.
    South,
    /// Step toward +x.
    East,
    /// Step toward -x.
    West,
    /// Stay in place.
    Stop,
}

impl Move {
    /// The directional moves in the fixed order used for delta resolution.
    pub const DIRECTIONAL: [Move; 4] = [Move::North, Move::South, Move::East, Move::West];

    /// Coordinate delta this move applies.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Move::North => (0, 1),
            Move::South => (0, -1),
            Move::East => (1, 0),
            Move::West => (-1, 0),
            Move::Stop => (0, 0),
        }
    }

    /// Cell reached by taking this move from `cell`.
    #[must_use]
    pub const fn apply(self, cell: Cell) -> Cell {
        let (dx, dy) = self.delta();
        cell.offset(dx, dy)
    }

    /// Derive the move stepping from `current` to the adjacent cell `next`.
    ///
    /// Tries each directional delta in declaration order and returns the
    /// first match, or `None` when the cells are not 4-adjacent (callers
    /// fall back to [`Move::Stop`]).
    #[must_use]
    pub fn from_step(current: Cell, next: Cell) -> Option<Move> {
        Move::DIRECTIONAL
            .into_iter()
            .find(|mv| mv.apply(current) == next)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Move::North => "North",
            Move::South => "South",
            Move::East => "East",
            Move::West => "West",
            Move::Stop => "Stop",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manhattan() {
        assert_eq!(Cell::new(0, 0).manhattan(Cell::new(3, 4)), 7);
        assert_eq!(Cell::new(-2, 1).manhattan(Cell::new(2, -1)), 6);
        assert_eq!(Cell::new(5, 5).manhattan(Cell::new(5, 5)), 0);
    }

    #[test]
    fn test_neighbor_order_is_fixed() {
        let cell = Cell::new(4, 7);
        assert_eq!(
            cell.neighbors(),
            [
                Cell::new(5, 7),
                Cell::new(3, 7),
                Cell::new(4, 8),
                Cell::new(4, 6),
            ]
        );
    }

    #[test]
    fn test_move_apply() {
        let cell = Cell::new(2, 2);
        assert_eq!(Move::North.apply(cell), Cell::new(2, 3));
        assert_eq!(Move::South.apply(cell), Cell::new(2, 1));
        assert_eq!(Move::East.apply(cell), Cell::new(3, 2));
        assert_eq!(Move::West.apply(cell), Cell::new(1, 2));
        assert_eq!(Move::Stop.apply(cell), cell);
    }

    #[test]
    fn test_from_step_resolves_adjacent() {
        let cell = Cell::new(0, 0);
        assert_eq!(Move::from_step(cell, Cell::new(1, 0)), Some(Move::East));
        assert_eq!(Move::from_step(cell, Cell::new(0, 1)), Some(Move::North));
        assert_eq!(Move::from_step(cell, Cell::new(-1, 0)), Some(Move::West));
        assert_eq!(Move::from_step(cell, Cell::new(0, -1)), Some(Move::South));
    }

    #[test]
    fn test_from_step_rejects_non_adjacent() {
        let cell = Cell::new(0, 0);
        // Same cell is not a step; Stop is never derived.
        assert_eq!(Move::from_step(cell, cell), None);
        assert_eq!(Move::from_step(cell, Cell::new(1, 1)), None);
        assert_eq!(Move::from_step(cell, Cell::new(3, 0)), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Move::North.to_string(), "North");
        assert_eq!(Move::Stop.to_string(), "Stop");
        assert_eq!(Cell::new(1, 2).to_string(), "(1, 2)");
    }
}

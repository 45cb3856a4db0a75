//! Mirrored territory policy: which half of the board is home.

use std::ops::RangeInclusive;

use crate::grid::Cell;

/// Team side, selecting which half of the board counts as home.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TeamSide {
    /// Home is the west half (low x).
    Red,
    /// Home is the east half (high x).
    Blue,
}

impl TeamSide {
    /// The opposing side.
    #[must_use]
    pub const fn opponent(self) -> TeamSide {
        match self {
            TeamSide::Red => TeamSide::Blue,
            TeamSide::Blue => TeamSide::Red,
        }
    }
}

/// Territory policy for one team side on a fixed-size board.
///
/// Safety is a single x comparison against the board's center line; the
/// threshold ranges only restrict candidate generation for patrol and
/// retreat targets and play no part in safety checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Territory {
    side: TeamSide,
    width: i32,
    height: i32,
}

impl Territory {
    /// Create the policy for a side on a `width` x `height` board.
    #[must_use]
    pub const fn new(side: TeamSide, width: i32, height: i32) -> Self {
        Self {
            side,
            width,
            height,
        }
    }

    /// Which side this policy belongs to.
    #[must_use]
    pub const fn side(&self) -> TeamSide {
        self.side
    }

    /// Board width in cells.
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.width
    }

    /// Board height in cells.
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.height
    }

    /// First column of the east half.
    const fn mid(&self) -> i32 {
        self.width / 2
    }

    /// Whether a cell lies in this side's own territory.
    #[must_use]
    pub const fn is_safe_side(&self, cell: Cell) -> bool {
        match self.side {
            TeamSide::Red => cell.x < self.mid(),
            TeamSide::Blue => cell.x >= self.mid(),
        }
    }

    /// Inclusive x-range of the spawn region (outermost two columns).
    #[must_use]
    pub const fn spawn_range(&self) -> RangeInclusive<i32> {
        match self.side {
            TeamSide::Red => 0..=1,
            TeamSide::Blue => (self.width - 2)..=(self.width - 1),
        }
    }

    /// Inclusive x-range of the patrol band used for defensive posts.
    #[must_use]
    pub const fn defend_range(&self) -> RangeInclusive<i32> {
        match self.side {
            TeamSide::Red => 2..=(self.mid() - 2),
            TeamSide::Blue => (self.mid() + 1)..=(self.width - 3),
        }
    }

    /// Inclusive x-range of the boundary-adjacent reposition region.
    #[must_use]
    pub const fn reposition_range(&self) -> RangeInclusive<i32> {
        match self.side {
            TeamSide::Red => (self.mid() - 3)..=(self.mid() - 1),
            TeamSide::Blue => self.mid()..=(self.mid() + 2),
        }
    }

    /// Whether a cell's column lies inside the spawn region.
    #[must_use]
    pub fn is_in_spawn(&self, cell: Cell) -> bool {
        self.spawn_range().contains(&cell.x)
    }
}

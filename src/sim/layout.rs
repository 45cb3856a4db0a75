//! ASCII board layouts.
//!
//! Grammar, one character per cell: `%` wall, `.` food, `o` capsule, `P`
//! offense agent start, `Q` defense agent start, `G` enemy pawn start, space
//! open floor. Row 0 of the text is the top of the board, so cell y is
//! `height - 1 - row`.

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use crate::grid::Cell;

/// Error type for layout parsing.
#[derive(Debug, Clone)]
pub struct LayoutError {
    /// Description of the error.
    pub reason: String,
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "layout error: {}", self.reason)
    }
}

impl std::error::Error for LayoutError {}

impl LayoutError {
    fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Built-in 20x9 arena used by the CLI when no layout file is given.
pub const DEFAULT_LAYOUT: &str = "\
%%%%%%%%%%%%%%%%%%%%
%P     %   .   .   %
% %%%  %  %%%  %%  %
%   %     .  .  o  %
%Q  %  %%%%  %.  % %
%   %     .  %  .  %
% %%%  %  %. %%%%  %
%G     %   .    .G %
%%%%%%%%%%%%%%%%%%%%";

/// A parsed board layout.
#[derive(Debug, Clone)]
pub struct Layout {
    width: i32,
    height: i32,
    walls: HashSet<Cell>,
    food: Vec<Cell>,
    capsules: Vec<Cell>,
    offense_start: Cell,
    defense_start: Cell,
    pawn_starts: Vec<Cell>,
}

impl Layout {
    /// Parse a layout from its ASCII form.
    ///
    /// # Errors
    ///
    /// Returns an error when the text is not rectangular, the border is not
    /// solid wall, a character is unknown, or either agent start is missing
    /// or duplicated.
    pub fn parse(text: &str) -> Result<Self, LayoutError> {
        let rows: Vec<&str> = text.lines().filter(|line| !line.is_empty()).collect();
        if rows.len() < 3 {
            return Err(LayoutError::new("layout needs at least three rows"));
        }

        let width = rows[0].chars().count();
        if width < 3 {
            return Err(LayoutError::new("layout needs at least three columns"));
        }
        let height = rows.len();

        let mut walls = HashSet::new();
        let mut food = Vec::new();
        let mut capsules = Vec::new();
        let mut offense_start = None;
        let mut defense_start = None;
        let mut pawn_starts = Vec::new();

        for (row, line) in rows.iter().enumerate() {
            if line.chars().count() != width {
                return Err(LayoutError::new(format!(
                    "row {row} has {} cells, expected {width}",
                    line.chars().count()
                )));
            }

            #[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
            let y = (height - 1 - row) as i32;
            for (col, ch) in line.chars().enumerate() {
                #[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
                let cell = Cell::new(col as i32, y);
                match ch {
                    '%' => {
                        walls.insert(cell);
                    }
                    '.' => food.push(cell),
                    'o' => capsules.push(cell),
                    'P' => {
                        if offense_start.replace(cell).is_some() {
                            return Err(LayoutError::new("more than one offense start"));
                        }
                    }
                    'Q' => {
                        if defense_start.replace(cell).is_some() {
                            return Err(LayoutError::new("more than one defense start"));
                        }
                    }
                    'G' => pawn_starts.push(cell),
                    ' ' => {}
                    other => {
                        return Err(LayoutError::new(format!(
                            "unknown layout character {other:?} at row {row}, column {col}"
                        )));
                    }
                }
            }
        }

        #[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
        let layout = Self {
            width: width as i32,
            height: height as i32,
            walls,
            food,
            capsules,
            offense_start: offense_start
                .ok_or_else(|| LayoutError::new("missing offense start 'P'"))?,
            defense_start: defense_start
                .ok_or_else(|| LayoutError::new("missing defense start 'Q'"))?,
            pawn_starts,
        };
        layout.check_border()?;
        Ok(layout)
    }

    /// Read and parse a layout file.
    ///
    /// # Errors
    ///
    /// Returns an error on I/O failure or invalid layout text.
    pub fn load(path: &Path) -> Result<Self, LayoutError> {
        let text = fs::read_to_string(path)
            .map_err(|e: io::Error| LayoutError::new(format!("{}: {e}", path.display())))?;
        Self::parse(&text)
    }

    fn check_border(&self) -> Result<(), LayoutError> {
        for x in 0..self.width {
            for y in [0, self.height - 1] {
                if !self.walls.contains(&Cell::new(x, y)) {
                    return Err(LayoutError::new(format!(
                        "border cell ({x}, {y}) is not a wall"
                    )));
                }
            }
        }
        for y in 0..self.height {
            for x in [0, self.width - 1] {
                if !self.walls.contains(&Cell::new(x, y)) {
                    return Err(LayoutError::new(format!(
                        "border cell ({x}, {y}) is not a wall"
                    )));
                }
            }
        }
        Ok(())
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

    /// Permanent wall cells, border included.
    #[must_use]
    pub const fn walls(&self) -> &HashSet<Cell> {
        &self.walls
    }

    /// Food cells in reading order.
    #[must_use]
    pub fn food(&self) -> &[Cell] {
        &self.food
    }

    /// Capsule cells in reading order.
    #[must_use]
    pub fn capsules(&self) -> &[Cell] {
        &self.capsules
    }

    /// Offense agent start cell.
    #[must_use]
    pub const fn offense_start(&self) -> Cell {
        self.offense_start
    }

    /// Defense agent start cell.
    #[must_use]
    pub const fn defense_start(&self) -> Cell {
        self.defense_start
    }

    /// Enemy pawn start cells in reading order.
    #[must_use]
    pub fn pawn_starts(&self) -> &[Cell] {
        &self.pawn_starts
    }
}

//! Offset hex coordinates
//!
//! The board is a rectangle of rows and columns. Every row is horizontally
//! adjacent in the usual way, and odd rows sit half a cell to the right of
//! even rows, which turns the rectangle into a hex grid.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Row/column position on the grid
///
/// Coordinates carry no bounds of their own; validity is checked against
/// the grid that resolves them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub row: i32,
    pub col: i32,
}

impl Coord {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    pub fn is_even_row(&self) -> bool {
        self.row.rem_euclid(2) == 0
    }

    /// One step in `direction`, ignoring grid bounds
    pub fn step(&self, direction: Direction) -> Coord {
        // Diagonal columns: even rows lean left, odd rows lean right
        let (left, right) = if self.is_even_row() {
            (self.col - 1, self.col)
        } else {
            (self.col, self.col + 1)
        };

        match direction {
            Direction::UpRight => Coord::new(self.row - 1, right),
            Direction::Right => Coord::new(self.row, self.col + 1),
            Direction::DownRight => Coord::new(self.row + 1, right),
            Direction::DownLeft => Coord::new(self.row + 1, left),
            Direction::Left => Coord::new(self.row, self.col - 1),
            Direction::UpLeft => Coord::new(self.row - 1, left),
        }
    }

    /// Check if this coordinate lies inside a `rows x cols` grid
    pub fn in_bounds(&self, rows: usize, cols: usize) -> bool {
        self.row >= 0 && self.col >= 0 && (self.row as usize) < rows && (self.col as usize) < cols
    }

    /// Check if this coordinate lies on the outermost ring of a `rows x cols` grid
    pub fn is_edge(&self, rows: usize, cols: usize) -> bool {
        self.row == 0
            || self.col == 0
            || self.row as usize + 1 == rows
            || self.col as usize + 1 == cols
    }

    /// Up to six neighbours, omitting any outside `[0, rows) x [0, cols)`
    pub fn neighbors(&self, rows: usize, cols: usize) -> impl Iterator<Item = Coord> {
        let origin = *self;
        Direction::ALL
            .into_iter()
            .map(move |direction| origin.step(direction))
            .filter(move |coord| coord.in_bounds(rows, cols))
    }

    /// Check if `other` is one step away
    pub fn is_adjacent(&self, other: Coord) -> bool {
        Direction::ALL.into_iter().any(|direction| self.step(direction) == other)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The six fixed hex directions
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    UpRight,
    Right,
    DownRight,
    DownLeft,
    Left,
    UpLeft,
}

impl Direction {
    /// Clockwise, starting up-right
    pub const ALL: [Direction; 6] = [
        Direction::UpRight,
        Direction::Right,
        Direction::DownRight,
        Direction::DownLeft,
        Direction::Left,
        Direction::UpLeft,
    ];
}

//! Rectangular cell grid with grow-on-touch / shrink-on-clear
//!
//! The grid always keeps one empty ring around the hive. Growth and shrink
//! reindex every cell, so coordinates are only meaningful for the grid state
//! that produced them.

use crate::cell::Cell;
use crate::coord::{Coord, Direction};
use crate::error::HiveError;
use crate::pieces::{Piece, Team};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Smallest grid that still fits one piece inside an empty ring
pub const MIN_DIMENSION: usize = 3;

/// All cells, row-major
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    cells: Vec<Vec<Cell>>,
    cols: usize,
}

impl Grid {
    /// Empty grid, clamped to at least `MIN_DIMENSION` each way
    pub fn new(rows: usize, cols: usize) -> Self {
        let rows = rows.max(MIN_DIMENSION);
        let cols = cols.max(MIN_DIMENSION);
        Self {
            cells: (0..rows).map(|_| empty_row(cols)).collect(),
            cols,
        }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn contains(&self, coord: Coord) -> bool {
        coord.in_bounds(self.rows(), self.cols)
    }

    /// Fail with `InvalidCoordinate` unless `coord` is on the grid
    pub fn check(&self, coord: Coord) -> Result<(), HiveError> {
        if self.contains(coord) {
            Ok(())
        } else {
            Err(HiveError::InvalidCoordinate {
                coord,
                rows: self.rows(),
                cols: self.cols,
            })
        }
    }

    pub fn get(&self, coord: Coord) -> Option<&Cell> {
        if !self.contains(coord) {
            return None;
        }
        self.cells
            .get(coord.row as usize)
            .and_then(|row| row.get(coord.col as usize))
    }

    pub fn cell(&self, coord: Coord) -> Result<&Cell, HiveError> {
        self.check(coord)?;
        Ok(&self.cells[coord.row as usize][coord.col as usize])
    }

    fn cell_mut(&mut self, coord: Coord) -> Result<&mut Cell, HiveError> {
        self.check(coord)?;
        Ok(&mut self.cells[coord.row as usize][coord.col as usize])
    }

    /// Number of pieces stacked at `coord` (0 off-grid)
    pub fn height(&self, coord: Coord) -> usize {
        self.get(coord).map_or(0, Cell::height)
    }

    pub fn is_occupied(&self, coord: Coord) -> bool {
        self.height(coord) > 0
    }

    /// Top piece at `coord`
    pub fn top(&self, coord: Coord) -> Option<&Piece> {
        self.get(coord).and_then(Cell::top)
    }

    /// Every coordinate, row-major
    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        let cols = self.cols;
        (0..self.rows()).flat_map(move |row| (0..cols).map(move |col| Coord::new(row as i32, col as i32)))
    }

    /// Every coordinate holding at least one piece
    pub fn occupied(&self) -> impl Iterator<Item = Coord> + '_ {
        self.coords().filter(|&coord| self.is_occupied(coord))
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().flatten().filter(|cell| !cell.is_empty()).count()
    }

    /// Check if no cell holds a piece
    pub fn is_vacant(&self) -> bool {
        self.cells.iter().flatten().all(Cell::is_empty)
    }

    /// All pieces on the grid, buried ones included
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> {
        self.cells.iter().flatten().flat_map(|cell| cell.pieces().iter())
    }

    // ========================================================================
    // MUTATION
    // ========================================================================

    /// Put `piece` on top of the stack at `coord`
    pub fn push(&mut self, coord: Coord, piece: Piece) -> Result<(), HiveError> {
        self.cell_mut(coord)?.push(piece);
        Ok(())
    }

    /// Lift the top piece off the stack at `coord`
    pub fn pop(&mut self, coord: Coord) -> Result<Option<Piece>, HiveError> {
        Ok(self.cell_mut(coord)?.pop())
    }

    // ========================================================================
    // ADJACENCY
    // ========================================================================

    /// On-grid neighbours of `coord`
    pub fn neighbors(&self, coord: Coord) -> impl Iterator<Item = Coord> {
        coord.neighbors(self.rows(), self.cols)
    }

    /// True if any neighbour other than `excluding` holds a piece
    pub fn has_occupied_neighbor(&self, coord: Coord, excluding: Option<Coord>) -> bool {
        self.neighbors(coord)
            .any(|n| Some(n) != excluding && self.is_occupied(n))
    }

    pub fn occupied_neighbor_count(&self, coord: Coord) -> usize {
        self.neighbors(coord).filter(|&n| self.is_occupied(n)).count()
    }

    /// Walk from `coord` in `direction` while cells are occupied
    ///
    /// Returns the first empty cell, `coord` itself if it is already empty,
    /// or `None` if the walk leaves the grid.
    pub fn first_empty_in_direction(&self, coord: Coord, direction: Direction) -> Option<Coord> {
        let mut current = coord;
        loop {
            if !self.contains(current) {
                return None;
            }
            if !self.is_occupied(current) {
                return Some(current);
            }
            current = current.step(direction);
        }
    }

    // ========================================================================
    // GROWTH
    // ========================================================================

    /// Add an empty row/column on every side the hive touches
    ///
    /// Returns true if the grid changed.
    pub fn grow_if_touching(&mut self) -> bool {
        let mut grew = false;

        loop {
            if self.column_occupied(0) {
                for row in &mut self.cells {
                    row.insert(0, Cell::default());
                }
                self.cols += 1;
                grew = true;
                tracing::trace!("grid grew left to {}x{}", self.rows(), self.cols);
            }

            if self.column_occupied(self.cols - 1) {
                for row in &mut self.cells {
                    row.push(Cell::default());
                }
                self.cols += 1;
                grew = true;
                tracing::trace!("grid grew right to {}x{}", self.rows(), self.cols);
            }

            if self.row_occupied(self.rows() - 1) {
                self.cells.push(empty_row(self.cols));
                grew = true;
                tracing::trace!("grid grew down to {}x{}", self.rows(), self.cols);
            }

            if self.row_occupied(0) {
                // Inserting a row flips every row's parity. Shifting the current
                // even rows left keeps their diagonals pointing at the same cells.
                // Column 0 is empty here because the left side was handled above.
                for row in self.cells.iter_mut().step_by(2) {
                    row.remove(0);
                    row.push(Cell::default());
                }
                self.cells.insert(0, empty_row(self.cols));
                grew = true;
                tracing::trace!("grid grew up to {}x{}", self.rows(), self.cols);

                // The shift may have pushed pieces onto the left edge
                continue;
            }

            return grew;
        }
    }

    /// Drop empty outer rows/columns until exactly one empty ring remains
    ///
    /// Never shrinks a vacant grid or below `MIN_DIMENSION`. Returns true if
    /// the grid changed.
    pub fn shrink_if_clear(&mut self) -> bool {
        if self.is_vacant() {
            return false;
        }

        let mut shrunk = false;
        loop {
            let mut changed = false;

            if self.rows() > MIN_DIMENSION && !self.row_occupied(0) && !self.row_occupied(1) {
                // Inverse of top growth: the rows that become even shift right
                // and the others gain a cell on the right. The column passes
                // below trim whichever side the shift left empty.
                self.cells.remove(0);
                for (r, row) in self.cells.iter_mut().enumerate() {
                    if r % 2 == 0 {
                        row.insert(0, Cell::default());
                    } else {
                        row.push(Cell::default());
                    }
                }
                self.cols += 1;
                changed = true;
            }

            if self.rows() > MIN_DIMENSION && !self.row_occupied(self.rows() - 2) {
                self.cells.pop();
                changed = true;
            }

            if self.cols > MIN_DIMENSION && !self.column_occupied(1) {
                for row in &mut self.cells {
                    row.remove(0);
                }
                self.cols -= 1;
                changed = true;
            }

            if self.cols > MIN_DIMENSION && !self.column_occupied(self.cols - 2) {
                for row in &mut self.cells {
                    row.pop();
                }
                self.cols -= 1;
                changed = true;
            }

            if !changed {
                if shrunk {
                    tracing::trace!("grid shrank to {}x{}", self.rows(), self.cols);
                }
                return shrunk;
            }
            shrunk = true;
        }
    }

    fn row_occupied(&self, row: usize) -> bool {
        self.cells[row].iter().any(|cell| !cell.is_empty())
    }

    fn column_occupied(&self, col: usize) -> bool {
        self.cells.iter().any(|row| !row[col].is_empty())
    }
}

fn empty_row(cols: usize) -> Vec<Cell> {
    (0..cols).map(|_| Cell::default()).collect()
}

/// Text dump: odd rows indented half a cell, `Q1`/`q2` style labels, `^` on stacks
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, row) in self.cells.iter().enumerate() {
            if r % 2 == 1 {
                f.write_str("  ")?;
            }
            for cell in row {
                match cell.top() {
                    None => f.write_str("  . ")?,
                    Some(piece) => {
                        let glyph = match piece.team {
                            Team::First => piece.kind.glyph(),
                            Team::Second => piece.kind.glyph().to_ascii_lowercase(),
                        };
                        let stacked = if cell.height() > 1 { '^' } else { ' ' };
                        write!(f, " {}{} ", glyph, stacked)?;
                    }
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

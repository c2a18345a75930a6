//! One-hive rule: occupied cells must form a single connected group
//!
//! "What if" queries never touch the grid. They read stack heights through
//! a `Hypothetical` view that lifts one top piece and optionally drops it
//! elsewhere, so there is nothing to restore afterwards.

use crate::coord::Coord;
use crate::grid::Grid;
use rustc_hash::FxHashSet;

/// Grid heights with at most one top piece relocated
#[derive(Clone, Copy, Debug)]
struct Hypothetical<'a> {
    grid: &'a Grid,
    lifted: Option<Coord>,
    dropped: Option<Coord>,
}

impl<'a> Hypothetical<'a> {
    fn actual(grid: &'a Grid) -> Self {
        Self { grid, lifted: None, dropped: None }
    }

    /// The top piece at `from` taken off the board
    fn without(grid: &'a Grid, from: Coord) -> Self {
        if !grid.is_occupied(from) {
            return Self::actual(grid);
        }
        Self { grid, lifted: Some(from), dropped: None }
    }

    /// The top piece at `from` moved onto `to`
    fn relocated(grid: &'a Grid, from: Coord, to: Coord) -> Self {
        if !grid.is_occupied(from) {
            return Self::actual(grid);
        }
        Self { grid, lifted: Some(from), dropped: Some(to) }
    }

    fn height(&self, coord: Coord) -> usize {
        let mut height = self.grid.height(coord);
        if self.lifted == Some(coord) {
            height -= 1;
        }
        if self.dropped == Some(coord) {
            height += 1;
        }
        height
    }

    fn is_occupied(&self, coord: Coord) -> bool {
        self.height(coord) > 0
    }

    /// Depth-first walk from any occupied cell; connected iff it reaches all of them
    fn is_connected(&self) -> bool {
        let occupied: Vec<Coord> = self
            .grid
            .coords()
            .filter(|&coord| self.is_occupied(coord))
            .collect();

        let Some(&root) = occupied.first() else {
            return true;
        };

        let mut visited = FxHashSet::default();
        visited.insert(root);
        let mut stack = vec![root];

        while let Some(coord) = stack.pop() {
            for neighbor in self.grid.neighbors(coord) {
                if self.is_occupied(neighbor) && visited.insert(neighbor) {
                    stack.push(neighbor);
                }
            }
        }

        visited.len() == occupied.len()
    }
}

impl Grid {
    /// Check the one-hive rule on the grid as it stands (true when vacant)
    pub fn is_connected(&self) -> bool {
        Hypothetical::actual(self).is_connected()
    }

    /// Check the one-hive rule with the top piece at `cell` lifted off
    ///
    /// Only the top piece is lifted, so a buried piece never matters here.
    pub fn is_connected_excluding(&self, cell: Coord) -> bool {
        Hypothetical::without(self, cell).is_connected()
    }

    /// Check the one-hive rule with the top piece at `from` already moved to `to`
    pub fn is_connected_excluding_and_including(&self, from: Coord, to: Coord) -> bool {
        if !self.contains(to) {
            return false;
        }
        Hypothetical::relocated(self, from, to).is_connected()
    }
}

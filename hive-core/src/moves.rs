//! Per-kind move generation
//!
//! `available_moves` applies each kind's raw rule. `legal_moves` then drops
//! every destination that would split the hive; that filter is the same for
//! every kind.

use crate::coord::{Coord, Direction};
use crate::grid::Grid;
use crate::pieces::PieceKind;
use rustc_hash::FxHashSet;
use std::collections::BTreeSet;

/// Destination cells, ordered by (row, col)
pub type MoveSet = BTreeSet<Coord>;

/// Occupied-neighbour count at which an ant is treated as gated out
const CORNERED_NEIGHBORS: usize = 5;

// ============================================================================
// ENTRY POINTS
// ============================================================================

/// Raw destinations for a `kind` piece standing on top of `from`
pub fn available_moves(kind: PieceKind, grid: &Grid, from: Coord) -> MoveSet {
    match kind {
        PieceKind::QueenBee => queen_moves(grid, from),
        PieceKind::Beetle => beetle_moves(grid, from),
        PieceKind::Grasshopper => grasshopper_moves(grid, from),
        PieceKind::Spider => spider_moves(grid, from),
        PieceKind::SoldierAnt => ant_moves(grid, from),
        // Placeable, but no movement rule
        PieceKind::Mosquito | PieceKind::Ladybug | PieceKind::Pillbug => MoveSet::new(),
    }
}

/// Destinations for the top piece at `from` that keep the hive connected
///
/// Empty when `from` holds no piece.
pub fn legal_moves(grid: &Grid, from: Coord) -> MoveSet {
    let Some(piece) = grid.top(from) else {
        return MoveSet::new();
    };

    available_moves(piece.kind, grid, from)
        .into_iter()
        .filter(|&to| grid.is_connected_excluding_and_including(from, to))
        .collect()
}

// ============================================================================
// RULES
// ============================================================================

/// One step onto any empty neighbour
fn queen_moves(grid: &Grid, from: Coord) -> MoveSet {
    grid.neighbors(from)
        .filter(|&n| !grid.is_occupied(n))
        .collect()
}

/// One step onto any neighbour, climbing if it is occupied
fn beetle_moves(grid: &Grid, from: Coord) -> MoveSet {
    grid.neighbors(from).collect()
}

/// Straight jump over at least one piece to the first empty cell
fn grasshopper_moves(grid: &Grid, from: Coord) -> MoveSet {
    Direction::ALL
        .into_iter()
        .filter_map(|direction| grid.first_empty_in_direction(from, direction))
        .filter(|&landing| landing != from && !from.is_adjacent(landing))
        .collect()
}

/// Exactly three steps around the hive, no backtracking
fn spider_moves(grid: &Grid, from: Coord) -> MoveSet {
    let first = boundary_step(grid, [from]);
    let second = boundary_step(grid, first.iter().copied());
    let third = boundary_step(grid, second.iter().copied());

    third
        .into_iter()
        .filter(|coord| !first.contains(coord) && !second.contains(coord))
        .collect()
}

/// Any empty cell touching the hive (not counting the ant itself), unless gated
fn ant_moves(grid: &Grid, from: Coord) -> MoveSet {
    grid.coords()
        .filter(|&coord| {
            !grid.is_occupied(coord)
                && grid.has_occupied_neighbor(coord, Some(from))
                && grid.occupied_neighbor_count(coord) != CORNERED_NEIGHBORS
        })
        .collect()
}

/// Empty, hive-adjacent neighbours of any cell in `frontier`
fn boundary_step(grid: &Grid, frontier: impl IntoIterator<Item = Coord>) -> FxHashSet<Coord> {
    frontier
        .into_iter()
        .flat_map(|coord| grid.neighbors(coord))
        .filter(|&n| !grid.is_occupied(n) && grid.has_occupied_neighbor(n, None))
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::{Piece, Team};

    fn put(grid: &mut Grid, coord: Coord, kind: PieceKind) {
        grid.push(coord, Piece::new(kind, Team::First)).unwrap();
    }

    fn set(coords: &[(i32, i32)]) -> MoveSet {
        coords.iter().map(|&(r, c)| Coord::new(r, c)).collect()
    }

    #[test]
    fn test_queen_steps_to_empty_neighbors() {
        let mut grid = Grid::new(7, 7);
        let queen = Coord::new(3, 3);
        put(&mut grid, queen, PieceKind::QueenBee);
        put(&mut grid, Coord::new(3, 4), PieceKind::SoldierAnt);

        let raw = available_moves(PieceKind::QueenBee, &grid, queen);
        assert_eq!(raw.len(), 5);
        assert!(!raw.contains(&Coord::new(3, 4)));

        // Only the two cells flanking the ant keep the pair together
        assert_eq!(legal_moves(&grid, queen), set(&[(2, 4), (4, 4)]));
    }

    #[test]
    fn test_beetle_may_climb() {
        let mut grid = Grid::new(7, 7);
        let beetle = Coord::new(3, 3);
        put(&mut grid, beetle, PieceKind::Beetle);
        put(&mut grid, Coord::new(3, 4), PieceKind::QueenBee);

        let raw = available_moves(PieceKind::Beetle, &grid, beetle);
        assert_eq!(raw.len(), 6);
        assert!(legal_moves(&grid, beetle).contains(&Coord::new(3, 4)));
    }

    #[test]
    fn test_grasshopper_jumps_single_piece() {
        let mut grid = Grid::new(7, 7);
        let hopper = Coord::new(3, 3);
        put(&mut grid, hopper, PieceKind::Grasshopper);
        put(&mut grid, hopper.step(Direction::Right), PieceKind::QueenBee);

        let expected = set(&[(3, 5)]);
        assert_eq!(available_moves(PieceKind::Grasshopper, &grid, hopper), expected);
        assert_eq!(legal_moves(&grid, hopper), expected);
    }

    #[test]
    fn test_grasshopper_jumps_a_row() {
        let mut grid = Grid::new(7, 9);
        let hopper = Coord::new(3, 1);
        put(&mut grid, hopper, PieceKind::Grasshopper);
        for col in 2..6 {
            put(&mut grid, Coord::new(3, col), PieceKind::SoldierAnt);
        }
        assert_eq!(legal_moves(&grid, hopper), set(&[(3, 6)]));
    }

    #[test]
    fn test_grasshopper_without_neighbors_cannot_move() {
        let mut grid = Grid::new(5, 5);
        let hopper = Coord::new(2, 2);
        put(&mut grid, hopper, PieceKind::Grasshopper);
        assert!(available_moves(PieceKind::Grasshopper, &grid, hopper).is_empty());
    }

    #[test]
    fn test_spider_walks_exactly_three() {
        // Spider at the end of a five-cell chain along odd row 3
        let mut grid = Grid::new(7, 8);
        let spider = Coord::new(3, 1);
        put(&mut grid, spider, PieceKind::Spider);
        for col in 2..6 {
            put(&mut grid, Coord::new(3, col), PieceKind::SoldierAnt);
        }

        let legal = legal_moves(&grid, spider);
        assert_eq!(legal, set(&[(2, 4), (4, 4)]));

        // Nothing one or two steps away
        for coord in &legal {
            assert!(!spider.is_adjacent(*coord));
        }
        for two_steps in [(2, 2), (2, 3), (4, 2), (4, 3), (3, 0), (2, 1), (4, 1)] {
            assert!(!legal.contains(&Coord::new(two_steps.0, two_steps.1)));
        }
    }

    #[test]
    fn test_ant_reaches_whole_perimeter() {
        let mut grid = Grid::new(7, 7);
        let ant = Coord::new(3, 2);
        put(&mut grid, ant, PieceKind::SoldierAnt);
        put(&mut grid, Coord::new(3, 3), PieceKind::QueenBee);

        let moves = legal_moves(&grid, ant);
        // Every empty neighbour of the queen except the ant's own cell
        let expected: MoveSet = grid
            .neighbors(Coord::new(3, 3))
            .filter(|&n| n != ant)
            .collect();
        assert_eq!(moves, expected);
    }

    #[test]
    fn test_ant_excludes_cornered_cells() {
        let mut grid = Grid::new(7, 7);
        let hole = Coord::new(3, 3);
        let mut ring: Vec<Coord> = grid.neighbors(hole).collect();
        // Leave one side of the ring open so the hole has five neighbours
        ring.pop();
        for &coord in &ring {
            put(&mut grid, coord, PieceKind::QueenBee);
        }
        let ant = Coord::new(0, 0);
        put(&mut grid, ant, PieceKind::SoldierAnt);

        let raw = available_moves(PieceKind::SoldierAnt, &grid, ant);
        assert_eq!(grid.occupied_neighbor_count(hole), 5);
        assert!(!raw.contains(&hole));
        assert!(!raw.is_empty());
    }

    #[test]
    fn test_expansion_kinds_never_move() {
        let mut grid = Grid::new(5, 5);
        let at = Coord::new(2, 2);
        put(&mut grid, Coord::new(2, 1), PieceKind::QueenBee);
        for kind in [PieceKind::Mosquito, PieceKind::Ladybug, PieceKind::Pillbug] {
            let mut grid = grid.clone();
            put(&mut grid, at, kind);
            assert!(legal_moves(&grid, at).is_empty());
        }
    }

    #[test]
    fn test_empty_cell_has_no_moves() {
        let grid = Grid::new(5, 5);
        assert!(legal_moves(&grid, Coord::new(2, 2)).is_empty());
    }
}

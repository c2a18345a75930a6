//! Error types for turn application

use crate::coord::Coord;
use crate::pieces::{PieceKind, Team};

/// Errors raised by the rules engine
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum HiveError {
    #[error("illegal action: {0}")]
    Illegal(#[from] IllegalAction),

    #[error("coordinate {coord} is outside the {rows}x{cols} grid")]
    InvalidCoordinate { coord: Coord, rows: usize, cols: usize },

    #[error("remote turn cannot be replayed: {0}")]
    Desync(#[from] Desync),

    #[error("unknown piece kind: {0}")]
    UnknownPieceKind(String),
}

/// A local action the rules do not allow; the board is left unchanged
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum IllegalAction {
    #[error("cell {0} is already occupied")]
    Occupied(Coord),

    #[error("cell {0} does not touch the hive")]
    Detached(Coord),

    #[error("opening placement at {0} touches the grid edge")]
    EdgeOpening(Coord),

    #[error("no {0} left in hand")]
    HandExhausted(PieceKind),

    #[error("no piece at {0}")]
    EmptySource(Coord),

    #[error("piece at {0} belongs to the other team")]
    NotYourPiece(Coord),

    #[error("{to} is not a legal destination from {from}")]
    UnreachableDestination { from: Coord, to: Coord },
}

/// A remote turn that cannot apply to the local board
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Desync {
    #[error("{team:?} has no {kind} left to place")]
    HandExhausted { team: Team, kind: PieceKind },

    #[error("no piece to move at {0}")]
    EmptySource(Coord),
}

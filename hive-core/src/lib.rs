//! Hive Core - Rules engine
//!
//! This crate provides the core game logic for Hive:
//! - Grid geometry (offset hex coordinates on a growable rectangle)
//! - Piece kinds, teams and hands
//! - Cell stacks and the one-hive connectivity rule
//! - Per-kind move generation
//! - Board turn state machine with local and remote turn application

pub mod board;
pub mod cell;
pub mod connectivity;
pub mod coord;
pub mod error;
pub mod grid;
pub mod moves;
pub mod pieces;
pub mod relay;
pub mod ruleset;
pub mod turn;

// Re-exports for convenient access
pub use board::{Board, BoardEvent, BoardState, Hand};
pub use cell::Cell;
pub use coord::{Coord, Direction};
pub use error::{Desync, HiveError, IllegalAction};
pub use grid::Grid;
pub use moves::{available_moves, legal_moves, MoveSet};
pub use pieces::{Piece, PieceKind, Team, EMPTY_COLOR};
pub use relay::{ChannelRelay, NullRelay, TurnRelay};
pub use ruleset::{HandPiece, RuleSet};
pub use turn::Turn;

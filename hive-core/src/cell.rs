//! A single grid cell holding a stack of pieces

use crate::pieces::{Piece, EMPTY_COLOR};
use serde::{Deserialize, Serialize};

/// Stack of pieces, bottom first
///
/// Only the top piece is visible and movable; anything under it is buried.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cell {
    stack: Vec<Piece>,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Topmost piece
    pub fn top(&self) -> Option<&Piece> {
        self.stack.last()
    }

    pub fn height(&self) -> usize {
        self.stack.len()
    }

    /// All pieces, bottom to top
    pub fn pieces(&self) -> &[Piece] {
        &self.stack
    }

    pub fn push(&mut self, piece: Piece) {
        self.stack.push(piece);
    }

    pub fn pop(&mut self) -> Option<Piece> {
        self.stack.pop()
    }

    /// Colour of the visible piece, or the empty colour
    pub fn color_for_display(&self) -> &'static str {
        self.top().map_or(EMPTY_COLOR, |piece| piece.kind.color())
    }
}

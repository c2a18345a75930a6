//! Piece kinds, teams and piece instances

use crate::error::HiveError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Display colour of a cell with no pieces
pub const EMPTY_COLOR: &str = "#89fa91";

/// Side of the board
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    First = 0,
    Second = 1,
}

impl Team {
    pub fn opponent(self) -> Self {
        match self {
            Team::First => Team::Second,
            Team::Second => Team::First,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Insect kind
///
/// Serialised with the same string tags the turn protocol uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PieceKind {
    #[serde(rename = "Queen Bee")]
    QueenBee,
    Spider,
    Beetle,
    Grasshopper,
    #[serde(rename = "Soldier Ant")]
    SoldierAnt,
    Mosquito,
    Ladybug,
    Pillbug,
}

impl PieceKind {
    pub const COUNT: usize = 8;

    pub const ALL: [PieceKind; PieceKind::COUNT] = [
        PieceKind::QueenBee,
        PieceKind::Spider,
        PieceKind::Beetle,
        PieceKind::Grasshopper,
        PieceKind::SoldierAnt,
        PieceKind::Mosquito,
        PieceKind::Ladybug,
        PieceKind::Pillbug,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Wire tag
    pub fn name(self) -> &'static str {
        match self {
            PieceKind::QueenBee => "Queen Bee",
            PieceKind::Spider => "Spider",
            PieceKind::Beetle => "Beetle",
            PieceKind::Grasshopper => "Grasshopper",
            PieceKind::SoldierAnt => "Soldier Ant",
            PieceKind::Mosquito => "Mosquito",
            PieceKind::Ladybug => "Ladybug",
            PieceKind::Pillbug => "Pillbug",
        }
    }

    /// Display colour
    pub fn color(self) -> &'static str {
        match self {
            PieceKind::QueenBee => "#ebc428",
            PieceKind::Spider => "#8f7d38",
            PieceKind::Beetle => "#9926bf",
            PieceKind::Grasshopper => "#46ab3f",
            PieceKind::SoldierAnt => "#439cbf",
            PieceKind::Mosquito => "#969696",
            PieceKind::Ladybug => "#b83232",
            PieceKind::Pillbug => "#4ae8ed",
        }
    }

    /// Single-letter abbreviation used in text dumps
    pub fn glyph(self) -> char {
        match self {
            PieceKind::QueenBee => 'Q',
            PieceKind::Spider => 'S',
            PieceKind::Beetle => 'B',
            PieceKind::Grasshopper => 'G',
            PieceKind::SoldierAnt => 'A',
            PieceKind::Mosquito => 'M',
            PieceKind::Ladybug => 'L',
            PieceKind::Pillbug => 'P',
        }
    }

    /// Pieces of this kind in a base-game hand
    pub fn starting_count(self) -> u8 {
        match self {
            PieceKind::QueenBee => 1,
            PieceKind::Spider => 2,
            PieceKind::Beetle => 2,
            PieceKind::Grasshopper => 3,
            PieceKind::SoldierAnt => 3,
            PieceKind::Mosquito | PieceKind::Ladybug | PieceKind::Pillbug => 0,
        }
    }

    /// Whether this kind has a movement rule at all
    pub fn can_move(self) -> bool {
        !matches!(self, PieceKind::Mosquito | PieceKind::Ladybug | PieceKind::Pillbug)
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PieceKind {
    type Err = HiveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PieceKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| HiveError::UnknownPieceKind(s.to_string()))
    }
}

/// A piece on the board
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub team: Team,
}

impl Piece {
    pub const fn new(kind: PieceKind, team: Team) -> Self {
        Self { kind, team }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_lookup() {
        assert_eq!("Queen Bee".parse::<PieceKind>().unwrap(), PieceKind::QueenBee);
        assert_eq!("Soldier Ant".parse::<PieceKind>().unwrap(), PieceKind::SoldierAnt);
        assert!("Dragonfly".parse::<PieceKind>().is_err());
    }

    #[test]
    fn test_serde_tags_match_names() {
        for kind in PieceKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.name()));
        }
    }

    #[test]
    fn test_base_hand_size() {
        let total: u32 = PieceKind::ALL.iter().map(|k| k.starting_count() as u32).sum();
        assert_eq!(total, 11);
    }

    #[test]
    fn test_expansion_kinds_have_no_movement() {
        for kind in [PieceKind::Mosquito, PieceKind::Ladybug, PieceKind::Pillbug] {
            assert!(!kind.can_move());
            assert_eq!(kind.starting_count(), 0);
        }
        assert!(PieceKind::Beetle.can_move());
    }

    #[test]
    fn test_opponent() {
        assert_eq!(Team::First.opponent(), Team::Second);
        assert_eq!(Team::Second.opponent(), Team::First);
    }
}

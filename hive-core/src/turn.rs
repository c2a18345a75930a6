//! Turn message shared by the local UI and the network relay

use crate::coord::Coord;
use crate::pieces::PieceKind;
use serde::{Deserialize, Serialize};

/// A single committed action
///
/// Carries no player identity: the active team is implied by the board.
///
/// JSON shape:
/// `{"turnType":"place","insectType":"Queen Bee","toCoord":{"row":4,"col":4}}`
/// or `{"turnType":"move","fromCoord":{..},"toCoord":{..}}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "turnType", rename_all = "camelCase")]
pub enum Turn {
    #[serde(rename_all = "camelCase")]
    Place { insect_type: PieceKind, to_coord: Coord },
    #[serde(rename_all = "camelCase")]
    Move { from_coord: Coord, to_coord: Coord },
}

impl Turn {
    pub fn place(kind: PieceKind, to: Coord) -> Self {
        Turn::Place { insect_type: kind, to_coord: to }
    }

    pub fn movement(from: Coord, to: Coord) -> Self {
        Turn::Move { from_coord: from, to_coord: to }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_place_wire_shape() {
        let turn = Turn::place(PieceKind::SoldierAnt, Coord::new(4, 5));
        let value = serde_json::to_value(turn).unwrap();
        assert_eq!(
            value,
            json!({"turnType": "place", "insectType": "Soldier Ant", "toCoord": {"row": 4, "col": 5}})
        );
    }

    #[test]
    fn test_move_wire_shape() {
        let text = r#"{"turnType":"move","fromCoord":{"row":1,"col":2},"toCoord":{"row":3,"col":4}}"#;
        let turn: Turn = serde_json::from_str(text).unwrap();
        assert_eq!(turn, Turn::movement(Coord::new(1, 2), Coord::new(3, 4)));
    }

    #[test]
    fn test_unknown_insect_rejected() {
        let text = r#"{"turnType":"place","insectType":"Dragonfly","toCoord":{"row":0,"col":0}}"#;
        assert!(serde_json::from_str::<Turn>(text).is_err());
    }
}

//! Websocket frames
//!
//! Every frame is a JSON object tagged by `type`:
//!
//! ```text
//! client -> relay   {"type":"start-game"}
//!                   {"type":"join-game","gameId":"a1b2c"}
//!                   {"type":"turn","turn":{..}}
//! relay -> client   {"type":"game-start","gameId":"a1b2c"}
//!                   {"type":"game-joined"}
//!                   {"type":"turn","turn":{..}}
//!                   {"type":"opponent-left"}
//!                   {"type":"error","message":".."}
//! ```

use hive_core::Turn;
use serde::{Deserialize, Serialize};

/// Frame sent by a player
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ClientMessage {
    StartGame,
    JoinGame {
        #[serde(rename = "gameId")]
        game_id: String,
    },
    Turn { turn: Turn },
}

/// Frame sent by the relay
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ServerMessage {
    GameStart {
        #[serde(rename = "gameId")]
        game_id: String,
    },
    GameJoined,
    Turn { turn: Turn },
    OpponentLeft,
    Error { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use hive_core::{Coord, PieceKind};
    use serde_json::json;

    #[test]
    fn test_client_frames_parse() {
        let start: ClientMessage = serde_json::from_str(r#"{"type":"start-game"}"#).unwrap();
        assert_eq!(start, ClientMessage::StartGame);

        let join: ClientMessage =
            serde_json::from_str(r#"{"type":"join-game","gameId":"AB12C"}"#).unwrap();
        assert_eq!(join, ClientMessage::JoinGame { game_id: "AB12C".to_string() });

        let turn: ClientMessage = serde_json::from_value(json!({
            "type": "turn",
            "turn": {"turnType": "place", "insectType": "Beetle", "toCoord": {"row": 2, "col": 3}}
        }))
        .unwrap();
        assert_eq!(
            turn,
            ClientMessage::Turn { turn: Turn::place(PieceKind::Beetle, Coord::new(2, 3)) }
        );
    }

    #[test]
    fn test_server_frames_shape() {
        let start = ServerMessage::GameStart { game_id: "0f3a9".to_string() };
        assert_eq!(
            serde_json::to_value(&start).unwrap(),
            json!({"type": "game-start", "gameId": "0f3a9"})
        );
        assert_eq!(
            serde_json::to_value(&ServerMessage::OpponentLeft).unwrap(),
            json!({"type": "opponent-left"})
        );
    }

    #[test]
    fn test_unknown_frame_rejected() {
        assert!(serde_json::from_str::<ClientMessage>(r#"{"type":"resign"}"#).is_err());
    }
}

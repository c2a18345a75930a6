//! Websocket endpoint
//!
//! One task drains the peer's outbox into the socket, another parses
//! incoming frames. Whichever ends first tears the other down, then the
//! peer is disconnected from the relay.

use crate::protocol::{ClientMessage, ServerMessage};
use crate::state::{PeerId, RelayState};
use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::mpsc;

pub async fn socket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<RelayState>>,
) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: Arc<RelayState>) {
    let (mut sender, mut receiver) = socket.split();
    let (outbox, mut inbox) = mpsc::unbounded_channel::<ServerMessage>();
    let peer = state.connect(outbox);

    let mut send_task = tokio::spawn(async move {
        while let Some(message) = inbox.recv().await {
            let text = match serde_json::to_string(&message) {
                Ok(text) => text,
                Err(err) => {
                    tracing::warn!("cannot encode {:?}: {}", message, err);
                    continue;
                }
            };
            if sender.send(Message::Text(text)).await.is_err() {
                break;
            }
        }
    });

    let frames_state = Arc::clone(&state);
    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(message)) = receiver.next().await {
            match message {
                Message::Text(text) => handle_frame(&frames_state, peer, &text),
                Message::Close(_) => break,
                _ => {}
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }

    state.disconnect(peer);
}

/// Parse one text frame and act on it
fn handle_frame(state: &RelayState, peer: PeerId, text: &str) {
    match serde_json::from_str::<ClientMessage>(text) {
        Ok(message) => state.handle(peer, message),
        Err(err) => {
            tracing::warn!("peer {} sent a malformed frame: {}", peer, err);
            state.send_to(
                peer,
                ServerMessage::Error {
                    message: format!("malformed frame: {}", err),
                },
            );
        }
    }
}

//! Relay state management
//!
//! Pairs connected peers into two-player sessions and forwards turns between
//! them. Each peer has an outbox; the socket task drains it into the
//! websocket, so every method here is synchronous.

use crate::protocol::{ClientMessage, ServerMessage};
use hive_core::Turn;
use rand::Rng;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::mpsc::UnboundedSender;

/// Connection identifier, unique for the relay's lifetime
pub type PeerId = u64;

/// Frames queued for one peer
pub type Outbox = UnboundedSender<ServerMessage>;

/// Length of a game id
const GAME_ID_LEN: usize = 5;

/// Requests the relay refuses
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RelayError {
    #[error("no game with id {0}")]
    UnknownGame(String),

    #[error("game {0} already has two players")]
    GameFull(String),

    #[error("already in game {0}")]
    AlreadyInGame(String),

    #[error("no opponent to send the turn to")]
    NotPaired,
}

/// Two-player session
#[derive(Debug)]
struct Session {
    host: PeerId,
    guest: Option<PeerId>,
}

impl Session {
    fn opponent_of(&self, peer: PeerId) -> Option<PeerId> {
        if peer == self.host {
            self.guest
        } else {
            Some(self.host)
        }
    }
}

#[derive(Debug, Default)]
struct Registry {
    next_peer: PeerId,
    outboxes: HashMap<PeerId, Outbox>,
    sessions: HashMap<String, Session>,
    /// Which game each seated peer belongs to
    memberships: HashMap<PeerId, String>,
}

impl Registry {
    fn send(&self, peer: PeerId, message: ServerMessage) {
        if let Some(outbox) = self.outboxes.get(&peer) {
            // A closed outbox means the peer is mid-disconnect
            let _ = outbox.send(message);
        }
    }

    fn fresh_game_id(&self) -> String {
        let mut rng = rand::thread_rng();
        loop {
            let id: String = (0..GAME_ID_LEN)
                .map(|_| char::from_digit(rng.gen_range(0..16), 16).unwrap_or('0'))
                .collect();
            if !self.sessions.contains_key(&id) {
                return id;
            }
        }
    }
}

/// Relay-wide shared state
pub struct RelayState {
    registry: Mutex<Registry>,
}

impl RelayState {
    pub fn new() -> Self {
        Self {
            registry: Mutex::new(Registry::default()),
        }
    }

    fn registry(&self) -> MutexGuard<'_, Registry> {
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a new connection
    pub fn connect(&self, outbox: Outbox) -> PeerId {
        let mut registry = self.registry();
        let peer = registry.next_peer;
        registry.next_peer += 1;
        registry.outboxes.insert(peer, outbox);
        tracing::debug!("peer {} connected", peer);
        peer
    }

    /// Forget a connection, ending its session and telling the opponent
    pub fn disconnect(&self, peer: PeerId) {
        let mut registry = self.registry();
        registry.outboxes.remove(&peer);

        let Some(game_id) = registry.memberships.remove(&peer) else {
            return;
        };
        let Some(session) = registry.sessions.remove(&game_id) else {
            return;
        };
        if let Some(opponent) = session.opponent_of(peer) {
            registry.memberships.remove(&opponent);
            registry.send(opponent, ServerMessage::OpponentLeft);
        }
        tracing::info!("game {} closed: peer {} left", game_id, peer);
    }

    /// Open a session hosted by `peer`; replies `game-start`
    pub fn start_game(&self, peer: PeerId) -> Result<String, RelayError> {
        let mut registry = self.registry();
        if let Some(current) = registry.memberships.get(&peer) {
            return Err(RelayError::AlreadyInGame(current.clone()));
        }

        let game_id = registry.fresh_game_id();
        registry
            .sessions
            .insert(game_id.clone(), Session { host: peer, guest: None });
        registry.memberships.insert(peer, game_id.clone());
        registry.send(peer, ServerMessage::GameStart { game_id: game_id.clone() });

        tracing::info!("game {} started by peer {}", game_id, peer);
        Ok(game_id)
    }

    /// Seat `peer` as the second player; the id is matched case-insensitively
    pub fn join_game(&self, peer: PeerId, game_id: &str) -> Result<(), RelayError> {
        let game_id = game_id.to_lowercase();
        let mut registry = self.registry();
        if let Some(current) = registry.memberships.get(&peer) {
            return Err(RelayError::AlreadyInGame(current.clone()));
        }

        let session = registry
            .sessions
            .get_mut(&game_id)
            .ok_or_else(|| RelayError::UnknownGame(game_id.clone()))?;
        if session.guest.is_some() {
            return Err(RelayError::GameFull(game_id));
        }
        session.guest = Some(peer);

        registry.memberships.insert(peer, game_id.clone());
        registry.send(peer, ServerMessage::GameJoined);

        tracing::info!("peer {} joined game {}", peer, game_id);
        Ok(())
    }

    /// Pass `turn` to the other player of `peer`'s session, unchanged
    pub fn forward_turn(&self, peer: PeerId, turn: Turn) -> Result<(), RelayError> {
        let registry = self.registry();
        let opponent = registry
            .memberships
            .get(&peer)
            .and_then(|game_id| registry.sessions.get(game_id))
            .and_then(|session| session.opponent_of(peer))
            .ok_or(RelayError::NotPaired)?;

        registry.send(opponent, ServerMessage::Turn { turn });
        Ok(())
    }

    /// Act on one client frame, replying with an `error` frame on refusal
    pub fn handle(&self, peer: PeerId, message: ClientMessage) {
        let result = match message {
            ClientMessage::StartGame => self.start_game(peer).map(|_| ()),
            ClientMessage::JoinGame { game_id } => self.join_game(peer, &game_id),
            ClientMessage::Turn { turn } => self.forward_turn(peer, turn),
        };

        if let Err(err) = result {
            tracing::warn!("peer {}: {}", peer, err);
            self.send_to(peer, ServerMessage::Error { message: err.to_string() });
        }
    }

    /// Queue a frame for one peer
    pub fn send_to(&self, peer: PeerId, message: ServerMessage) {
        self.registry().send(peer, message);
    }

    /// Open sessions, paired or waiting
    pub fn session_count(&self) -> usize {
        self.registry().sessions.len()
    }

    /// Live connections
    pub fn peer_count(&self) -> usize {
        self.registry().outboxes.len()
    }
}

impl Default for RelayState {
    fn default() -> Self {
        Self::new()
    }
}

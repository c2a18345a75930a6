//! Hive Relay - two-player turn forwarding
//!
//! This crate provides the session relay:
//! - Websocket endpoint for pairing (start/join) and turn forwarding
//! - Status endpoint reporting open sessions
//!
//! The relay knows the turn message shape but nothing about the rules;
//! each peer validates and applies turns on its own board.

pub mod protocol;
mod routes;
mod state;

use axum::http::{HeaderValue, Method};
use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

pub use protocol::{ClientMessage, ServerMessage};
pub use state::{Outbox, PeerId, RelayError, RelayState};

/// Relay configuration
#[derive(Clone, Debug)]
pub struct RelayConfig {
    pub port: u16,
    /// Browser origin allowed to open the websocket; `None` allows any
    pub allowed_origin: Option<String>,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            port: 3001,
            allowed_origin: Some("http://localhost:3000".to_string()),
        }
    }
}

/// Create the router with all routes
pub fn create_router(config: &RelayConfig, state: Arc<RelayState>) -> anyhow::Result<Router> {
    let cors = match &config.allowed_origin {
        Some(origin) => CorsLayer::new()
            .allow_origin(origin.parse::<HeaderValue>()?)
            .allow_methods([Method::GET, Method::POST]),
        None => CorsLayer::permissive(),
    };

    Ok(Router::new()
        // Status endpoint
        .route("/api/status", get(routes::status::status_handler))
        // Pairing and turn forwarding
        .route("/ws", get(routes::socket::socket_handler))
        // Shared state
        .with_state(state)
        .layer(cors))
}

/// Start the relay
pub async fn run_relay(config: RelayConfig) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let state = Arc::new(RelayState::new());
    let router = create_router(&config, state)?;

    tracing::info!("Hive relay listening on ws://0.0.0.0:{}/ws", config.port);
    if let Some(origin) = &config.allowed_origin {
        tracing::info!("Accepting browser connections from {}", origin);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

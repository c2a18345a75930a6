//! Status endpoint

use crate::state::RelayState;
use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

#[derive(Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub sessions: usize,
    pub peers: usize,
}

pub async fn status_handler(State(state): State<Arc<RelayState>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        sessions: state.session_count(),
        peers: state.peer_count(),
    })
}

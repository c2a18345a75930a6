//! Integration tests for hive-relay HTTP routes

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use hive_relay::{create_router, RelayConfig, RelayState, ServerMessage};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::mpsc;
use tower::ServiceExt;

fn test_app(state: Arc<RelayState>) -> axum::Router {
    let config = RelayConfig::default();
    create_router(&config, state).unwrap()
}

async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
}

#[tokio::test]
async fn test_status_endpoint() {
    let (status, json) = get_json(test_app(Arc::new(RelayState::new())), "/api/status").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["sessions"], 0);
}

#[tokio::test]
async fn test_status_counts_sessions() {
    let state = Arc::new(RelayState::new());
    let (tx, mut rx) = mpsc::unbounded_channel();
    let host = state.connect(tx);
    let game_id = state.start_game(host).unwrap();
    assert_eq!(rx.recv().await, Some(ServerMessage::GameStart { game_id }));

    let (_, json) = get_json(test_app(Arc::clone(&state)), "/api/status").await;
    assert_eq!(json["sessions"], 1);
    assert_eq!(json["peers"], 1);
}

#[tokio::test]
async fn test_ws_requires_upgrade() {
    let response = test_app(Arc::new(RelayState::new()))
        .oneshot(Request::builder().uri("/ws").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn test_unknown_route() {
    let (status, _) = get_json(test_app(Arc::new(RelayState::new())), "/api/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[test]
fn test_bad_origin_rejected() {
    let config = RelayConfig {
        port: 0,
        allowed_origin: Some("bad\norigin".to_string()),
    };
    assert!(create_router(&config, Arc::new(RelayState::new())).is_err());
}

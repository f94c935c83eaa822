//! Router harness shared by the route tests.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tempfile::TempDir;
use tokio::sync::RwLock;
use tower::util::ServiceExt;

use crate::api::build_router;
use crate::api::state::AppState;
use crate::config::ServerConfig;
use crate::identity::StaticIdentity;
use crate::models::{Entity, EntityKind};
use crate::roster::Roster;
use crate::storage::{JsonlEntityStore, JsonlWriter, StorageConfig};

/// App state over a temporary store pre-filled with `players` and `builders`.
///
/// The identity service knows one id, `"p9"`, as `"Notch"`.
pub fn test_state(players: Vec<Entity>, builders: Vec<Entity>) -> (AppState, TempDir) {
    let dir = TempDir::new().unwrap();
    let config = StorageConfig::new(dir.path().to_path_buf());
    JsonlWriter::new(config.entity_path(EntityKind::Player))
        .write_all(&players)
        .unwrap();
    JsonlWriter::new(config.entity_path(EntityKind::Builder))
        .write_all(&builders)
        .unwrap();

    let state = AppState {
        store: Arc::new(JsonlEntityStore::new(config)),
        roster: Arc::new(RwLock::new(Roster::new(players, builders))),
        identity: Arc::new(StaticIdentity::new().with_name("p9", "Notch")),
    };
    (state, dir)
}

/// Router over [`test_state`].
pub fn test_app(players: Vec<Entity>, builders: Vec<Entity>) -> (Router, TempDir) {
    let (state, dir) = test_state(players, builders);
    (build_router(state, &ServerConfig::default()), dir)
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let resp = app.oneshot(request).await.unwrap();
    let status = resp.status();
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

pub async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    send(app, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

pub async fn post_json(app: Router, uri: &str, body: &str) -> (StatusCode, Value) {
    send(
        app,
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

//! REST API endpoints.
//!
//! Axum-based HTTP API serving leaderboards, profiles and mode columns from
//! the in-memory roster, and accepting tier submissions.

pub mod routes;
pub mod state;
pub mod views;

use axum::{
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use thiserror::Error;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::config::ServerConfig;
use crate::models::{ModeCategory, Region};
use crate::submission::SubmitError;

use self::state::AppState;

/// API error types.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Missing required fields: {}", .0.join(", "))]
    Validation(Vec<&'static str>),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing: Option<Vec<&'static str>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        let missing = match &self {
            ApiError::Validation(fields) => Some(fields.clone()),
            _ => None,
        };

        let body = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
                missing,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<SubmitError> for ApiError {
    fn from(e: SubmitError) -> Self {
        match e {
            SubmitError::Validation(v) => ApiError::Validation(v.missing),
            SubmitError::Storage(s) => ApiError::Internal(s.to_string()),
        }
    }
}

/// Parse an optional `region` query value.
pub fn parse_region(raw: Option<&str>) -> Result<Option<Region>, ApiError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(s) => Region::normalize(s)
            .map(Some)
            .ok_or_else(|| ApiError::BadRequest(format!("Unknown region: {}", s))),
    }
}

/// Parse an optional `category` query value.
pub fn parse_category(raw: Option<&str>) -> Result<Option<ModeCategory>, ApiError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(s) => ModeCategory::parse(s)
            .map(Some)
            .ok_or_else(|| ApiError::BadRequest(format!("Unknown category: {}", s))),
    }
}

fn cors_layer(origin: &str) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origin == "*" {
        return layer.allow_origin(Any);
    }
    match origin.parse::<HeaderValue>() {
        Ok(value) => layer.allow_origin(value),
        Err(_) => {
            warn!("Invalid CORS origin {:?}, allowing any", origin);
            layer.allow_origin(Any)
        }
    }
}

/// Build the API router.
pub fn build_router(state: AppState, server: &ServerConfig) -> Router {
    let api = Router::new()
        .route("/api/health", get(routes::health))
        .route("/api/players", get(routes::leaderboard::list_players))
        .route("/api/players/:id", get(routes::profile::get_player))
        .route("/api/players/:id/retired", post(routes::submit::set_retired))
        .route("/api/builders", get(routes::leaderboard::list_builders))
        .route("/api/builders/:id", get(routes::profile::get_builder))
        .route("/api/modes/:subject", get(routes::modes::get_mode))
        .route("/api/categories", get(routes::modes::list_categories))
        .route("/api/tiers", post(routes::submit::submit_tier))
        .route("/api/reload", post(routes::submit::reload))
        .with_state(state);

    let app = match &server.static_dir {
        Some(dir) => api.fallback_service(ServeDir::new(dir)),
        None => api,
    };

    app.layer(cors_layer(&server.cors_origin))
        .layer(TraceLayer::new_for_http())
}

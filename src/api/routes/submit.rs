use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::views::EntityView;
use crate::api::ApiError;
use crate::models::EntityId;
use crate::roster;
use crate::submission::{self, TierSubmission};

pub async fn submit_tier(
    State(state): State<AppState>,
    Json(body): Json<TierSubmission>,
) -> Result<Json<EntityView>, ApiError> {
    let entity = submission::submit(
        &state.roster,
        state.store.as_ref(),
        state.identity.as_ref(),
        &body,
    )
    .await?;
    Ok(Json(EntityView::from(&entity)))
}

#[derive(Debug, Deserialize)]
pub struct RetireRequest {
    pub subject: String,
    #[serde(default = "default_retired")]
    pub retired: bool,
}

fn default_retired() -> bool {
    true
}

pub async fn set_retired(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<RetireRequest>,
) -> Result<Json<EntityView>, ApiError> {
    if body.subject.trim().is_empty() {
        return Err(ApiError::Validation(vec!["subject"]));
    }

    let id = EntityId::from(id);
    let entity = submission::set_retired(
        &state.roster,
        state.store.as_ref(),
        &id,
        body.subject.trim(),
        body.retired,
    )
    .await
    .map_err(|e| ApiError::Internal(e.to_string()))?
    .ok_or_else(|| ApiError::NotFound(format!("player {}", id)))?;

    Ok(Json(EntityView::from(&entity)))
}

#[derive(Debug, Serialize)]
pub struct ReloadResponse {
    pub players: usize,
    pub builders: usize,
}

/// Replace the served snapshot with a fresh load from the store.
pub async fn reload(State(state): State<AppState>) -> Json<ReloadResponse> {
    let (players, builders) = roster::reload(&state.roster, state.store.as_ref()).await;
    Json(ReloadResponse { players, builders })
}

#[cfg(test)]
mod tests {
    use crate::api::build_router;
    use crate::api::routes::testing::{get_json, post_json, test_app, test_state};
    use crate::config::ServerConfig;
    use crate::models::{Entity, EntityKind};
    use crate::roster::resolve_missing_names;
    use axum::http::StatusCode;
    use pretty_assertions::assert_eq;

    fn players() -> Vec<Entity> {
        vec![Entity::new("p1".into(), EntityKind::Player)
            .with_name("Steve")
            .with_tier("SMP", "HT2")]
    }

    #[tokio::test]
    async fn test_submit_updates_leaderboard() {
        let (app, _dir) = test_app(players(), vec![]);

        let (status, json) = post_json(
            app.clone(),
            "/api/tiers",
            r#"{"id":"p1","subject":"Axe","tier":"LT4"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["total_score"], 24);

        let (_, board) = get_json(app, "/api/players").await;
        assert_eq!(board["entries"][0]["total_score"], 24);
    }

    #[tokio::test]
    async fn test_submit_creates_player_and_resolves_name() {
        let (app, _dir) = test_app(players(), vec![]);

        let (status, json) = post_json(
            app.clone(),
            "/api/tiers",
            r#"{"id":"p9","subject":"Crystal","tier":"HT1","region":"na"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["name"], "Notch");
        assert_eq!(json["region"], "NA");

        let (_, board) = get_json(app, "/api/players").await;
        assert_eq!(board["entries"][0]["id"], "p9");
        assert_eq!(board["entries"][1]["id"], "p1");
    }

    #[tokio::test]
    async fn test_submit_builder() {
        let (app, _dir) = test_app(vec![], vec![]);

        let (status, json) = post_json(
            app,
            "/api/tiers",
            r#"{"id":"b1","subject":"Composition","tier":"HT1","kind":"builder","name":"Archie"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["kind"], "builder");
        assert_eq!(json["total_score"], 80);
    }

    #[tokio::test]
    async fn test_submit_missing_fields() {
        let (app, _dir) = test_app(players(), vec![]);

        let (status, json) = post_json(app.clone(), "/api/tiers", r#"{"subject":"Axe"}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(json["error"]["missing"], serde_json::json!(["id", "tier"]));

        let (_, board) = get_json(app, "/api/players").await;
        assert_eq!(board["entries"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_submit_malformed_tier_is_unknown() {
        let (app, _dir) = test_app(players(), vec![]);

        let (status, json) = post_json(
            app,
            "/api/tiers",
            r#"{"id":"p1","subject":"SMP","tier":"S+"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["total_score"], 0);
        assert_eq!(json["tiers"][0]["tier"], "unknown");
    }

    #[tokio::test]
    async fn test_set_retired() {
        let (app, _dir) = test_app(players(), vec![]);

        let (status, json) = post_json(
            app.clone(),
            "/api/players/p1/retired",
            r#"{"subject":"SMP"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["tiers"][0]["retired"], true);
        assert_eq!(json["total_score"], 20);

        let (status, _) = post_json(
            app,
            "/api/players/ghost/retired",
            r#"{"subject":"SMP"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_reload_reads_store() {
        let (app, _dir) = test_app(players(), vec![]);

        post_json(
            app.clone(),
            "/api/tiers",
            r#"{"id":"p2","subject":"Sword","tier":"LT1","name":"Alex"}"#,
        )
        .await;

        let (status, json) = post_json(app.clone(), "/api/reload", "").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["players"], 2);
        assert_eq!(json["builders"], 0);

        let (_, board) = get_json(app, "/api/players").await;
        assert_eq!(board["entries"][0]["name"], "Alex");
    }

    #[tokio::test]
    async fn test_reload_keeps_looked_up_names() {
        let unnamed = Entity::new("p9".into(), EntityKind::Player).with_tier("Mace", "LT2");
        let (state, _dir) = test_state(vec![unnamed], vec![]);
        resolve_missing_names(state.roster.clone(), state.identity.clone()).await;
        let app = build_router(state, &ServerConfig::default());

        let (_, before) = get_json(app.clone(), "/api/players/p9").await;
        assert_eq!(before["name"], "Notch");

        let (status, _) = post_json(app.clone(), "/api/reload", "").await;
        assert_eq!(status, StatusCode::OK);

        let (_, after) = get_json(app, "/api/players/p9").await;
        assert_eq!(after["name"], "Notch");
    }
}

use axum::extract::{Path, State};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::api::state::AppState;
use crate::api::views::EntityView;
use crate::api::ApiError;
use crate::models::{EntityId, EntityKind};
use crate::ranking::placement;
use crate::scoring::{rank_title, RankTitle};

#[derive(Debug, Serialize)]
pub struct NextTitle {
    pub title: RankTitle,
    pub threshold: u32,
    pub points_needed: u32,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    #[serde(flatten)]
    pub entity: EntityView,
    /// Overall position among all entities of the same kind
    pub placement: Option<usize>,
    /// Position within the entity's own region
    pub regional_placement: Option<usize>,
    pub next_title: Option<NextTitle>,
    pub updated_at: Option<DateTime<Utc>>,
}

async fn profile(
    state: &AppState,
    kind: EntityKind,
    id: String,
) -> Result<Json<ProfileResponse>, ApiError> {
    let id = EntityId::from(id);
    let roster = state.roster.read().await;
    let entities = roster.entities(kind);
    let entity = roster
        .get(kind, &id)
        .ok_or_else(|| ApiError::NotFound(format!("{} {}", kind, id)))?;

    let next_title = rank_title(entity.total_score).next().map(|title| NextTitle {
        title,
        threshold: title.threshold(),
        points_needed: title.threshold() - entity.total_score,
    });

    Ok(Json(ProfileResponse {
        entity: EntityView::from(entity),
        placement: placement(&id, entities, None),
        regional_placement: entity
            .region
            .and_then(|region| placement(&id, entities, Some(region))),
        next_title,
        updated_at: entity.updated_at,
    }))
}

pub async fn get_player(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProfileResponse>, ApiError> {
    profile(&state, EntityKind::Player, id).await
}

pub async fn get_builder(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProfileResponse>, ApiError> {
    profile(&state, EntityKind::Builder, id).await
}

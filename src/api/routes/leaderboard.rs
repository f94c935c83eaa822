use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::views::EntityView;
use crate::api::{parse_category, parse_region, ApiError};
use crate::models::{EntityKind, ModeCategory, Region};
use crate::ranking::{rank, RankQuery, DEFAULT_LIMIT};

#[derive(Debug, Deserialize)]
pub struct LeaderboardParams {
    pub region: Option<String>,
    pub category: Option<String>,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct LeaderboardEntry {
    pub position: usize,
    /// Score the board is sorted by; category-scoped when a category is set
    pub score: u32,
    #[serde(flatten)]
    pub entity: EntityView,
}

#[derive(Debug, Serialize)]
pub struct LeaderboardResponse {
    pub kind: EntityKind,
    pub region: Option<Region>,
    pub category: Option<ModeCategory>,
    pub entries: Vec<LeaderboardEntry>,
}

fn build_query(params: &LeaderboardParams) -> Result<RankQuery, ApiError> {
    Ok(RankQuery {
        region: parse_region(params.region.as_deref())?,
        category: parse_category(params.category.as_deref())?,
        limit: params
            .limit
            .unwrap_or(DEFAULT_LIMIT)
            .clamp(1, DEFAULT_LIMIT),
    })
}

async fn leaderboard(
    state: &AppState,
    kind: EntityKind,
    query: RankQuery,
) -> LeaderboardResponse {
    let roster = state.roster.read().await;
    let entries = rank(roster.entities(kind), &query)
        .into_iter()
        .map(|entry| LeaderboardEntry {
            position: entry.position,
            score: entry.score,
            entity: EntityView::from(entry.entity),
        })
        .collect();

    LeaderboardResponse {
        kind,
        region: query.region,
        category: query.category,
        entries,
    }
}

pub async fn list_players(
    State(state): State<AppState>,
    Query(params): Query<LeaderboardParams>,
) -> Result<Json<LeaderboardResponse>, ApiError> {
    let query = build_query(&params)?;
    Ok(Json(leaderboard(&state, EntityKind::Player, query).await))
}

pub async fn list_builders(
    State(state): State<AppState>,
    Query(params): Query<LeaderboardParams>,
) -> Result<Json<LeaderboardResponse>, ApiError> {
    let query = build_query(&params)?;
    if query.category.is_some() {
        return Err(ApiError::BadRequest(
            "Mode categories apply to players only".to_string(),
        ));
    }
    Ok(Json(leaderboard(&state, EntityKind::Builder, query).await))
}

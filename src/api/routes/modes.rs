use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::{parse_region, ApiError};
use crate::models::{
    is_player_mode, EntityKind, ModeCategory, Region, TierLabel, BUILDER_SUBJECTS,
};
use crate::ranking::columns::mode_columns;

#[derive(Debug, Deserialize)]
pub struct ModeParams {
    pub region: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ModeEntry {
    pub id: String,
    pub name: String,
    pub region: Option<Region>,
    pub tier: TierLabel,
    pub retired: bool,
}

#[derive(Debug, Serialize)]
pub struct ModeColumn {
    pub level: u8,
    pub entries: Vec<ModeEntry>,
}

#[derive(Debug, Serialize)]
pub struct ModeResponse {
    pub subject: String,
    pub region: Option<Region>,
    pub columns: Vec<ModeColumn>,
}

pub async fn get_mode(
    State(state): State<AppState>,
    Path(subject): Path<String>,
    Query(params): Query<ModeParams>,
) -> Result<Json<ModeResponse>, ApiError> {
    if !is_player_mode(&subject) {
        return Err(ApiError::NotFound(format!("Mode {}", subject)));
    }
    let region = parse_region(params.region.as_deref())?;

    let roster = state.roster.read().await;
    let columns = mode_columns(roster.entities(EntityKind::Player), &subject, region)
        .into_iter()
        .map(|column| ModeColumn {
            level: column.level,
            entries: column
                .entries
                .into_iter()
                .map(|e| ModeEntry {
                    id: e.entity.id.to_string(),
                    name: e.entity.name_or_unknown().to_string(),
                    region: e.entity.region,
                    tier: e.tier,
                    retired: e.retired,
                })
                .collect(),
        })
        .collect();

    Ok(Json(ModeResponse {
        subject,
        region,
        columns,
    }))
}

#[derive(Debug, Serialize)]
pub struct CategoryInfo {
    pub name: ModeCategory,
    pub subjects: &'static [&'static str],
}

#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub categories: Vec<CategoryInfo>,
    pub builder_subjects: &'static [&'static str],
}

pub async fn list_categories() -> Json<CategoriesResponse> {
    Json(CategoriesResponse {
        categories: ModeCategory::ALL
            .into_iter()
            .map(|c| CategoryInfo {
                name: c,
                subjects: c.subjects(),
            })
            .collect(),
        builder_subjects: BUILDER_SUBJECTS,
    })
}

#[cfg(test)]
mod tests {
    use crate::api::routes::testing::{get_json, test_app};
    use crate::models::{Entity, EntityKind, Region};
    use axum::http::StatusCode;
    use pretty_assertions::assert_eq;

    fn players() -> Vec<Entity> {
        vec![
            Entity::new("p1".into(), EntityKind::Player)
                .with_name("bravo")
                .with_region(Region::EU)
                .with_tier("Sword", "LT2"),
            Entity::new("p2".into(), EntityKind::Player)
                .with_name("Alpha")
                .with_region(Region::NA)
                .with_tier("Sword", "LT2"),
            Entity::new("p3".into(), EntityKind::Player)
                .with_name("Zulu")
                .with_tier("Sword", "HT2"),
            Entity::new("p4".into(), EntityKind::Player)
                .with_name("Ghost")
                .with_tier("Sword", "unknown"),
        ]
    }

    #[tokio::test]
    async fn test_mode_columns() {
        let (app, _dir) = test_app(players(), vec![]);
        let (status, json) = get_json(app, "/api/modes/Sword").await;

        assert_eq!(status, StatusCode::OK);
        let columns = json["columns"].as_array().unwrap();
        assert_eq!(columns.len(), 5);
        assert_eq!(columns[1]["level"], 2);

        let names: Vec<&str> = columns[1]["entries"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Zulu", "Alpha", "bravo"]);

        let placed: usize = columns
            .iter()
            .map(|c| c["entries"].as_array().unwrap().len())
            .sum();
        assert_eq!(placed, 3);
    }

    #[tokio::test]
    async fn test_mode_columns_region() {
        let (app, _dir) = test_app(players(), vec![]);
        let (_, json) = get_json(app, "/api/modes/Sword?region=EU").await;
        assert_eq!(json["columns"][1]["entries"][0]["id"], "p1");
        assert_eq!(json["columns"][1]["entries"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_mode() {
        let (app, _dir) = test_app(players(), vec![]);
        let (status, _) = get_json(app, "/api/modes/Chess").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_list_categories() {
        let (app, _dir) = test_app(vec![], vec![]);
        let (status, json) = get_json(app, "/api/categories").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["categories"].as_array().unwrap().len(), 5);
        assert_eq!(json["categories"][0]["name"], "main");
        assert_eq!(json["builder_subjects"][0], "Composition");
    }
}

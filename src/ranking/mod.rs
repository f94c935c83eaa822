//! Leaderboard ranking.
//!
//! Every leaderboard view goes through this module:
//! - Region and mode-category filtered rankings (`rank`)
//! - Placement lookup for a single entity (`placement`)
//! - Per-entity tier ordering for display (`display`)
//! - Per-mode tier-level columns (`columns`)

pub mod columns;
pub mod display;

use crate::models::{Entity, EntityId, ModeCategory, Region};
use crate::scoring::score;

/// Number of entries a leaderboard shows.
pub const DEFAULT_LIMIT: usize = 100;

/// Filters for a leaderboard view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankQuery {
    pub region: Option<Region>,
    pub category: Option<ModeCategory>,
    pub limit: usize,
}

impl Default for RankQuery {
    fn default() -> Self {
        Self {
            region: None,
            category: None,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl RankQuery {
    pub fn with_region(mut self, region: Region) -> Self {
        self.region = Some(region);
        self
    }

    pub fn with_category(mut self, category: ModeCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}

/// One row of a ranked view.
#[derive(Debug, Clone, Copy)]
pub struct RankedEntry<'a> {
    /// 1-based position.
    pub position: usize,

    /// Score the view was sorted by (category-scoped when a category is set).
    pub score: u32,

    pub entity: &'a Entity,
}

/// Rank `entities` by score, highest first.
///
/// Equal scores keep their input order. With a category, only the tiers of
/// that category count and entities without any of them are dropped.
pub fn rank<'a>(entities: &'a [Entity], query: &RankQuery) -> Vec<RankedEntry<'a>> {
    let mut scored: Vec<(u32, &Entity)> = entities
        .iter()
        .filter(|e| query.region.map_or(true, |r| e.region == Some(r)))
        .filter_map(|e| match query.category {
            Some(category) => {
                let subjects = category.subjects();
                if !e.has_known_tier_in(subjects) {
                    return None;
                }
                let category_score = score(&e.tiers, e.table(), Some(subjects));
                (category_score > 0).then_some((category_score, e))
            }
            None => Some((e.total_score, e)),
        })
        .collect();

    // sort_by is stable
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.truncate(query.limit);

    scored
        .into_iter()
        .enumerate()
        .map(|(i, (score, entity))| RankedEntry {
            position: i + 1,
            score,
            entity,
        })
        .collect()
}

/// 1-based overall position of `id`, optionally within one region.
pub fn placement(id: &EntityId, entities: &[Entity], region: Option<Region>) -> Option<usize> {
    let query = RankQuery {
        region,
        category: None,
        limit: usize::MAX,
    };
    rank(entities, &query)
        .into_iter()
        .find(|entry| &entry.entity.id == id)
        .map(|entry| entry.position)
}

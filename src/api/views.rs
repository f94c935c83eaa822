//! JSON shapes shared by several endpoints.

use serde::Serialize;

use crate::models::{Entity, EntityKind, Region, TierAssignment, UNKNOWN_TIER};
use crate::ranking::display::ordered_tiers;
use crate::scoring::{rank_title, RankTitle};

#[derive(Debug, Serialize)]
pub struct TierView {
    pub subject: String,
    pub tier: String,
    pub points: u32,
    pub retired: bool,
}

impl TierView {
    fn new(entity: &Entity, assignment: &TierAssignment) -> Self {
        Self {
            subject: assignment.subject.clone(),
            tier: assignment
                .tier
                .map_or(UNKNOWN_TIER.to_string(), |t| t.to_string()),
            points: assignment.tier.map_or(0, |t| t.points(entity.table())),
            retired: assignment.tier.is_some() && entity.is_retired(&assignment.subject),
        }
    }
}

/// An entity with its derived score, title and display-ordered tiers.
#[derive(Debug, Serialize)]
pub struct EntityView {
    pub id: String,
    pub kind: EntityKind,
    pub name: String,
    pub region: Option<Region>,
    pub total_score: u32,
    pub title: RankTitle,
    pub highlighted: bool,
    pub banner: Option<String>,
    pub tiers: Vec<TierView>,
}

impl From<&Entity> for EntityView {
    fn from(entity: &Entity) -> Self {
        Self {
            id: entity.id.to_string(),
            kind: entity.kind,
            name: entity.name_or_unknown().to_string(),
            region: entity.region,
            total_score: entity.total_score,
            title: rank_title(entity.total_score),
            highlighted: entity.highlighted,
            banner: entity.banner.clone(),
            tiers: ordered_tiers(entity)
                .into_iter()
                .map(|a| TierView::new(entity, a))
                .collect(),
        }
    }
}

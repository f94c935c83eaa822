//! Tier submissions and retirement updates.
//!
//! A submission is validated before anything is touched. The updated entity
//! is built on a copy, persisted, and only then swapped into the roster, so
//! a failed write leaves the served snapshot exactly as it was.

use chrono::Utc;
use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::identity::IdentityService;
use crate::models::{
    is_player_mode, Entity, EntityId, EntityKind, Region, TierLabel, BUILDER_SUBJECTS,
    UNKNOWN_NAME,
};
use crate::roster::SharedRoster;
use crate::storage::{EntityStore, StorageError};

/// A submission is missing required fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Missing required fields: {}", .missing.join(", "))]
pub struct ValidationError {
    pub missing: Vec<&'static str>,
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Raw tier submission as received from a client.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TierSubmission {
    pub id: Option<String>,
    pub subject: Option<String>,
    pub tier: Option<String>,
    pub name: Option<String>,
    pub region: Option<String>,
    #[serde(default)]
    pub kind: EntityKind,
}

/// A submission with every required field present.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidSubmission {
    pub kind: EntityKind,
    pub id: EntityId,
    pub subject: String,
    /// `None` when the submitted label is not canonical.
    pub tier: Option<TierLabel>,
    pub name: Option<String>,
    pub region: Option<Region>,
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl TierSubmission {
    /// Check required fields, reporting every missing one at once.
    pub fn validate(&self) -> Result<ValidSubmission, ValidationError> {
        let id = present(&self.id);
        let subject = present(&self.subject);
        let tier = present(&self.tier);

        let (Some(id), Some(subject), Some(tier)) = (id, subject, tier) else {
            let missing = [("id", id), ("subject", subject), ("tier", tier)]
                .into_iter()
                .filter(|(_, value)| value.is_none())
                .map(|(name, _)| name)
                .collect();
            return Err(ValidationError { missing });
        };

        let label = TierLabel::parse(tier);
        if label.is_none() {
            warn!("Tier label {:?} for {} is not canonical, storing as unknown", tier, id);
        }

        let region = present(&self.region).and_then(|raw| {
            let region = Region::normalize(raw);
            if region.is_none() {
                warn!("Ignoring unrecognised region {:?} for {}", raw, id);
            }
            region
        });

        let known_subject = match self.kind {
            EntityKind::Player => is_player_mode(subject),
            EntityKind::Builder => BUILDER_SUBJECTS.contains(&subject),
        };
        if !known_subject {
            warn!("Subject {:?} is not a known {} subject", subject, self.kind);
        }

        Ok(ValidSubmission {
            kind: self.kind,
            id: EntityId::from(id),
            subject: subject.to_string(),
            tier: label,
            name: present(&self.name).map(str::to_string),
            region,
        })
    }
}

impl ValidSubmission {
    /// Build the updated entity from its current state (if any).
    pub fn apply(&self, existing: Option<&Entity>) -> Entity {
        let mut entity = existing
            .cloned()
            .unwrap_or_else(|| Entity::new(self.id.clone(), self.kind));

        entity.set_tier(&self.subject, self.tier);
        if let Some(name) = &self.name {
            entity.display_name = Some(name.clone());
        }
        if let Some(region) = self.region {
            entity.region = Some(region);
        }
        entity.updated_at = Some(Utc::now());
        entity
    }
}

/// Validate, apply, persist and publish a tier submission.
pub async fn submit(
    roster: &SharedRoster,
    store: &dyn EntityStore,
    identity: &dyn IdentityService,
    submission: &TierSubmission,
) -> Result<Entity, SubmitError> {
    let valid = submission.validate()?;

    // Resolve outside the write lock so readers are not held up by the lookup.
    let has_name = valid.name.is_some()
        || roster
            .read()
            .await
            .get(valid.kind, &valid.id)
            .is_some_and(|e| e.display_name.is_some());
    let resolved_name = if has_name {
        None
    } else {
        Some(identity.resolve_name(&valid.id).await).filter(|n| n != UNKNOWN_NAME)
    };

    let mut roster = roster.write().await;
    let mut entity = valid.apply(roster.get(valid.kind, &valid.id));
    if entity.display_name.is_none() {
        entity.display_name = resolved_name;
    }

    store.upsert(&entity).await?;
    roster.replace(entity.clone());

    info!(
        "Set {} {} {} to {} (score {})",
        entity.kind,
        entity.id,
        valid.subject,
        valid.tier.map_or("unknown", |t| t.as_str()),
        entity.total_score
    );
    Ok(entity)
}

/// Mark or unmark a player's subject as retired.
///
/// Returns `Ok(None)` when the player does not exist.
pub async fn set_retired(
    roster: &SharedRoster,
    store: &dyn EntityStore,
    id: &EntityId,
    subject: &str,
    retired: bool,
) -> Result<Option<Entity>, StorageError> {
    let mut roster = roster.write().await;
    let Some(current) = roster.get(EntityKind::Player, id) else {
        return Ok(None);
    };

    let mut entity = current.clone();
    if entity.set_retired(subject, retired) {
        entity.updated_at = Some(Utc::now());
        store.upsert(&entity).await?;
        roster.replace(entity.clone());
        info!("Set {} retired={} for player {}", subject, retired, id);
    }
    Ok(Some(entity))
}

//! In-memory snapshot of every player and builder.
//!
//! The roster is loaded from an [`EntityStore`], owned by whoever runs the
//! service and passed explicitly to the ranking code. Scores are rebuilt on
//! every load so a stale `total_score` on disk is never served.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::identity::IdentityService;
use crate::models::{Entity, EntityId, EntityKind, UNKNOWN_NAME};
use crate::storage::EntityStore;

#[derive(Debug, Clone, Default)]
pub struct Roster {
    players: Vec<Entity>,
    builders: Vec<Entity>,
}

pub type SharedRoster = Arc<RwLock<Roster>>;

impl Roster {
    pub fn new(players: Vec<Entity>, builders: Vec<Entity>) -> Self {
        let mut roster = Self { players, builders };
        for entity in roster.players.iter_mut().chain(roster.builders.iter_mut()) {
            let dropped = entity.collapse_duplicate_tiers();
            if dropped > 0 {
                warn!(
                    "Dropped {} duplicate tier rows for {} {}",
                    dropped, entity.kind, entity.id
                );
            }
            entity.recompute_score();
        }
        roster
    }

    /// Load both collections. A kind that fails to load comes back empty.
    pub async fn load(store: &dyn EntityStore) -> Self {
        let players = load_kind(store, EntityKind::Player).await;
        let builders = load_kind(store, EntityKind::Builder).await;
        Self::new(players, builders)
    }

    pub fn entities(&self, kind: EntityKind) -> &[Entity] {
        match kind {
            EntityKind::Player => &self.players,
            EntityKind::Builder => &self.builders,
        }
    }

    fn entities_mut(&mut self, kind: EntityKind) -> &mut Vec<Entity> {
        match kind {
            EntityKind::Player => &mut self.players,
            EntityKind::Builder => &mut self.builders,
        }
    }

    pub fn get(&self, kind: EntityKind, id: &EntityId) -> Option<&Entity> {
        self.entities(kind).iter().find(|e| &e.id == id)
    }

    /// Insert or replace an entity, keeping the position of a replaced one.
    pub fn replace(&mut self, mut entity: Entity) {
        entity.recompute_score();
        let entities = self.entities_mut(entity.kind);
        match entities.iter_mut().find(|e| e.id == entity.id) {
            Some(existing) => *existing = entity,
            None => entities.push(entity),
        }
    }

    /// Entities that still have no display name.
    pub fn missing_names(&self) -> Vec<(EntityKind, EntityId)> {
        self.players
            .iter()
            .chain(self.builders.iter())
            .filter(|e| e.display_name.is_none())
            .map(|e| (e.kind, e.id.clone()))
            .collect()
    }

    pub fn set_display_name(&mut self, kind: EntityKind, id: &EntityId, name: String) {
        if let Some(entity) = self.entities_mut(kind).iter_mut().find(|e| &e.id == id) {
            entity.display_name = Some(name);
        }
    }

    /// Copy display names from `previous` onto entities that have none.
    fn carry_names_from(&mut self, previous: &Roster) {
        for entity in self.players.iter_mut().chain(self.builders.iter_mut()) {
            if entity.display_name.is_none() {
                entity.display_name = previous
                    .get(entity.kind, &entity.id)
                    .and_then(|e| e.display_name.clone());
            }
        }
    }

    pub fn len(&self) -> usize {
        self.players.len() + self.builders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

async fn load_kind(store: &dyn EntityStore, kind: EntityKind) -> Vec<Entity> {
    match store.list_all(kind).await {
        Ok(entities) => entities,
        Err(e) => {
            warn!("Failed to load {}s, starting empty: {}", kind, e);
            Vec::new()
        }
    }
}

/// Replace the snapshot with a fresh load from `store`.
///
/// The write lock is held for the whole load, so a submission published
/// meanwhile lands on the fresh snapshot. Names resolved in memory carry over.
/// Returns the player and builder counts.
pub async fn reload(roster: &SharedRoster, store: &dyn EntityStore) -> (usize, usize) {
    let mut current = roster.write().await;
    let mut fresh = Roster::load(store).await;
    fresh.carry_names_from(&current);

    let counts = (fresh.players.len(), fresh.builders.len());
    *current = fresh;
    info!("Reloaded roster: {} players, {} builders", counts.0, counts.1);
    counts
}

/// Look up every missing display name once and fill in the ones found.
///
/// Names are only kept in memory; they are persisted with the entity's next
/// submission.
pub async fn resolve_missing_names(roster: SharedRoster, identity: Arc<dyn IdentityService>) {
    let missing = roster.read().await.missing_names();
    if missing.is_empty() {
        return;
    }

    info!("Resolving {} missing display names", missing.len());
    let mut resolved = 0;
    for (kind, id) in missing {
        let name = identity.resolve_name(&id).await;
        if name == UNKNOWN_NAME {
            continue;
        }
        roster.write().await.set_display_name(kind, &id, name);
        resolved += 1;
    }
    info!("Resolved {} display names", resolved);
}

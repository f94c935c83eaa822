//! Entity persistence keyed by id.

use async_trait::async_trait;
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::info;

use super::{JsonlReader, JsonlWriter, StorageConfig, StorageError};
use crate::models::{Entity, EntityId, EntityKind};

/// Where entities are loaded from and saved to.
#[async_trait]
pub trait EntityStore: Send + Sync {
    /// Every stored entity of `kind`, in storage order.
    async fn list_all(&self, kind: EntityKind) -> Result<Vec<Entity>, StorageError>;

    /// Insert or replace the entity with the same kind and id.
    async fn upsert(&self, entity: &Entity) -> Result<(), StorageError>;
}

/// JSON Lines backed store. Storage order is first-insertion order.
pub struct JsonlEntityStore {
    config: StorageConfig,
    write_lock: Mutex<()>,
}

impl JsonlEntityStore {
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            write_lock: Mutex::new(()),
        }
    }

    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    fn read(&self, kind: EntityKind) -> Result<Vec<Entity>, StorageError> {
        JsonlReader::<Entity>::new(self.config.entity_path(kind)).read_all()
    }
}

#[async_trait]
impl EntityStore for JsonlEntityStore {
    async fn list_all(&self, kind: EntityKind) -> Result<Vec<Entity>, StorageError> {
        let entities = self.read(kind)?;
        info!("Loaded {} {}s", entities.len(), kind);
        Ok(entities)
    }

    async fn upsert(&self, entity: &Entity) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;

        // Unparseable rows are carried through verbatim.
        let path = self.config.entity_path(entity.kind);
        let mut lines = JsonlReader::<Entity>::new(path.clone()).read_lines()?;
        let encoded = serde_json::to_string(entity)?;

        let existing = lines.iter().position(|line| {
            serde_json::from_str::<RowKey>(line).is_ok_and(|key| key.id == entity.id)
        });
        match existing {
            Some(idx) => lines[idx] = encoded,
            None => lines.push(encoded),
        }

        JsonlWriter::<Entity>::new(path).write_raw(&lines)?;
        info!("Saved {} {}", entity.kind, entity.id);
        Ok(())
    }
}

/// Just enough of a stored row to match it by id.
#[derive(Deserialize)]
struct RowKey {
    id: EntityId,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Region;
    use tempfile::TempDir;

    fn store(temp_dir: &TempDir) -> JsonlEntityStore {
        JsonlEntityStore::new(StorageConfig::new(temp_dir.path().to_path_buf()))
    }

    #[tokio::test]
    async fn test_list_all_empty_store() {
        let temp_dir = TempDir::new().unwrap();
        let store = store(&temp_dir);
        assert!(store.list_all(EntityKind::Player).await.unwrap().is_empty());
        assert!(store.list_all(EntityKind::Builder).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_upsert_inserts_then_replaces_in_place() {
        let temp_dir = TempDir::new().unwrap();
        let store = store(&temp_dir);

        let first = Entity::new("p1".into(), EntityKind::Player).with_tier("SMP", "LT3");
        let second = Entity::new("p2".into(), EntityKind::Player).with_tier("Axe", "HT1");
        store.upsert(&first).await.unwrap();
        store.upsert(&second).await.unwrap();

        let updated = first
            .clone()
            .with_tier("SMP", "HT1")
            .with_region(Region::EU);
        store.upsert(&updated).await.unwrap();

        let players = store.list_all(EntityKind::Player).await.unwrap();
        assert_eq!(players.len(), 2);
        assert_eq!(players[0], updated);
        assert_eq!(players[1].id.as_str(), "p2");
    }

    #[tokio::test]
    async fn test_kinds_are_stored_separately() {
        let temp_dir = TempDir::new().unwrap();
        let store = store(&temp_dir);

        store
            .upsert(&Entity::new("same".into(), EntityKind::Player))
            .await
            .unwrap();
        store
            .upsert(&Entity::new("same".into(), EntityKind::Builder))
            .await
            .unwrap();

        assert_eq!(store.list_all(EntityKind::Player).await.unwrap().len(), 1);
        assert_eq!(store.list_all(EntityKind::Builder).await.unwrap().len(), 1);
        assert!(store.config().entity_path(EntityKind::Builder).exists());
    }

    #[tokio::test]
    async fn test_upsert_keeps_rows_it_cannot_read() {
        let temp_dir = TempDir::new().unwrap();
        let store = store(&temp_dir);
        let path = store.config().entity_path(EntityKind::Player);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        let odd = r#"{"id":"future","kind":"player","tiers":42}"#;
        std::fs::write(&path, format!("{}\nnot-json\n", odd)).unwrap();

        store
            .upsert(&Entity::new("new".into(), EntityKind::Player).with_tier("Axe", "LT1"))
            .await
            .unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], odd);
        assert_eq!(lines[1], "not-json");
        assert!(lines[2].contains("\"new\""));
    }

    #[tokio::test]
    async fn test_lowercase_region_row_loads_and_survives_upsert() {
        let temp_dir = TempDir::new().unwrap();
        let store = store(&temp_dir);
        let path = store.config().entity_path(EntityKind::Player);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(
            &path,
            concat!(
                r#"{"id":"old","kind":"player","region":"eu","tiers":[{"subject":"SMP","tier":"HT1"}]}"#,
                "\n",
                r#"{"id":"lost","kind":"player","region":"atlantis"}"#,
                "\n"
            ),
        )
        .unwrap();

        let players = store.list_all(EntityKind::Player).await.unwrap();
        assert_eq!(players.len(), 2);
        assert_eq!(players[0].region, Some(Region::EU));
        assert_eq!(players[1].region, None);

        store
            .upsert(&Entity::new("new".into(), EntityKind::Player))
            .await
            .unwrap();

        let ids: Vec<String> = store
            .list_all(EntityKind::Player)
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.id.to_string())
            .collect();
        assert_eq!(ids, vec!["old", "lost", "new"]);
    }
}

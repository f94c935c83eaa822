//! Flat-file entity store.
//!
//! Entities live in one JSON Lines file per kind under the data directory:
//! - `entities/players.jsonl`
//! - `entities/builders.jsonl`

mod entity_store;
mod jsonl;

pub use entity_store::*;
pub use jsonl::*;

use std::path::PathBuf;
use thiserror::Error;

use crate::models::EntityKind;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration for storage paths.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl StorageConfig {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn entities_dir(&self) -> PathBuf {
        self.data_dir.join("entities")
    }

    /// File holding every entity of `kind`.
    pub fn entity_path(&self, kind: EntityKind) -> PathBuf {
        let filename = match kind {
            EntityKind::Player => "players.jsonl",
            EntityKind::Builder => "builders.jsonl",
        };
        self.entities_dir().join(filename)
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(PathBuf::from("./data"))
    }
}

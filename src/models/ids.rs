//! Stable entity identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of a player or builder.
///
/// Identifiers come from the submitting side (usually the game account id)
/// and are never generated here.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(id: String) -> Self {
        Self(id)
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({})", self.0)
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_id_serializes_as_plain_string() {
        let id = EntityId::from("069a79f4-44e9-4726-a5be-fca90e38aaf5");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"069a79f4-44e9-4726-a5be-fca90e38aaf5\"");

        let back: EntityId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_entity_id_display() {
        let id = EntityId::new("abc123".to_string());
        assert_eq!(format!("{}", id), "abc123");
    }

    #[test]
    fn test_entity_id_debug() {
        let id = EntityId::new("debug-test".to_string());
        assert_eq!(format!("{:?}", id), "EntityId(debug-test)");
    }

    #[test]
    fn test_entity_id_equality() {
        assert_eq!(EntityId::from("same"), EntityId::from("same".to_string()));
        assert_ne!(EntityId::from("same"), EntityId::from("different"));
    }
}

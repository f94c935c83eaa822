//! Players and builders.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{region_slot, tier_slot, EntityId, Region, TierLabel, TierTable};
use crate::scoring;

/// Name shown when no display name could be resolved.
pub const UNKNOWN_NAME: &str = "Unknown";

/// The two kinds of ranked entity. They share a shape but not a point table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    #[default]
    Player,
    Builder,
}

impl EntityKind {
    pub fn table(&self) -> TierTable {
        match self {
            EntityKind::Player => TierTable::Fighter,
            EntityKind::Builder => TierTable::Builder,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Player => "player",
            EntityKind::Builder => "builder",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A tier held for one subject (a game mode, or a builder discipline).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierAssignment {
    pub subject: String,

    /// `None` when the tier is unknown or was malformed on input.
    #[serde(with = "tier_slot", default)]
    pub tier: Option<TierLabel>,
}

impl TierAssignment {
    pub fn new(subject: impl Into<String>, tier: Option<TierLabel>) -> Self {
        Self {
            subject: subject.into(),
            tier,
        }
    }
}

/// A ranked player or builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,

    pub kind: EntityKind,

    /// Resolved lazily from the identity service when absent.
    #[serde(default)]
    pub display_name: Option<String>,

    /// Unknown codes on disk read as `None`.
    #[serde(default, deserialize_with = "region_slot::deserialize")]
    pub region: Option<Region>,

    /// Per-subject tiers in insertion order. Subjects are unique.
    #[serde(default)]
    pub tiers: Vec<TierAssignment>,

    /// Subjects whose tier still scores but is listed last (players only).
    #[serde(default)]
    pub retired: BTreeSet<String>,

    /// Cache of the score over `tiers`; rebuilt on load and on every mutation.
    #[serde(default)]
    pub total_score: u32,

    #[serde(default)]
    pub highlighted: bool,

    #[serde(default)]
    pub banner: Option<String>,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Entity {
    pub fn new(id: EntityId, kind: EntityKind) -> Self {
        Self {
            id,
            kind,
            display_name: None,
            region: None,
            tiers: Vec::new(),
            retired: BTreeSet::new(),
            total_score: 0,
            highlighted: false,
            banner: None,
            updated_at: None,
        }
    }

    /// Builder method to set the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Builder method to set the region.
    pub fn with_region(mut self, region: Region) -> Self {
        self.region = Some(region);
        self
    }

    /// Builder method to add or replace a tier from a raw label.
    pub fn with_tier(mut self, subject: &str, label: &str) -> Self {
        self.set_tier(subject, TierLabel::parse(label));
        self
    }

    /// Builder method to mark a subject retired.
    pub fn with_retired(mut self, subject: &str) -> Self {
        self.set_retired(subject, true);
        self
    }

    pub fn table(&self) -> TierTable {
        self.kind.table()
    }

    pub fn tier_for(&self, subject: &str) -> Option<&TierAssignment> {
        self.tiers.iter().find(|a| a.subject == subject)
    }

    /// Set the tier for `subject`, keeping its position if already present.
    pub fn set_tier(&mut self, subject: &str, tier: Option<TierLabel>) {
        match self.tiers.iter_mut().find(|a| a.subject == subject) {
            Some(existing) => existing.tier = tier,
            None => self.tiers.push(TierAssignment::new(subject, tier)),
        }
        self.recompute_score();
    }

    /// Merge repeated subjects in place. The last tier wins and keeps the
    /// first occurrence's position.
    ///
    /// Returns how many duplicates were dropped.
    pub fn collapse_duplicate_tiers(&mut self) -> usize {
        let before = self.tiers.len();
        for assignment in std::mem::take(&mut self.tiers) {
            match self
                .tiers
                .iter_mut()
                .find(|a| a.subject == assignment.subject)
            {
                Some(existing) => existing.tier = assignment.tier,
                None => self.tiers.push(assignment),
            }
        }
        before - self.tiers.len()
    }

    /// Mark or unmark a subject as retired. Builders have no retirement.
    ///
    /// Returns whether anything changed.
    pub fn set_retired(&mut self, subject: &str, retired: bool) -> bool {
        if self.kind == EntityKind::Builder {
            return false;
        }
        if retired {
            self.retired.insert(subject.to_string())
        } else {
            self.retired.remove(subject)
        }
    }

    pub fn is_retired(&self, subject: &str) -> bool {
        self.retired.contains(subject)
    }

    pub fn recompute_score(&mut self) {
        self.total_score = scoring::score(&self.tiers, self.table(), None);
    }

    /// Whether at least one known tier falls inside `subjects`.
    pub fn has_known_tier_in(&self, subjects: &[&str]) -> bool {
        self.tiers
            .iter()
            .any(|a| a.tier.is_some() && subjects.contains(&a.subject.as_str()))
    }

    pub fn name_or_unknown(&self) -> &str {
        self.display_name.as_deref().unwrap_or(UNKNOWN_NAME)
    }
}

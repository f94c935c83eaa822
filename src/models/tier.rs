//! Tier labels and the two fixed point tables.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// String persisted for an assignment without a usable tier.
pub const UNKNOWN_TIER: &str = "unknown";

/// One of the ten canonical tier placements.
///
/// `Ht` is the high sub-tier and `Lt` the low one; the number is the level,
/// 1 being the most valuable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TierLabel {
    Ht1,
    Lt1,
    Ht2,
    Lt2,
    Ht3,
    Lt3,
    Ht4,
    Lt4,
    Ht5,
    Lt5,
}

impl TierLabel {
    /// All labels, most valuable first.
    pub const ALL: [TierLabel; 10] = [
        TierLabel::Ht1,
        TierLabel::Lt1,
        TierLabel::Ht2,
        TierLabel::Lt2,
        TierLabel::Ht3,
        TierLabel::Lt3,
        TierLabel::Ht4,
        TierLabel::Lt4,
        TierLabel::Ht5,
        TierLabel::Lt5,
    ];

    /// Parse a canonical label. Matching is exact: anything else is `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "HT1" => Some(TierLabel::Ht1),
            "LT1" => Some(TierLabel::Lt1),
            "HT2" => Some(TierLabel::Ht2),
            "LT2" => Some(TierLabel::Lt2),
            "HT3" => Some(TierLabel::Ht3),
            "LT3" => Some(TierLabel::Lt3),
            "HT4" => Some(TierLabel::Ht4),
            "LT4" => Some(TierLabel::Lt4),
            "HT5" => Some(TierLabel::Ht5),
            "LT5" => Some(TierLabel::Lt5),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TierLabel::Ht1 => "HT1",
            TierLabel::Lt1 => "LT1",
            TierLabel::Ht2 => "HT2",
            TierLabel::Lt2 => "LT2",
            TierLabel::Ht3 => "HT3",
            TierLabel::Lt3 => "LT3",
            TierLabel::Ht4 => "HT4",
            TierLabel::Lt4 => "LT4",
            TierLabel::Ht5 => "HT5",
            TierLabel::Lt5 => "LT5",
        }
    }

    /// Tier level, 1 (best) to 5.
    pub fn level(&self) -> u8 {
        match self {
            TierLabel::Ht1 | TierLabel::Lt1 => 1,
            TierLabel::Ht2 | TierLabel::Lt2 => 2,
            TierLabel::Ht3 | TierLabel::Lt3 => 3,
            TierLabel::Ht4 | TierLabel::Lt4 => 4,
            TierLabel::Ht5 | TierLabel::Lt5 => 5,
        }
    }

    /// Whether this is the high sub-tier of its level.
    pub fn is_high(&self) -> bool {
        matches!(
            self,
            TierLabel::Ht1 | TierLabel::Ht2 | TierLabel::Ht3 | TierLabel::Ht4 | TierLabel::Ht5
        )
    }

    /// Points this label is worth under `table`.
    pub fn points(&self, table: TierTable) -> u32 {
        match table {
            TierTable::Fighter => match self {
                TierLabel::Lt5 => 1,
                TierLabel::Ht5 => 2,
                TierLabel::Lt4 => 4,
                TierLabel::Ht4 => 6,
                TierLabel::Lt3 => 9,
                TierLabel::Ht3 => 12,
                TierLabel::Lt2 => 16,
                TierLabel::Ht2 => 20,
                TierLabel::Lt1 => 25,
                TierLabel::Ht1 => 30,
            },
            TierTable::Builder => match self {
                TierLabel::Lt5 => 1,
                TierLabel::Ht5 => 3,
                TierLabel::Lt4 => 6,
                TierLabel::Ht4 => 12,
                TierLabel::Lt3 => 18,
                TierLabel::Ht3 => 26,
                TierLabel::Lt2 => 36,
                TierLabel::Ht2 => 48,
                TierLabel::Lt1 => 60,
                TierLabel::Ht1 => 80,
            },
        }
    }
}

impl fmt::Display for TierLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for TierLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TierLabel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        TierLabel::parse(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid tier label: {}", s)))
    }
}

/// Which point scale a label is valued under.
///
/// The two tables share labels but not values and must not be mixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TierTable {
    Fighter,
    Builder,
}

/// Points for an optional label. Absent labels are worth nothing.
pub fn tier_value(label: Option<TierLabel>, table: TierTable) -> u32 {
    label.map_or(0, |l| l.points(table))
}

/// Points for a raw, unvalidated label string.
pub fn tier_value_str(label: &str, table: TierTable) -> u32 {
    tier_value(TierLabel::parse(label), table)
}

/// Serde adapter for an assignment slot: a canonical label or `"unknown"`.
///
/// Reading is lenient. Nulls and malformed strings both become `None`.
pub mod tier_slot {
    use super::{TierLabel, UNKNOWN_TIER};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        slot: &Option<TierLabel>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(slot.map_or(UNKNOWN_TIER, |l| l.as_str()))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<TierLabel>, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().and_then(TierLabel::parse))
    }
}

//! Player regions.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Region an entity competes in.
///
/// Deserializes through [`Region::normalize`], so `"eu"` reads as `EU`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Region {
    NA,
    EU,
    AS,
    SA,
    AU,
    AF,
    ME,
}

impl Region {
    pub const ALL: [Region; 7] = [
        Region::NA,
        Region::EU,
        Region::AS,
        Region::SA,
        Region::AU,
        Region::AF,
        Region::ME,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Region::NA => "NA",
            Region::EU => "EU",
            Region::AS => "AS",
            Region::SA => "SA",
            Region::AU => "AU",
            Region::AF => "AF",
            Region::ME => "ME",
        }
    }

    /// Normalize free-form input (surrounding whitespace, letter case) into a region.
    pub fn normalize(input: &str) -> Option<Self> {
        let code = input.trim().to_ascii_uppercase();
        Self::ALL.into_iter().find(|r| r.code() == code)
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl<'de> Deserialize<'de> for Region {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Region::normalize(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown region: {}", s)))
    }
}

/// Lenient reader for a stored region: unknown codes and nulls become `None`.
pub mod region_slot {
    use super::Region;
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Region>, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().and_then(Region::normalize))
    }
}

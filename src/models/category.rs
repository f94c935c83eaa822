//! Fixed subject groupings used to scope leaderboards.

use serde::{Deserialize, Serialize};
use std::fmt;

const MAIN_MODES: &[&str] = &[
    "Crystal", "Sword", "UHC", "Pot", "NethPot", "SMP", "Axe", "Mace",
];

const SUB_MODES: &[&str] = &[
    "Speed", "Cart", "Creeper", "DiaSMP", "OGVanilla", "Bed", "Bow",
];

const EXTRA_MODES: &[&str] = &["Elytra", "Trident", "Manhunt", "Minecart"];

const BONUS_MODES: &[&str] = &["Bridge", "Parkour", "Spleef"];

const ALL_MODES: &[&str] = &[
    "Crystal", "Sword", "UHC", "Pot", "NethPot", "SMP", "Axe", "Mace", "Speed", "Cart",
    "Creeper", "DiaSMP", "OGVanilla", "Bed", "Bow", "Elytra", "Trident", "Manhunt", "Minecart",
    "Bridge", "Parkour", "Spleef",
];

/// Subjects a builder can be tiered in.
pub const BUILDER_SUBJECTS: &[&str] = &[
    "Composition",
    "Buildings",
    "Terraforming",
    "Organics",
    "Interiors",
];

/// A named group of player game modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModeCategory {
    Main,
    Sub,
    Extra,
    Bonus,
    Overall,
}

impl ModeCategory {
    pub const ALL: [ModeCategory; 5] = [
        ModeCategory::Main,
        ModeCategory::Sub,
        ModeCategory::Extra,
        ModeCategory::Bonus,
        ModeCategory::Overall,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ModeCategory::Main => "main",
            ModeCategory::Sub => "sub",
            ModeCategory::Extra => "extra",
            ModeCategory::Bonus => "bonus",
            ModeCategory::Overall => "overall",
        }
    }

    /// Subject keys that count toward this category.
    pub fn subjects(&self) -> &'static [&'static str] {
        match self {
            ModeCategory::Main => MAIN_MODES,
            ModeCategory::Sub => SUB_MODES,
            ModeCategory::Extra => EXTRA_MODES,
            ModeCategory::Bonus => BONUS_MODES,
            ModeCategory::Overall => ALL_MODES,
        }
    }

    pub fn contains(&self, subject: &str) -> bool {
        self.subjects().contains(&subject)
    }

    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s))
    }
}

impl fmt::Display for ModeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether `subject` is a known player game mode.
pub fn is_player_mode(subject: &str) -> bool {
    ALL_MODES.contains(&subject)
}

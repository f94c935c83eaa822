//! Score calculation.
//!
//! Scores are always derived from tier assignments:
//! - Total and subject-scoped point sums
//! - Rank titles from score thresholds

use serde::Serialize;
use std::fmt;

use crate::models::{tier_value, TierAssignment, TierTable};

/// Sum the points of every known tier, optionally restricted to `subjects`.
pub fn score(tiers: &[TierAssignment], table: TierTable, subjects: Option<&[&str]>) -> u32 {
    tiers
        .iter()
        .filter(|a| subjects.map_or(true, |s| s.contains(&a.subject.as_str())))
        .map(|a| tier_value(a.tier, table))
        .sum()
}

/// Title earned by reaching a score threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum RankTitle {
    Starter,
    Rookie,
    Advanced,
    Expert,
    Professional,
    Master,
    Legend,
}

impl RankTitle {
    /// Titles in ascending threshold order.
    pub const ALL: [RankTitle; 7] = [
        RankTitle::Starter,
        RankTitle::Rookie,
        RankTitle::Advanced,
        RankTitle::Expert,
        RankTitle::Professional,
        RankTitle::Master,
        RankTitle::Legend,
    ];

    /// Minimum score for this title.
    pub fn threshold(&self) -> u32 {
        match self {
            RankTitle::Starter => 0,
            RankTitle::Rookie => 50,
            RankTitle::Advanced => 100,
            RankTitle::Expert => 150,
            RankTitle::Professional => 225,
            RankTitle::Master => 300,
            RankTitle::Legend => 400,
        }
    }

    /// The next title up, if any.
    pub fn next(&self) -> Option<RankTitle> {
        let idx = Self::ALL.iter().position(|t| t == self)?;
        Self::ALL.get(idx + 1).copied()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RankTitle::Starter => "Starter",
            RankTitle::Rookie => "Rookie",
            RankTitle::Advanced => "Advanced",
            RankTitle::Expert => "Expert",
            RankTitle::Professional => "Professional",
            RankTitle::Master => "Master",
            RankTitle::Legend => "Legend",
        }
    }
}

impl fmt::Display for RankTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Highest title whose threshold does not exceed `score`.
pub fn rank_title(score: u32) -> RankTitle {
    RankTitle::ALL
        .iter()
        .rev()
        .find(|t| score >= t.threshold())
        .copied()
        .unwrap_or(RankTitle::Starter)
}

//! # Tierboard
//!
//! Tier-list leaderboards for PvP players and builders.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (entities, tiers, regions, mode categories)
//! - **scoring**: Point tables, totals and rank titles
//! - **ranking**: Leaderboards, placements, profile ordering and mode columns
//! - **storage**: Filesystem entity store (JSONL)
//! - **roster**: In-memory snapshot served to readers
//! - **submission**: Tier submissions and retirement updates
//! - **identity**: Best-effort display-name lookup
//! - **api**: REST API endpoints
//! - **config**: Configuration loading and validation

pub mod api;
pub mod config;
pub mod identity;
pub mod models;
pub mod ranking;
pub mod roster;
pub mod scoring;
pub mod storage;
pub mod submission;

pub use models::*;

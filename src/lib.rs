//! # Toss Tracker
//!
//! Coin toss statistics for a professional football league.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (tosses, games, teams, stat lines, records)
//! - **calculate**: Ordering, streaks, team and head-to-head rollups, records
//! - **storage**: Read-only JSONL data directory
//! - **config**: Configuration loading and validation

pub mod calculate;
pub mod config;
pub mod models;
pub mod storage;

pub use models::*;

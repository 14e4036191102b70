//! Read-only access to the local toss data directory.
//!
//! The directory holds one JSONL file per collection:
//! - `tosses.jsonl`: one coin toss per line
//! - `games.jsonl`: one game (with optional final score) per line
//! - `teams.jsonl`: one franchise per line

pub mod jsonl;

pub use jsonl::{Dataset, JsonlReader};

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),
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

    pub fn tosses_path(&self) -> PathBuf {
        self.data_dir.join("tosses.jsonl")
    }

    pub fn games_path(&self) -> PathBuf {
        self.data_dir.join("games.jsonl")
    }

    pub fn teams_path(&self) -> PathBuf {
        self.data_dir.join("teams.jsonl")
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(PathBuf::from("./data"))
    }
}

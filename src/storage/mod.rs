//! Filesystem data lake operations.
//!
//! Handles reading and writing to the local data lake:
//! - Normalized game logs per season (input)
//! - Derived season outputs (standings, series, magic numbers, report)

pub mod jsonl;
pub mod season;

use std::path::{Component, Path, PathBuf};
use thiserror::Error;

pub use jsonl::{EntityType, JsonlReader, JsonlWriter};
pub use season::{list_seasons, load_game_log, write_season_outputs, DerivedOutputs};

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    #[error("Invalid path: {0}")]
    InvalidPath(String),
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

    pub fn normalized_dir(&self) -> PathBuf {
        self.data_dir.join("normalized")
    }

    pub fn derived_dir(&self) -> PathBuf {
        self.data_dir.join("derived")
    }

    /// Input directory for one season.
    pub fn season_input_dir(&self, season: &str) -> Result<PathBuf, StorageError> {
        Ok(self.normalized_dir().join(checked_season(season)?))
    }

    /// Output directory for one season.
    pub fn season_output_dir(&self, season: &str) -> Result<PathBuf, StorageError> {
        Ok(self.derived_dir().join(checked_season(season)?))
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(PathBuf::from("./data"))
    }
}

/// Season names arrive from query strings; only a single plain path segment is allowed.
fn checked_season(season: &str) -> Result<&str, StorageError> {
    let mut components = Path::new(season).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(season),
        _ => Err(StorageError::InvalidPath(season.to_string())),
    }
}

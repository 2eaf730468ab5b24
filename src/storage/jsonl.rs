//! JSONL (JSON Lines) storage.
//!
//! Game logs arrive as JSONL, one record per line, and per-row derived
//! outputs are written back the same way.

use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info, warn};

use super::{StorageConfig, StorageError};

/// Entity types for JSONL storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityType {
    TeamGame,
    LeagueGame,
    Standings,
    Series,
    MagicNumber,
}

impl EntityType {
    /// Get the filename for this entity type.
    pub fn filename(&self) -> &'static str {
        match self {
            EntityType::TeamGame => "team_games.jsonl",
            EntityType::LeagueGame => "league_games.jsonl",
            EntityType::Standings => "standings.jsonl",
            EntityType::Series => "series.jsonl",
            EntityType::MagicNumber => "magic_numbers.jsonl",
        }
    }

    /// Whether this entity is computed rather than ingested.
    pub fn is_derived(&self) -> bool {
        !matches!(self, EntityType::TeamGame | EntityType::LeagueGame)
    }

    /// Full path of this entity's file for a season.
    pub fn path(&self, config: &StorageConfig, season: &str) -> Result<PathBuf, StorageError> {
        let dir = if self.is_derived() {
            config.season_output_dir(season)?
        } else {
            config.season_input_dir(season)?
        };
        Ok(dir.join(self.filename()))
    }
}

/// JSONL file writer.
pub struct JsonlWriter<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: Serialize> JsonlWriter<T> {
    /// Create a new JSONL writer for the given path.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    /// Create a writer for a specific entity type and season.
    pub fn for_entity(
        config: &StorageConfig,
        entity: EntityType,
        season: &str,
    ) -> Result<Self, StorageError> {
        Ok(Self::new(entity.path(config, season)?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Ensure the parent directory exists.
    fn ensure_dir(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    /// Write entities, replacing the entire file.
    pub fn write_all<'a, I>(&self, entities: I) -> Result<usize, StorageError>
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        self.ensure_dir()?;

        let file = File::create(&self.path)?;
        let mut writer = BufWriter::new(file);
        let mut count = 0;

        for entity in entities {
            let json = serde_json::to_string(entity)?;
            writeln!(writer, "{}", json)?;
            count += 1;
        }

        writer.flush()?;
        info!("Wrote {} entities to {:?}", count, self.path);

        Ok(count)
    }
}

/// JSONL file reader.
pub struct JsonlReader<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: DeserializeOwned> JsonlReader<T> {
    /// Create a new JSONL reader for the given path.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    /// Create a reader for a specific entity type and season.
    pub fn for_entity(
        config: &StorageConfig,
        entity: EntityType,
        season: &str,
    ) -> Result<Self, StorageError> {
        Ok(Self::new(entity.path(config, season)?))
    }

    /// Check if the file exists.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read all entities from the file. Lines that fail to parse are skipped.
    pub fn read_all(&self) -> Result<Vec<T>, StorageError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);
        let mut entities = Vec::new();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;

            if line.trim().is_empty() {
                continue;
            }

            match serde_json::from_str(&line) {
                Ok(entity) => entities.push(entity),
                Err(e) => {
                    warn!(
                        "Failed to parse line {} in {:?}: {}",
                        index + 1,
                        self.path,
                        e
                    );
                }
            }
        }

        debug!("Read {} entities from {:?}", entities.len(), self.path);
        Ok(entities)
    }
}

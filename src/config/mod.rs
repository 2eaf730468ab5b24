//! Configuration loading and validation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::calculate::TieBreakPolicy;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Season being tracked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonConfig {
    /// Directory name under `normalized/` and `derived/`
    #[serde(default = "default_season_name")]
    pub name: String,

    #[serde(default = "default_total_games")]
    pub total_games_per_team: u32,

    /// Number of playoff places
    #[serde(default = "default_playoff_cutoff")]
    pub playoff_cutoff: u32,

    /// Known team codes. Empty accepts any code.
    #[serde(default)]
    pub teams: Vec<String>,

    #[serde(default)]
    pub tie_break: TieBreakPolicy,
}

fn default_season_name() -> String {
    "current".to_string()
}

fn default_total_games() -> u32 {
    144
}

fn default_playoff_cutoff() -> u32 {
    5
}

impl Default for SeasonConfig {
    fn default() -> Self {
        Self {
            name: default_season_name(),
            total_games_per_team: default_total_games(),
            playoff_cutoff: default_playoff_cutoff(),
            teams: Vec::new(),
            tie_break: TieBreakPolicy::default(),
        }
    }
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,

    /// Reports kept before the cache is cleared
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_cors_origin() -> String {
    "*".to_string()
}

fn default_cache_capacity() -> usize {
    16
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origin: default_cors_origin(),
            cache_capacity: default_cache_capacity(),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub season: SeasonConfig,

    #[serde(default)]
    pub server: ServerConfig,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
            season: SeasonConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if it exists, otherwise use defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.season.total_games_per_team == 0 {
            return Err(ConfigError::ValidationError(
                "total_games_per_team must be greater than 0".to_string(),
            ));
        }

        if self.season.playoff_cutoff == 0 {
            return Err(ConfigError::ValidationError(
                "playoff_cutoff must be at least 1".to_string(),
            ));
        }

        if self.season.name.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "Season name must not be empty".to_string(),
            ));
        }

        let mut seen = BTreeSet::new();
        for team in &self.season.teams {
            if team.trim().is_empty() {
                return Err(ConfigError::ValidationError(
                    "Team codes must not be empty".to_string(),
                ));
            }
            if !seen.insert(team.as_str()) {
                return Err(ConfigError::ValidationError(format!(
                    "Duplicate team code: {}",
                    team
                )));
            }
        }

        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "Server port must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.data_dir, PathBuf::from("./data"));
        assert_eq!(config.log_level, "info");
        assert_eq!(config.season.name, "current");
        assert_eq!(config.season.total_games_per_team, 144);
        assert_eq!(config.season.playoff_cutoff, 5);
        assert_eq!(config.season.tie_break, TieBreakPolicy::None);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.cache_capacity, 16);
    }

    #[test]
    fn test_config_validation_ok() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_zero_games() {
        let mut config = AppConfig::default();
        config.season.total_games_per_team = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_zero_cutoff() {
        let mut config = AppConfig::default();
        config.season.playoff_cutoff = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_duplicate_team() {
        let mut config = AppConfig::default();
        config.season.teams = vec!["LG".to_string(), "KT".to_string(), "LG".to_string()];

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("Duplicate team code: LG"));
    }

    #[test]
    fn test_config_validation_bad_port() {
        let mut config = AppConfig::default();
        config.server.port = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [season]
            name = "2025"
            teams = ["LG", "KT", "SSG"]
            tie_break = "shared"
            "#,
        )
        .unwrap();

        assert_eq!(config.season.name, "2025");
        assert_eq!(config.season.teams.len(), 3);
        assert_eq!(config.season.tie_break, TieBreakPolicy::Shared);
        assert_eq!(config.season.total_games_per_team, 144);
        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_or_default(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.season.playoff_cutoff, 5);
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml_str = toml::to_string(&config).unwrap();

        // Should be parseable
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config.data_dir, parsed.data_dir);
        assert_eq!(config.season.tie_break, parsed.season.tie_break);
    }
}

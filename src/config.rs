// Configuration loading and parsing (league.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {}: {source}", path.display())]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },
}

/// Wrapper for the top-level `[league]` table in league.toml.
#[derive(Debug, Clone, Deserialize)]
struct LeagueFile {
    league: LeagueConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LeagueConfig {
    pub name: String,
    /// Season year, used only for presentation.
    pub season: u16,
    /// Number of regular-season weeks to process.
    pub weeks: usize,
    /// Directory holding the week CSV files.
    pub data_dir: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub league: LeagueConfig,
}

/// Load and validate configuration from `config/league.toml` relative to the
/// given base directory.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let league_path = base_dir.join("config").join("league.toml");
    let league_text =
        std::fs::read_to_string(&league_path).map_err(|_| ConfigError::FileNotFound {
            path: league_path.clone(),
        })?;
    let league_file: LeagueFile =
        toml::from_str(&league_text).map_err(|e| ConfigError::ParseError {
            path: league_path,
            source: e,
        })?;

    let config = Config {
        league: league_file.league,
    };
    validate(&config)?;
    Ok(config)
}

/// Load configuration from the current working directory.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("config/league.toml"),
    })?;
    load_config_from(&cwd)
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.league.name.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "league.name".to_string(),
            message: "league name must not be empty".to_string(),
        });
    }
    if config.league.weeks == 0 {
        return Err(ConfigError::ValidationError {
            field: "league.weeks".to_string(),
            message: "a season must have at least one week".to_string(),
        });
    }
    if config.league.data_dir.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "league.data_dir".to_string(),
            message: "data_dir must point at the week files".to_string(),
        });
    }
    Ok(())
}

//! Configuration loading and management
//!
//! Configuration is loaded from `~/.config/haven/config.toml`
//!
//! This module follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/haven/` (~/.config/haven/)
//! - Data: `$XDG_DATA_HOME/haven/` (~/.local/share/haven/)
//! - State/Logs: `$XDG_STATE_HOME/haven/` (~/.local/state/haven/)

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Returns a best-effort home directory path.
fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns XDG_CONFIG_HOME or ~/.config
fn xdg_config_home() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
}

/// Returns XDG_DATA_HOME or ~/.local/share
fn xdg_data_home() -> PathBuf {
    std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/share"))
}

/// Returns XDG_STATE_HOME or ~/.local/state
fn xdg_state_home() -> PathBuf {
    std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/state"))
}

/// Main configuration struct
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Event log storage configuration
    #[serde(default)]
    pub storage: StorageConfig,

    /// Recommendation engine configuration
    #[serde(default)]
    pub recommendations: RecommendationConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Address to bind, e.g. `127.0.0.1:5000`
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Create the demo account on startup if it is missing
    #[serde(default = "default_seed_demo_user")]
    pub seed_demo_user: bool,

    /// Allow any origin (useful when the frontend runs on a dev server)
    #[serde(default)]
    pub cors_permissive: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            seed_demo_user: default_seed_demo_user(),
            cors_permissive: false,
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:5000".to_string()
}

fn default_seed_demo_user() -> bool {
    true
}

/// Which event log implementation backs the server
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// SQLite file in the XDG data directory
    #[default]
    Sqlite,
    /// Volatile in-process maps
    Memory,
}

impl StorageBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageBackend::Sqlite => "sqlite",
            StorageBackend::Memory => "memory",
        }
    }
}

impl std::str::FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "sqlite" => Ok(StorageBackend::Sqlite),
            "memory" => Ok(StorageBackend::Memory),
            _ => Err(format!("unknown storage backend: {}", s)),
        }
    }
}

/// Storage configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct StorageConfig {
    /// Storage backend
    #[serde(default)]
    pub backend: StorageBackend,

    /// Override for the SQLite database path
    pub database_path: Option<PathBuf>,
}

impl StorageConfig {
    /// Resolved database path (override or XDG default)
    pub fn database_path(&self) -> PathBuf {
        self.database_path
            .clone()
            .unwrap_or_else(Config::database_path)
    }
}

/// Recommendation engine configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct RecommendationConfig {
    /// TOML file replacing the built-in activity catalog
    pub catalog_path: Option<PathBuf>,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Mirror log output to stderr in addition to the log file
    #[serde(default)]
    pub stderr: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            stderr: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            return Ok(Config::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read config file {:?}: {}", path, e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration, returning an error describing the first problem
    pub fn validate(&self) -> Result<()> {
        if self.server.bind.trim().is_empty() {
            return Err(Error::Config("server.bind must not be empty".to_string()));
        }
        if let Some(ref path) = self.recommendations.catalog_path {
            if !path.exists() {
                return Err(Error::Config(format!(
                    "recommendations.catalog_path {:?} does not exist",
                    path
                )));
            }
        }
        Ok(())
    }

    /// Returns the default config file path
    ///
    /// `$XDG_CONFIG_HOME/haven/config.toml` (~/.config/haven/config.toml)
    pub fn config_path() -> PathBuf {
        xdg_config_home().join("haven").join("config.toml")
    }

    /// Returns the data directory path (for SQLite database)
    ///
    /// `$XDG_DATA_HOME/haven/` (~/.local/share/haven/)
    pub fn data_dir() -> PathBuf {
        xdg_data_home().join("haven")
    }

    /// Returns the state directory path (for logs)
    ///
    /// `$XDG_STATE_HOME/haven/` (~/.local/state/haven/)
    pub fn state_dir() -> PathBuf {
        xdg_state_home().join("haven")
    }

    /// Returns the database file path
    ///
    /// `$XDG_DATA_HOME/haven/data.db` (~/.local/share/haven/data.db)
    pub fn database_path() -> PathBuf {
        Self::data_dir().join("data.db")
    }

    /// Returns the log file path
    ///
    /// `$XDG_STATE_HOME/haven/haven.log` (~/.local/state/haven/haven.log)
    pub fn log_path() -> PathBuf {
        Self::state_dir().join("haven.log")
    }
}

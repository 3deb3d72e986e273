//! Environment-driven store configuration.
//!
//! # Responsibility
//! - Collect database location and logging settings from the environment.
//! - Keep lookup injectable so parsing can be tested without touching
//!   process-wide state.
//!
//! # Invariants
//! - A missing database path selects an in-memory database.
//! - A set but blank variable is treated as unset.
//! - `log_level` is always one of `trace|debug|info|warn|error`.

use crate::logging::{default_log_level, normalize_level};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "CLASSROOM_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "CLASSROOM_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "CLASSROOM_LOG_DIR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidLogLevel(String),
    RelativeLogDir(PathBuf),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLogLevel(message) => write!(f, "{LOG_LEVEL_ENV}: {message}"),
            Self::RelativeLogDir(path) => write!(
                f,
                "{LOG_DIR_ENV} must be an absolute path, got `{}`",
                path.display()
            ),
        }
    }
}

impl Error for ConfigError {}

/// Runtime settings for opening the store and its logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// SQLite file path; `None` means in-memory.
    pub db_path: Option<PathBuf>,
    pub log_level: &'static str,
    /// Directory for rolling log files; `None` disables file logging.
    pub log_dir: Option<PathBuf>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            log_level: default_log_level(),
            log_dir: None,
        }
    }
}

impl StoreConfig {
    /// Reads configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, keyed by the `*_ENV` names.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let log_level = match read(LOG_LEVEL_ENV) {
            Some(level) => normalize_level(&level).map_err(ConfigError::InvalidLogLevel)?,
            None => default_log_level(),
        };

        let log_dir = read(LOG_DIR_ENV).map(PathBuf::from);
        if let Some(dir) = &log_dir {
            if !dir.is_absolute() {
                return Err(ConfigError::RelativeLogDir(dir.clone()));
            }
        }

        Ok(Self {
            db_path: read(DB_PATH_ENV).map(PathBuf::from),
            log_level,
            log_dir,
        })
    }
}

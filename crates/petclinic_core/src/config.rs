//! Runtime configuration for clinic front ends.
//!
//! # Invariants
//! - `db_path` is never empty.
//! - File logging is enabled only when `log_dir` is set.

use crate::logging::{LogLevel, LoggingError};
use std::path::PathBuf;

pub const DEFAULT_DB_FILE_NAME: &str = "petclinic.sqlite3";

/// Resolved settings for opening the clinic database and logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClinicConfig {
    pub db_path: PathBuf,
    pub log_level: LogLevel,
    /// Absolute directory for rolling log files; `None` disables file logging.
    pub log_dir: Option<PathBuf>,
}

impl Default for ClinicConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_FILE_NAME),
            log_level: LogLevel::build_default(),
            log_dir: None,
        }
    }
}

impl ClinicConfig {
    /// Builds a config from raw front-end inputs, falling back to defaults.
    pub fn from_parts(
        db_path: Option<PathBuf>,
        log_level: Option<&str>,
        log_dir: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let config = Self {
            db_path: db_path.unwrap_or(defaults.db_path),
            log_level: match log_level {
                Some(level) => LogLevel::parse(level).map_err(ConfigError::Logging)?,
                None => defaults.log_level,
            },
            log_dir,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.db_path.as_os_str().is_empty() {
            return Err(ConfigError::EmptyDbPath);
        }
        if let Some(dir) = &self.log_dir {
            if !dir.is_absolute() {
                return Err(ConfigError::Logging(LoggingError::RelativeLogDir(
                    dir.clone(),
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug)]
pub enum ConfigError {
    EmptyDbPath,
    Logging(LoggingError),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyDbPath => write!(f, "database path cannot be empty"),
            Self::Logging(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::EmptyDbPath => None,
            Self::Logging(err) => Some(err),
        }
    }
}

//! core::config
//!
//! Driver configuration schema and loading.
//!
//! # Locations
//!
//! Searched in order:
//! 1. explicit `--config <path>` flag
//! 2. `$STRATA_CONFIG` if set
//! 3. `./strata.toml`
//!
//! A missing file is not an error; defaults apply. An explicit path ends
//! the search even when the file is missing. The config shapes the CLI
//! driver only; library callers pick their starting branch directly on
//! `Repository`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::types::BranchName;

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Driver configuration.
///
/// # Example
///
/// ```toml
/// initial_branch = "main"
/// quiet = false
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Name of the branch a fresh store starts on
    pub initial_branch: Option<String>,

    /// Suppress success chatter
    pub quiet: Option<bool>,
}

impl Config {
    /// Load configuration from the standard locations.
    ///
    /// `explicit` is the `--config` flag value.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be read, parsed,
    /// or validated. Missing files are not an error (defaults are used).
    pub fn load(explicit: Option<&Path>) -> Result<Config, ConfigError> {
        // 1. Explicit flag, which also ends the search
        if let Some(path) = explicit {
            if path.exists() {
                return Self::load_file(path);
            }
            return Ok(Config::default());
        }

        // 2. Check $STRATA_CONFIG
        if let Ok(var) = std::env::var("STRATA_CONFIG") {
            let path = PathBuf::from(var);
            if path.exists() {
                return Self::load_file(&path);
            }
        }

        // 3. Check ./strata.toml
        let local = Path::new("strata.toml");
        if local.exists() {
            return Self::load_file(local);
        }

        // No config found, use defaults
        Ok(Config::default())
    }

    /// Read, parse, and validate one config file.
    fn load_file(path: &Path) -> Result<Config, ConfigError> {
        let config = Self::read(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a config file.
    fn read(path: &Path) -> Result<Config, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(name) = &self.initial_branch {
            BranchName::new(name)
                .map_err(|e| ConfigError::InvalidValue(format!("invalid initial_branch: {e}")))?;
        }
        Ok(())
    }

    /// The validated starting branch.
    ///
    /// Defaults to the standard initial branch when not configured.
    pub fn starting_branch(&self) -> Result<BranchName, ConfigError> {
        match &self.initial_branch {
            Some(name) => BranchName::new(name)
                .map_err(|e| ConfigError::InvalidValue(format!("invalid initial_branch: {e}"))),
            None => Ok(BranchName::initial()),
        }
    }

    /// Whether success output is suppressed.
    ///
    /// Defaults to `false` if not configured.
    pub fn is_quiet(&self) -> bool {
        self.quiet.unwrap_or(false)
    }
}

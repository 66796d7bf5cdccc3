//! Repository configuration file support.
//!
//! This module provides utilities for reading repository and session store
//! configuration from TOML configuration files.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::factory::RepositoryType;
use super::repository::RepositoryError;

/// Repository configuration from file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryConfig {
    pub repository: RepositorySettings,
    #[serde(default)]
    pub session: SessionSettings,
}

/// Repository type settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositorySettings {
    #[serde(rename = "type")]
    pub repo_type: String,
    /// Load the demo dataset on startup
    #[serde(default = "default_seed")]
    pub seed: bool,
}

/// Session store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSettings {
    /// Store kind: "memory" or "file"
    #[serde(default = "default_session_store")]
    pub store: String,
    /// Path of the session file (file store only)
    #[serde(default = "default_session_file")]
    pub file_path: String,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            store: default_session_store(),
            file_path: default_session_file(),
        }
    }
}

/// Session store backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStoreKind {
    /// All sessions volatile, lost on restart
    Memory,
    /// Persistent sessions mirrored to a JSON file
    File,
}

fn default_seed() -> bool {
    true
}

fn default_session_store() -> String {
    "memory".to_string()
}

fn default_session_file() -> String {
    "sessions.json".to_string()
}

impl RepositoryConfig {
    /// Load repository configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(RepositoryConfig)` if successful
    /// * `Err(RepositoryError)` if file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, RepositoryError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            RepositoryError::configuration(format!("Failed to read config file: {}", e))
        })?;

        let config: RepositoryConfig = toml::from_str(&content).map_err(|e| {
            RepositoryError::configuration(format!("Failed to parse config file: {}", e))
        })?;

        Ok(config)
    }

    /// Load repository configuration from the default location.
    ///
    /// Searches for `telepredict.toml` in:
    /// 1. Current directory
    /// 2. `config/` directory
    /// 3. Parent directory
    ///
    /// # Returns
    /// * `Ok(RepositoryConfig)` if found and parsed successfully
    /// * `Err(RepositoryError)` if no config file found or parse error
    pub fn from_default_location() -> Result<Self, RepositoryError> {
        let search_paths = vec![
            PathBuf::from("telepredict.toml"),
            PathBuf::from("config/telepredict.toml"),
            PathBuf::from("../telepredict.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Err(RepositoryError::configuration(
            "No telepredict.toml found in standard locations",
        ))
    }

    /// Get the repository type from configuration.
    pub fn repository_type(&self) -> Result<RepositoryType, String> {
        RepositoryType::from_str(&self.repository.repo_type)
    }

    /// Whether the demo dataset should be loaded.
    pub fn seed(&self) -> bool {
        self.repository.seed
    }

    /// Get the configured session store kind.
    pub fn session_store_kind(&self) -> Result<SessionStoreKind, RepositoryError> {
        match self.session.store.to_lowercase().as_str() {
            "memory" => Ok(SessionStoreKind::Memory),
            "file" => Ok(SessionStoreKind::File),
            other => Err(RepositoryError::configuration(format!(
                "Unknown session store kind: {}",
                other
            ))),
        }
    }

    /// Path of the session file (meaningful for the file store only).
    pub fn session_file_path(&self) -> &str {
        &self.session.file_path
    }
}

impl Default for RepositoryConfig {
    /// In-memory repository with seed data and volatile sessions.
    fn default() -> Self {
        Self {
            repository: RepositorySettings {
                repo_type: "local".to_string(),
                seed: true,
            },
            session: SessionSettings::default(),
        }
    }
}

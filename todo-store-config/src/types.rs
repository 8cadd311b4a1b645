//! Configuration types

use crate::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Storage key used when none is configured
pub const DEFAULT_KEY: &str = "todo";

/// Key reserved for the backend write check; never valid as a storage key
pub const RESERVED_KEY: &str = "@@";

/// State path persisted when none is configured
pub const DEFAULT_PATH: &str = "todo.*";

/// Settings for the persisted-state plugin
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistenceConfig {
    /// Storage key the filtered state is written under
    pub key: String,

    /// Dot-separated state paths to persist; a trailing `*` selects all children.
    /// An empty list persists the whole state tree.
    pub paths: Vec<String>,

    /// Replace the initial state with the restored value instead of merging
    pub overwrite: bool,

    /// Directory used by file-backed storage
    pub storage_dir: Option<PathBuf>,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            key: DEFAULT_KEY.to_string(),
            paths: vec![DEFAULT_PATH.to_string()],
            overwrite: false,
            storage_dir: None,
        }
    }
}

impl PersistenceConfig {
    /// Create a configuration with the given key and default paths
    pub fn with_key(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    /// Replace the persisted paths
    pub fn paths<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.paths = paths.into_iter().map(Into::into).collect();
        self
    }

    /// Set overwrite-on-restore
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Check the key and every path
    pub fn validate(&self) -> ConfigResult<()> {
        if self.key.trim().is_empty() {
            return Err(ConfigError::validation("storage key cannot be empty"));
        }

        if self.key == RESERVED_KEY {
            return Err(ConfigError::validation(format!(
                "storage key '{RESERVED_KEY}' is reserved"
            )));
        }

        for path in &self.paths {
            if path.split('.').any(str::is_empty) {
                return Err(ConfigError::validation(format!(
                    "state path '{path}' contains an empty segment"
                )));
            }
        }

        Ok(())
    }
}

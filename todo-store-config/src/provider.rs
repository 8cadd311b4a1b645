//! Configuration provider using Figment

use crate::{
    error::{ConfigError, ConfigResult},
    types::PersistenceConfig,
};
use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use std::path::{Path, PathBuf};
use todo_store_common::Pretty;
use tracing::{debug, trace};

/// Prefix for environment variable overrides
pub const ENV_PREFIX: &str = "TODO_STORE_";

/// Configuration provider using figment
///
/// No caching is performed; every call to [`ConfigProvider::load`] reads the
/// sources again.
#[derive(Debug, Default, Clone)]
pub struct ConfigProvider {
    file: Option<PathBuf>,
    env_prefix: Option<String>,
}

impl ConfigProvider {
    /// Create a provider reading defaults and `TODO_STORE_` variables
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a configuration file layered between defaults and environment
    ///
    /// A missing file is skipped.
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    /// Use a different environment variable prefix
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = Some(prefix.into());
        self
    }

    /// Load and validate the persistence configuration
    pub fn load(&self) -> ConfigResult<PersistenceConfig> {
        let config: PersistenceConfig = self.build_figment()?.extract()?;
        config.validate()?;

        debug!("Loaded persistence configuration: {}", Pretty(&config));
        Ok(config)
    }

    /// Build the figment with all sources in precedence order
    fn build_figment(&self) -> ConfigResult<Figment> {
        let mut figment = Figment::from(Serialized::defaults(PersistenceConfig::default()));

        if let Some(path) = &self.file {
            figment = figment.merge(Self::load_config_file(path)?);
        }

        let prefix = self.env_prefix.as_deref().unwrap_or(ENV_PREFIX);
        trace!("Loading environment variables with prefix {}", prefix);
        Ok(figment.merge(Env::prefixed(prefix)))
    }

    /// Load a single configuration file based on its extension
    fn load_config_file(path: &Path) -> ConfigResult<Figment> {
        trace!("Loading config file: {}", path.display());

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("toml") => Ok(Figment::from(Toml::file(path))),
            Some("yaml") | Some("yml") => Ok(Figment::from(Yaml::file(path))),
            Some("json") => Ok(Figment::from(Json::file(path))),
            _ => Err(ConfigError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

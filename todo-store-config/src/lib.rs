//! Persistence configuration for the todo store using Figment
//!
//! The persisted-state plugin needs three decisions made up front: which
//! storage key holds the state, which parts of the state tree are written,
//! and whether a restored value replaces or merges into the initial state.
//! This crate loads those settings from layered sources.
//!
//! # Precedence
//!
//! Later sources override earlier ones:
//!
//! 1. Defaults (`key = "todo"`, `paths = ["todo.*"]`, `overwrite = false`)
//! 2. An optional configuration file (TOML, YAML or JSON by extension)
//! 3. Environment variables prefixed with `TODO_STORE_`
//!
//! # Example
//!
//! ```no_run
//! use todo_store_config::ConfigProvider;
//!
//! let config = ConfigProvider::new()
//!     .with_file("todo-store.toml")
//!     .load()?;
//!
//! assert!(!config.key.is_empty());
//! # Ok::<(), todo_store_config::ConfigError>(())
//! ```

pub mod error;
pub mod provider;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::{ConfigError, ConfigResult};
pub use provider::{ConfigProvider, ENV_PREFIX};
pub use types::{PersistenceConfig, DEFAULT_KEY, DEFAULT_PATH, RESERVED_KEY};

/// Load persistence configuration from defaults and environment variables
pub fn load_configuration() -> ConfigResult<PersistenceConfig> {
    ConfigProvider::new().load()
}

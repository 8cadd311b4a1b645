//! Error types for todo store operations

use thiserror::Error;
use todo_store_common::{ErrorSeverity, Severity};
use todo_store_config::ConfigError;

/// Result type for todo store operations
pub type Result<T> = std::result::Result<T, TodoError>;

/// Errors that can occur in storage and persistence operations
///
/// The store's mutating operations never return these; they surface only from
/// storage backends, configuration loading and explicit persistence calls.
#[derive(Debug, Error)]
pub enum TodoError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration could not be loaded or is incomplete
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Invalid storage key
    #[error("Invalid storage key: {0}")]
    InvalidStorageKey(String),

    /// Invalid todo item ID
    #[error("Invalid todo item ID: {0}")]
    InvalidTodoId(String),

    /// Storage backend rejected the operation
    #[error("Storage error: {0}")]
    Storage(String),
}

impl TodoError {
    /// Create a new storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }
}

impl Severity for TodoError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            // Critical: the backend itself is unusable
            TodoError::Io(_) => ErrorSeverity::Critical,

            // Error: a single operation failed
            TodoError::Json(_) => ErrorSeverity::Error,
            TodoError::InvalidStorageKey(_) => ErrorSeverity::Error,
            TodoError::InvalidTodoId(_) => ErrorSeverity::Error,
            TodoError::Storage(_) => ErrorSeverity::Error,

            // Delegate to wrapped error's severity
            TodoError::Config(err) => err.severity(),
        }
    }
}

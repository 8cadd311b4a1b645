//! Logging utilities for the todo store
//!
//! This module provides tracing initialization and helpers for formatting
//! and reporting values in log messages.

use crate::error::{ErrorSeverity, Severity};
use serde::Serialize;
use std::fmt::{Debug, Display};
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

/// Wrapper for pretty-printing types in logs as YAML
///
/// ```ignore
/// use todo_store_common::Pretty;
/// use tracing::debug;
///
/// debug!("Restored state: {}", Pretty(&list));
/// ```
///
/// Outputs YAML format with a leading newline. Debug is used as a fallback
/// if YAML serialization fails.
pub struct Pretty<T>(pub T);

impl<T: Serialize + Debug> Display for Pretty<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match serde_yaml_ng::to_string(&self.0) {
            Ok(yaml) => write!(f, "\n{}", yaml),
            Err(_) => write!(f, "\n{:#?}", self.0),
        }
    }
}

impl<T: Serialize + Debug> Debug for Pretty<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

/// Install a global fmt subscriber filtered by `RUST_LOG`
///
/// Falls back to `default_filter` when `RUST_LOG` is unset or invalid.
/// Returns `false` if a global subscriber was already installed.
pub fn init_logging(default_filter: &str) -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}

/// Report an error at the log level matching its severity
pub fn log_with_severity<E>(context: &str, err: &E)
where
    E: Severity + Display,
{
    match err.severity() {
        ErrorSeverity::Warning | ErrorSeverity::Error => {
            warn!(severity = %err.severity(), "{}: {}", context, err)
        }
        ErrorSeverity::Critical => error!(severity = %err.severity(), "{}: {}", context, err),
    }
}

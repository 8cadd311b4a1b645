//! # Todo Store Common
//!
//! Foundational types and utilities shared by the todo store crates.
//!
//! ## Modules
//!
//! - [`error`] - Severity classification implemented by every error type
//! - [`logging`] - Tracing setup and log formatting helpers

pub mod error;
pub mod logging;

// Re-export error types for convenience
pub use error::{ErrorSeverity, Severity};

// Re-export logging helpers for convenience
pub use logging::{init_logging, log_with_severity, Pretty};

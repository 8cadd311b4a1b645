//! Error severity classification
//!
//! Each crate in the workspace defines its own `thiserror` enum and implements
//! [`Severity`] for it, so callers can decide how loudly to report a failure
//! without matching on crate-specific variants.

use std::fmt;

/// Severity levels for error classification
///
/// # Severity Levels
///
/// - **Warning**: Potential issue but operation can proceed.
/// - **Error**: Operation failed but the store can continue.
/// - **Critical**: The store cannot continue with its current backend.
///
/// # Examples
///
/// ```rust
/// use todo_store_common::ErrorSeverity;
///
/// // Warning: a persisted value that could not be decoded
/// let malformed = ErrorSeverity::Warning;
///
/// // Critical: the storage backend refuses writes
/// let unwritable = ErrorSeverity::Critical;
///
/// assert!(unwritable > malformed);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorSeverity {
    /// Potential issue but operation can proceed
    ///
    /// # Examples
    /// - Malformed persisted state that is discarded on restore
    /// - Non-critical configuration issues
    Warning,

    /// Operation failed but the store can continue
    ///
    /// # Examples
    /// - A single write to the backend failed
    /// - Invalid storage key
    Error,

    /// Requires immediate attention
    ///
    /// # Examples
    /// - Storage directory cannot be created
    /// - Backend rejected the availability probe
    Critical,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorSeverity::Warning => write!(f, "warning"),
            ErrorSeverity::Error => write!(f, "error"),
            ErrorSeverity::Critical => write!(f, "critical"),
        }
    }
}

/// Trait for error types that have severity levels
///
/// # Example
///
/// ```rust
/// use todo_store_common::{ErrorSeverity, Severity};
///
/// #[derive(Debug)]
/// enum MyError {
///     BackendGone,
///     BadKey,
///     EmptyValue,
/// }
///
/// impl Severity for MyError {
///     fn severity(&self) -> ErrorSeverity {
///         match self {
///             MyError::BackendGone => ErrorSeverity::Critical,
///             MyError::BadKey => ErrorSeverity::Error,
///             MyError::EmptyValue => ErrorSeverity::Warning,
///         }
///     }
/// }
///
/// assert_eq!(MyError::BackendGone.severity(), ErrorSeverity::Critical);
/// ```
pub trait Severity {
    /// Get the severity level of this error
    fn severity(&self) -> ErrorSeverity;
}

//! Utility functions for storage keys

use crate::error::{Result, TodoError};

/// Validate a storage key
///
/// Keys become file names in [`crate::FileStorage`], so they must be
/// non-empty and free of path separators and reserved characters.
pub fn validate_storage_key(key: &str) -> Result<()> {
    if key.trim().is_empty() {
        return Err(TodoError::InvalidStorageKey(
            "Storage key cannot be empty".to_string(),
        ));
    }

    let invalid_chars = ['/', '\\', ':', '*', '?', '"', '<', '>', '|', '\0'];
    for ch in invalid_chars {
        if key.contains(ch) {
            return Err(TodoError::InvalidStorageKey(format!(
                "Storage key contains invalid character '{ch}': '{key}'"
            )));
        }
    }

    if key == "." || key == ".." {
        return Err(TodoError::InvalidStorageKey(format!(
            "Storage key cannot be '{key}'"
        )));
    }

    Ok(())
}

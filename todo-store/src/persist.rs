//! Persisted-state plugin
//!
//! The store's state is exposed as a JSON tree with the todo module under
//! [`MODULE_NAME`]:
//!
//! ```json
//! { "todo": { "items": [ { "id": 1, "completed": false, "text": "...", "createdAt": "..." } ] } }
//! ```
//!
//! Only the sub-trees selected by the configured paths are written to the
//! backend, so sibling state sharing the same tree is never persisted here.
//! On construction the backend is probed; a backend that cannot take a write
//! disables the plugin instead of failing the store.

use crate::error::{Result, TodoError};
use crate::storage::{FileStorage, StorageBackend};
use crate::types::TodoList;
use serde_json::{Map, Value};
use todo_store_common::{log_with_severity, Pretty};
use todo_store_config::{ConfigError, PersistenceConfig};
use tracing::{debug, trace, warn};

/// Name of the todo module in the state tree
pub const MODULE_NAME: &str = "todo";

/// Key written and removed to check the backend accepts writes
pub const PROBE_KEY: &str = todo_store_config::RESERVED_KEY;

/// Wildcard segment selecting every child of its parent path
const WILDCARD: &str = "*";

/// Build the state tree for a todo list
pub fn state_tree(list: &TodoList) -> Result<Value> {
    let mut root = Map::new();
    root.insert(MODULE_NAME.to_string(), serde_json::to_value(list)?);
    Ok(Value::Object(root))
}

/// Copy only the sub-trees of `state` selected by `paths`
///
/// Paths are dot-separated. A trailing `*` selects every child of the parent
/// path, which must be an object or array. Paths that match nothing are
/// skipped. An empty path list selects the whole state.
pub fn reduce_paths<S: AsRef<str>>(state: &Value, paths: &[S]) -> Value {
    if paths.is_empty() {
        return state.clone();
    }

    let mut reduced = Value::Object(Map::new());

    for path in paths {
        let mut segments: Vec<&str> = path.as_ref().split('.').collect();
        let wildcard = segments.last() == Some(&WILDCARD);
        if wildcard {
            segments.pop();
        }

        let Some(selected) = lookup(state, &segments) else {
            trace!("State path '{}' matched nothing", path.as_ref());
            continue;
        };

        if wildcard && !(selected.is_object() || selected.is_array()) {
            continue;
        }

        assign(&mut reduced, &segments, selected.clone());
    }

    reduced
}

/// Deep-merge `overlay` into `base`
///
/// Objects merge key by key; arrays and scalars from `overlay` replace those
/// in `base`.
pub fn merge_state(base: &Value, overlay: &Value) -> Value {
    match (base, overlay) {
        (Value::Object(base), Value::Object(overlay)) => {
            let mut merged = base.clone();
            for (key, value) in overlay {
                let entry = match base.get(key) {
                    Some(existing) => merge_state(existing, value),
                    None => value.clone(),
                };
                merged.insert(key.clone(), entry);
            }
            Value::Object(merged)
        }
        _ => overlay.clone(),
    }
}

fn lookup<'a>(state: &'a Value, segments: &[&str]) -> Option<&'a Value> {
    segments.iter().try_fold(state, |node, segment| match node {
        Value::Object(map) => map.get(*segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

fn assign(target: &mut Value, segments: &[&str], value: Value) {
    let Some((head, rest)) = segments.split_first() else {
        *target = value;
        return;
    };

    if !target.is_object() {
        *target = Value::Object(Map::new());
    }
    if let Value::Object(map) = target {
        let child = map.entry(head.to_string()).or_insert(Value::Null);
        assign(child, rest, value);
    }
}

/// Saves and restores the todo module's state through a storage backend
#[derive(Debug)]
pub struct PersistedState {
    backend: Box<dyn StorageBackend>,
    config: PersistenceConfig,
    enabled: bool,
}

impl PersistedState {
    /// Attach a backend, probing it for write access
    ///
    /// An invalid configuration disables persistence without touching the backend.
    pub fn new(backend: impl StorageBackend + 'static, config: PersistenceConfig) -> Self {
        let enabled = match config.validate() {
            Ok(()) => true,
            Err(err) => {
                log_with_severity("Invalid persistence configuration, persistence disabled", &err);
                false
            }
        };

        let enabled = enabled
            && match Self::probe(&backend) {
                Ok(()) => true,
                Err(err) => {
                    log_with_severity(
                        "Storage backend is not writable, persistence disabled",
                        &err,
                    );
                    false
                }
            };

        debug!(enabled, "Persisted state configured: {}", Pretty(&config));

        Self {
            backend: Box::new(backend),
            config,
            enabled,
        }
    }

    /// Build file-backed persistence from configuration
    ///
    /// Requires `storage_dir` to be set.
    pub fn from_config(config: PersistenceConfig) -> Result<Self> {
        config.validate()?;

        let dir = config.storage_dir.clone().ok_or_else(|| {
            TodoError::Config(ConfigError::validation(
                "storage_dir is required for file-backed persistence",
            ))
        })?;

        Ok(Self::new(FileStorage::new(dir), config))
    }

    fn probe(backend: &dyn StorageBackend) -> Result<()> {
        backend.set(PROBE_KEY, "1")?;
        backend.remove(PROBE_KEY)
    }

    /// Whether the backend passed the write probe
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn config(&self) -> &PersistenceConfig {
        &self.config
    }

    /// Read and parse the saved state tree
    ///
    /// Absent, unreadable, or malformed values yield `None`.
    pub fn fetch_saved_state(&self) -> Option<Value> {
        if !self.enabled {
            return None;
        }

        let raw = match self.backend.get(&self.config.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                log_with_severity("Failed to read persisted todo state", &err);
                return None;
            }
        };

        match serde_json::from_str::<Value>(&raw) {
            Ok(value) if value.is_object() => Some(value),
            Ok(_) => {
                warn!(key = %self.config.key, "Persisted todo state is not an object, ignoring");
                None
            }
            Err(err) => {
                warn!(key = %self.config.key, "Persisted todo state is malformed, ignoring: {}", err);
                None
            }
        }
    }

    /// Rebuild the todo list from the saved state layered over `initial`
    ///
    /// Falls back to `initial` when nothing usable is stored.
    pub fn restore(&self, initial: &TodoList) -> TodoList {
        let Some(saved) = self.fetch_saved_state() else {
            return initial.clone();
        };

        let merged = if self.config.overwrite {
            saved
        } else {
            match state_tree(initial) {
                Ok(base) => merge_state(&base, &saved),
                Err(err) => {
                    log_with_severity("Failed to build initial todo state", &err);
                    saved
                }
            }
        };

        let Some(module_state) = merged.get(MODULE_NAME) else {
            debug!("Persisted state has no '{}' module, starting empty", MODULE_NAME);
            return initial.clone();
        };

        match serde_json::from_value::<TodoList>(module_state.clone()) {
            Ok(list) if list.next_id().is_none() => {
                warn!("Persisted todo list uses the largest possible id, ignoring");
                initial.clone()
            }
            Ok(list) => {
                debug!(items = list.len(), "Restored persisted todo list");
                list
            }
            Err(err) => {
                warn!("Persisted todo list could not be decoded, ignoring: {}", err);
                initial.clone()
            }
        }
    }

    /// Write the path-filtered state for `list`
    pub fn save(&self, list: &TodoList) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }

        let reduced = reduce_paths(&state_tree(list)?, self.config.paths.as_slice());
        let serialized = serde_json::to_string(&reduced)?;

        trace!(key = %self.config.key, "Saving {} bytes of todo state", serialized.len());
        self.backend.set(&self.config.key, &serialized)
    }

    /// Remove the saved state from the backend
    pub fn clear(&self) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }
        self.backend.remove(&self.config.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    #[derive(Debug)]
    struct RejectingStorage;

    impl StorageBackend for RejectingStorage {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Ok(Some(r#"{"todo":{"items":[]}}"#.to_string()))
        }

        fn set(&self, _key: &str, _value: &str) -> Result<()> {
            Err(TodoError::storage("quota exceeded"))
        }

        fn remove(&self, _key: &str) -> Result<()> {
            Err(TodoError::storage("quota exceeded"))
        }
    }

    fn sample_list() -> TodoList {
        let mut list = TodoList::new();
        list.add_item("buy milk", Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap());
        list.add_item("walk dog", Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap());
        list
    }

    #[test]
    fn test_reduce_paths_wildcard_selects_module() {
        let state = json!({
            "todo": { "items": [1, 2] },
            "settings": { "theme": "dark" }
        });

        let reduced = reduce_paths(&state, &["todo.*"]);
        assert_eq!(reduced, json!({ "todo": { "items": [1, 2] } }));
    }

    #[test]
    fn test_reduce_paths_exact_leaf() {
        let state = json!({
            "todo": { "items": [1], "filter": "all" },
            "settings": { "theme": "dark", "lang": "en" }
        });

        let reduced = reduce_paths(&state, &["todo.items", "settings.theme"]);
        assert_eq!(
            reduced,
            json!({ "todo": { "items": [1] }, "settings": { "theme": "dark" } })
        );
    }

    #[test]
    fn test_reduce_paths_skips_missing_and_scalar_wildcards() {
        let state = json!({ "todo": { "items": [] }, "count": 3 });

        let reduced = reduce_paths(&state, &["missing.path", "count.*"]);
        assert_eq!(reduced, json!({}));
    }

    #[test]
    fn test_reduce_paths_empty_selects_everything() {
        let state = json!({ "todo": { "items": [] }, "other": true });
        let reduced = reduce_paths::<&str>(&state, &[]);
        assert_eq!(reduced, state);
    }

    #[test]
    fn test_merge_state_replaces_arrays_and_keeps_siblings() {
        let base = json!({ "todo": { "items": [1, 2, 3], "filter": "all" } });
        let overlay = json!({ "todo": { "items": [9] } });

        assert_eq!(
            merge_state(&base, &overlay),
            json!({ "todo": { "items": [9], "filter": "all" } })
        );
    }

    #[test]
    fn test_save_writes_only_selected_paths() {
        let storage = MemoryStorage::new();
        let persisted = PersistedState::new(storage.clone(), PersistenceConfig::default());
        assert!(persisted.is_enabled());

        persisted.save(&sample_list()).unwrap();

        let raw = storage.get("todo").unwrap().unwrap();
        let value: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["todo"]["items"].as_array().map(Vec::len), Some(2));
        assert_eq!(value.as_object().map(Map::len), Some(1));

        // The probe key is cleaned up
        assert_eq!(storage.get(PROBE_KEY).unwrap(), None);
    }

    #[test]
    fn test_restore_roundtrip() {
        let storage = MemoryStorage::new();
        let persisted = PersistedState::new(storage, PersistenceConfig::default());
        let list = sample_list();

        persisted.save(&list).unwrap();
        assert_eq!(persisted.restore(&TodoList::new()), list);
    }

    #[test]
    fn test_restore_absent_value_yields_initial() {
        let persisted = PersistedState::new(MemoryStorage::new(), PersistenceConfig::default());
        assert_eq!(persisted.restore(&TodoList::new()), TodoList::new());
    }

    #[test]
    fn test_restore_malformed_value_yields_empty() {
        for raw in ["not json", "[1,2,3]", "null", r#"{"todo":{"items":"oops"}}"#] {
            let storage = MemoryStorage::new();
            storage.set("todo", raw).unwrap();

            let persisted = PersistedState::new(storage, PersistenceConfig::default());
            assert!(
                persisted.restore(&TodoList::new()).is_empty(),
                "{raw} should restore as empty"
            );
        }
    }

    #[test]
    fn test_restore_max_id_yields_empty() {
        let storage = MemoryStorage::new();
        storage
            .set(
                "todo",
                &format!(
                    r#"{{"todo":{{"items":[{{"id":{},"completed":false,"text":"last","createdAt":"2024-03-01T09:00:00Z"}}]}}}}"#,
                    u64::MAX
                ),
            )
            .unwrap();

        let persisted = PersistedState::new(storage, PersistenceConfig::default());
        let restored = persisted.restore(&TodoList::new());
        assert!(restored.is_empty());
        assert_eq!(restored.next_id(), Some(crate::types::TodoId::new(1)));
    }

    #[test]
    fn test_restore_with_overwrite_ignores_initial() {
        let storage = MemoryStorage::new();
        storage.set("todo", r#"{"settings":{}}"#).unwrap();

        let config = PersistenceConfig::default().overwrite(true);
        let persisted = PersistedState::new(storage, config);

        // No todo module in the saved tree, so the initial list is kept
        let initial = sample_list();
        assert_eq!(persisted.restore(&initial), initial);
    }

    #[test]
    fn test_restore_merges_over_initial() {
        let storage = MemoryStorage::new();
        storage.set("todo", r#"{"todo":{"items":[]}}"#).unwrap();

        let persisted = PersistedState::new(storage, PersistenceConfig::default());

        // Saved array replaces the initial one
        assert!(persisted.restore(&sample_list()).is_empty());
    }

    #[test]
    fn test_unwritable_backend_disables_persistence() {
        let persisted = PersistedState::new(RejectingStorage, PersistenceConfig::default());

        assert!(!persisted.is_enabled());
        assert!(persisted.fetch_saved_state().is_none());
        assert!(persisted.save(&sample_list()).is_ok());
        assert!(persisted.clear().is_ok());
    }

    #[test]
    fn test_reserved_key_leaves_stored_value_alone() {
        let storage = MemoryStorage::new();
        storage.set(PROBE_KEY, "user data").unwrap();

        let persisted =
            PersistedState::new(storage.clone(), PersistenceConfig::with_key(PROBE_KEY));

        assert!(!persisted.is_enabled());
        assert_eq!(storage.get(PROBE_KEY).unwrap().as_deref(), Some("user data"));
    }

    #[test]
    fn test_clear_removes_saved_state() {
        let storage = MemoryStorage::new();
        let persisted = PersistedState::new(storage.clone(), PersistenceConfig::default());

        persisted.save(&sample_list()).unwrap();
        assert!(storage.get("todo").unwrap().is_some());

        persisted.clear().unwrap();
        assert!(storage.get("todo").unwrap().is_none());
    }

    #[test]
    fn test_from_config_requires_storage_dir() {
        let result = PersistedState::from_config(PersistenceConfig::default());
        assert!(matches!(result, Err(TodoError::Config(_))));
    }

    #[test]
    fn test_from_config_uses_file_storage() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let config = PersistenceConfig {
            storage_dir: Some(temp_dir.path().to_path_buf()),
            ..PersistenceConfig::default()
        };

        let persisted = PersistedState::from_config(config).unwrap();
        persisted.save(&sample_list()).unwrap();

        assert!(temp_dir.path().join("todo.json").exists());
    }
}

//! Todo list store with path-filtered persistence
//!
//! This crate holds an in-memory list of todo items, applies add, toggle and
//! delete to it, derives a sorted view on demand, and saves the list through
//! a pluggable key-value storage backend after every mutation.
//!
//! ## Features
//!
//! - **Derived ids**: each new item gets `1 + max(existing ids)`, so ids restart at 1
//!   once the list is empty
//! - **Tolerant mutations**: toggling or deleting a missing id is a silent no-op
//! - **Sorted view**: incomplete items first, each group ordered by creation time
//! - **Path filtering**: only the configured parts of the state tree are persisted
//! - **Fail-safe restore**: absent or malformed saved state starts an empty list
//!
//! ## Basic Usage
//!
//! ```rust
//! use todo_store::{MemoryStorage, PersistedState, TodoId, TodoStore};
//! use todo_store_config::PersistenceConfig;
//!
//! let storage = MemoryStorage::new();
//! let persistence = PersistedState::new(storage.clone(), PersistenceConfig::default());
//! let mut store = TodoStore::with_persistence(persistence);
//!
//! store.add_item("buy milk");
//! store.add_item("walk dog");
//! store.toggle_item(TodoId::new(1));
//!
//! let sorted = store.sorted_view();
//! assert_eq!(sorted[0].text, "walk dog");
//!
//! // A fresh store over the same storage sees the same list
//! let restored = TodoStore::with_persistence(PersistedState::new(
//!     storage,
//!     PersistenceConfig::default(),
//! ));
//! assert_eq!(restored.items(), store.items());
//! ```

mod clock;
mod error;
mod persist;
mod storage;
mod store;
mod types;
mod utils;

// Re-exports
pub use clock::{Clock, SystemClock};
pub use error::{Result, TodoError};
pub use persist::{merge_state, reduce_paths, state_tree, PersistedState, MODULE_NAME, PROBE_KEY};
pub use storage::{FileStorage, MemoryStorage, StorageBackend};
pub use store::TodoStore;
pub use types::{TodoId, TodoItem, TodoList};
pub use utils::validate_storage_key;

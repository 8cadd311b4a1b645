//! The todo list store
//!
//! [`TodoStore`] is the sole owner and mutator of the list. Every mutation is
//! a direct, synchronous change to the in-memory list followed by a save of
//! the filtered state when persistence is attached. A failed save is logged
//! and never undoes the mutation.

use crate::clock::{Clock, SystemClock};
use crate::error::Result;
use crate::persist::PersistedState;
use crate::types::{TodoId, TodoItem, TodoList};
use std::fmt;
use todo_store_common::log_with_severity;
use todo_store_config::PersistenceConfig;
use tracing::{debug, trace, warn};

/// Owns the todo list and applies add, toggle and delete to it
pub struct TodoStore {
    list: TodoList,
    clock: Box<dyn Clock>,
    persistence: Option<PersistedState>,
}

impl TodoStore {
    /// Create an empty, in-memory store
    pub fn new() -> Self {
        Self {
            list: TodoList::new(),
            clock: Box::new(SystemClock),
            persistence: None,
        }
    }

    /// Create a store restored from persisted state
    ///
    /// Starts empty when nothing usable is stored.
    pub fn with_persistence(persistence: PersistedState) -> Self {
        let list = persistence.restore(&TodoList::new());
        debug!(items = list.len(), "Todo store initialized");

        Self {
            list,
            clock: Box::new(SystemClock),
            persistence: Some(persistence),
        }
    }

    /// Create a file-backed store from configuration
    pub fn from_config(config: PersistenceConfig) -> Result<Self> {
        Ok(Self::with_persistence(PersistedState::from_config(config)?))
    }

    /// Replace the timestamp source
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Append a new incomplete item; `text` is kept verbatim
    pub fn add_item(&mut self, text: impl Into<String>) {
        let created_at = self.clock.now();
        match self.list.add_item(text, created_at) {
            Some(item) => debug!(id = %item.id, "Added todo item"),
            None => warn!("Todo id space exhausted, item not added"),
        }
        self.persist();
    }

    /// Flip completion of the item with `id`; a missing id is a no-op
    pub fn toggle_item(&mut self, id: TodoId) {
        if self.list.toggle_item(id) {
            debug!(%id, "Toggled todo item");
        } else {
            trace!(%id, "Toggle ignored, no such item");
        }
        self.persist();
    }

    /// Remove every item with `id`; a missing id is a no-op
    pub fn delete_item(&mut self, id: TodoId) {
        let removed = self.list.delete_item(id);
        debug!(%id, removed, "Deleted todo item");
        self.persist();
    }

    /// Freshly computed display order, see [`TodoList::sorted_view`]
    pub fn sorted_view(&self) -> Vec<TodoItem> {
        self.list.sorted_view()
    }

    /// Items in insertion order
    pub fn items(&self) -> &[TodoItem] {
        &self.list.items
    }

    pub fn list(&self) -> &TodoList {
        &self.list
    }

    pub fn persistence(&self) -> Option<&PersistedState> {
        self.persistence.as_ref()
    }

    fn persist(&self) {
        let Some(persistence) = &self.persistence else {
            return;
        };

        if let Err(err) = persistence.save(&self.list) {
            log_with_severity("Failed to persist todo state", &err);
        }
    }
}

impl Default for TodoStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TodoStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TodoStore")
            .field("list", &self.list)
            .field("persistence", &self.persistence)
            .finish_non_exhaustive()
    }
}

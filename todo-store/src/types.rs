//! Core data types for the todo list

use crate::error::TodoError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of a todo item
///
/// Assigned as one more than the largest id currently in the list, so ids
/// restart at 1 once the list is emptied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(u64);

impl TodoId {
    /// Wrap a raw id
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw id
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl From<u64> for TodoId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TodoId {
    type Err = TodoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(Self)
            .map_err(|_| TodoError::InvalidTodoId(s.to_string()))
    }
}

/// A single todo entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    pub id: TodoId,
    #[serde(default)]
    pub completed: bool,
    pub text: String,
    /// Only used for ordering the sorted view
    pub created_at: DateTime<Utc>,
}

/// The canonical, insertion-ordered list of todo items
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoList {
    #[serde(default)]
    pub items: Vec<TodoItem>,
}

impl TodoList {
    /// Create an empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Id the next added item will receive
    ///
    /// `None` once the largest id is `u64::MAX` and no larger id exists.
    pub fn next_id(&self) -> Option<TodoId> {
        let max = self.items.iter().map(|item| item.id.0).max().unwrap_or(0);
        max.checked_add(1).map(TodoId)
    }

    /// Append a new incomplete item
    ///
    /// Returns `None` without changing the list when the id space is exhausted.
    pub fn add_item(
        &mut self,
        text: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Option<&TodoItem> {
        let item = TodoItem {
            id: self.next_id()?,
            completed: false,
            text: text.into(),
            created_at,
        };
        self.items.push(item);
        self.items.last()
    }

    /// Flip `completed` on the first item with this id
    ///
    /// Returns `false` when no item matched.
    pub fn toggle_item(&mut self, id: TodoId) -> bool {
        match self.find_item_mut(id) {
            Some(item) => {
                item.completed = !item.completed;
                true
            }
            None => false,
        }
    }

    /// Remove every item with this id, returning how many were removed
    pub fn delete_item(&mut self, id: TodoId) -> usize {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        before - self.items.len()
    }

    /// Incomplete items first, each partition ordered by creation time
    ///
    /// The sort is stable, so items with equal timestamps keep list order.
    pub fn sorted_view(&self) -> Vec<TodoItem> {
        let mut sorted = self.items.clone();
        sorted.sort_by(|a, b| {
            a.completed
                .cmp(&b.completed)
                .then_with(|| a.created_at.cmp(&b.created_at))
        });
        sorted
    }

    /// Find the first item with this id
    pub fn find_item(&self, id: TodoId) -> Option<&TodoItem> {
        self.items.iter().find(|item| item.id == id)
    }

    fn find_item_mut(&mut self, id: TodoId) -> Option<&mut TodoItem> {
        self.items.iter_mut().find(|item| item.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn incomplete_count(&self) -> usize {
        self.items.iter().filter(|item| !item.completed).count()
    }

    pub fn complete_count(&self) -> usize {
        self.items.iter().filter(|item| item.completed).count()
    }
}

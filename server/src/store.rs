//! Record store consumed by the handlers.
//!
//! The handlers only see [`TodoStore`]; whatever backs it is injected through
//! router state. [`InMemoryStore`] is the implementation the binary and the
//! tests run against.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use thiserror::Error;

use crate::todo::{local_now, NewTodo, Todo, TodoId};

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("todo {0} does not exist")]
    NotFound(TodoId),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Restricts a [`TodoStore::query`]. The default selects every record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TodoFilter {
    pub completed: Option<bool>,
}

/// Synchronous record store for todos.
///
/// Queries return records in insertion order. `insert` assigns the id and
/// both timestamps; `update` refreshes `updated_at`.
pub trait TodoStore: Send + Sync {
    fn get(&self, id: TodoId) -> Result<Option<Todo>>;

    fn query(&self, filter: TodoFilter) -> Result<Vec<Todo>>;

    fn insert(&self, todo: NewTodo) -> Result<Todo>;

    fn update(&self, todo: Todo) -> Result<Todo>;

    /// Removes the record and returns it, or `None` if nothing was stored
    /// under `id`.
    fn delete(&self, id: TodoId) -> Result<Option<Todo>>;
}

#[derive(Debug, Default)]
struct Records {
    last_id: TodoId,
    // Ids only grow, so key order is insertion order.
    todos: BTreeMap<TodoId, Todo>,
}

#[derive(Debug, Default)]
pub struct InMemoryStore {
    records: RwLock<Records>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Records>> {
        self.records
            .read()
            .map_err(|e| StoreError::Unavailable(e.to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Records>> {
        self.records
            .write()
            .map_err(|e| StoreError::Unavailable(e.to_string()))
    }
}

impl TodoStore for InMemoryStore {
    fn get(&self, id: TodoId) -> Result<Option<Todo>> {
        Ok(self.read()?.todos.get(&id).cloned())
    }

    fn query(&self, filter: TodoFilter) -> Result<Vec<Todo>> {
        let records = self.read()?;
        Ok(records
            .todos
            .values()
            .filter(|todo| filter.completed.map_or(true, |c| todo.completed == c))
            .cloned()
            .collect())
    }

    fn insert(&self, todo: NewTodo) -> Result<Todo> {
        let mut records = self.write()?;
        records.last_id += 1;
        let now = local_now();
        let todo = Todo {
            id: records.last_id,
            title: todo.title,
            description: todo.description,
            completed: todo.completed,
            deadline_at: todo.deadline_at,
            created_at: now,
            updated_at: now,
        };
        records.todos.insert(todo.id, todo.clone());
        Ok(todo)
    }

    fn update(&self, mut todo: Todo) -> Result<Todo> {
        let mut records = self.write()?;
        let stored = records
            .todos
            .get_mut(&todo.id)
            .ok_or(StoreError::NotFound(todo.id))?;
        todo.created_at = stored.created_at;
        todo.updated_at = local_now();
        *stored = todo.clone();
        Ok(todo)
    }

    fn delete(&self, id: TodoId) -> Result<Option<Todo>> {
        Ok(self.write()?.todos.remove(&id))
    }
}

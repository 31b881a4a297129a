//! The todo record as stored and served.

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

pub type TodoId = i64;

/// A stored todo item.
///
/// Every field is always serialized; unset optionals come out as `null`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: TodoId,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub deadline_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// A validated todo that has not been stored yet. The store assigns the id
/// and both timestamps on insert.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewTodo {
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub deadline_at: Option<NaiveDateTime>,
}

impl NewTodo {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            completed: false,
            deadline_at: None,
        }
    }
}

/// Current wall-clock time without an offset, the same clock deadlines are
/// written against.
pub fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

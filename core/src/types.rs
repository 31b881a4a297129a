//! Wire types for the todo API.
//!
//! Defined independently of the server crate; the integration test against a
//! live server catches schema drift between the two.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A todo item as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub deadline_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Request payload for creating a todo. Unset optionals are left out of the
/// body so the server applies its defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTodo {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline_at: Option<NaiveDateTime>,
}

impl NewTodo {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            completed: false,
            deadline_at: None,
        }
    }
}

/// Request payload for a partial update. `None` leaves the field alone on
/// the server; `Some(None)` for `description` or `deadline_at` clears it.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TodoPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline_at: Option<Option<NaiveDateTime>>,
}

/// Filters for listing todos.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub completed: Option<bool>,
    /// Only todos due within this many days from now (plus undated ones).
    pub window: Option<i64>,
}

impl ListQuery {
    /// Renders the query string, including the leading `?`, or an empty
    /// string when no filter is set.
    pub fn to_query_string(&self) -> String {
        let params: Vec<String> = self
            .completed
            .map(|c| format!("completed={c}"))
            .into_iter()
            .chain(self.window.map(|w| format!("window={w}")))
            .collect();
        if params.is_empty() {
            String::new()
        } else {
            format!("?{}", params.join("&"))
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Health {
    pub status: String,
}

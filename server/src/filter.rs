//! Query-time filters for listing todos.

use chrono::{NaiveDateTime, TimeDelta};
use serde::Deserialize;

use crate::error::{Result, ServerError};
use crate::store::TodoFilter;
use crate::todo::Todo;

/// Raw query parameters of `GET /todos`.
///
/// Kept as strings so malformed values produce our own error messages rather
/// than an extractor rejection.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub completed: Option<String>,
    pub window: Option<String>,
}

impl ListQuery {
    /// Store filter for the `completed` parameter. An absent parameter
    /// selects everything.
    pub fn store_filter(&self) -> TodoFilter {
        TodoFilter {
            completed: self.completed.as_deref().map(parse_completed),
        }
    }

    pub fn window_days(&self) -> Result<Option<i64>> {
        self.window.as_deref().map(parse_window).transpose()
    }
}

/// Only a case-insensitive `"true"` selects completed todos; any other value
/// selects the open ones.
pub fn parse_completed(raw: &str) -> bool {
    raw.eq_ignore_ascii_case("true")
}

/// Parses a window size in whole days. Negative windows are allowed.
pub fn parse_window(raw: &str) -> Result<i64> {
    raw.trim().parse().map_err(|_| {
        ServerError::BadRequest(format!(
            "window must be a whole number of days, got {raw:?}"
        ))
    })
}

pub fn window_cutoff(now: NaiveDateTime, days: i64) -> Result<NaiveDateTime> {
    TimeDelta::try_days(days)
        .and_then(|delta| now.checked_add_signed(delta))
        .ok_or_else(|| ServerError::BadRequest(format!("window of {days} days is out of range")))
}

/// Keeps the todos due at or before `cutoff`, in their original order.
/// Todos without a deadline are always kept.
pub fn within_window(todos: Vec<Todo>, cutoff: NaiveDateTime) -> Vec<Todo> {
    todos
        .into_iter()
        .filter(|todo| todo.deadline_at.map_or(true, |deadline| deadline <= cutoff))
        .collect()
}

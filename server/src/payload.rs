//! Validation and decoding of create/update request bodies.
//!
//! Bodies are taken as raw JSON objects so unknown keys can be reported by
//! name before anything is decoded. Decoding keeps "absent" apart from
//! "explicitly null", which is what lets an update clear a description
//! without touching the other fields.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{de, Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::error::{Result, ServerError};
use crate::todo::{NewTodo, Todo, TodoId};

/// Keys a create or update body may carry.
pub const ALLOWED_FIELDS: [&str; 4] = ["title", "description", "completed", "deadline_at"];

const TIMESTAMP_FORMATS: [&str; 6] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Rejects a body carrying any key outside [`ALLOWED_FIELDS`], naming all of
/// them in sorted order.
pub fn check_fields(body: &Map<String, Value>) -> Result<()> {
    let mut unexpected: Vec<String> = body
        .keys()
        .filter(|key| !ALLOWED_FIELDS.contains(&key.as_str()))
        .cloned()
        .collect();
    unexpected.sort();

    if unexpected.is_empty() {
        Ok(())
    } else {
        Err(ServerError::UnexpectedFields(unexpected))
    }
}

/// Rejects a body whose `id`, when present, differs from the id in the path.
pub fn check_path_id(body: &Map<String, Value>, id: TodoId) -> Result<()> {
    match body.get("id") {
        Some(value) if value.as_i64() != Some(id) => Err(ServerError::IdMismatch),
        _ => Ok(()),
    }
}

/// Parses an ISO-8601 timestamp into a naive date-time.
///
/// Accepts `T` or space separators, optional seconds and fraction, a bare
/// date (midnight), and RFC 3339 with an offset, which is normalized to UTC.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.naive_utc())
        })
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

/// Fields supplied in a create or update body.
///
/// The outer `Option` is `None` when the key is absent; `Some(None)` means
/// the key was sent as `null`. A null `completed` counts as absent.
#[derive(Debug, Default, PartialEq, Eq, Deserialize)]
pub struct TodoPatch {
    #[serde(default, deserialize_with = "present")]
    pub title: Option<Option<String>>,

    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,

    #[serde(default)]
    pub completed: Option<bool>,

    #[serde(default, deserialize_with = "present_timestamp")]
    pub deadline_at: Option<Option<NaiveDateTime>>,
}

impl TodoPatch {
    /// Decodes the allowed fields of a body. Callers run [`check_fields`]
    /// first; keys outside the allowed set are ignored here.
    pub fn decode(body: Map<String, Value>) -> Result<Self> {
        serde_json::from_value(Value::Object(body))
            .map_err(|e| ServerError::BadRequest(e.to_string()))
    }

    /// Builds a new todo, requiring a non-null title.
    pub fn into_new_todo(self) -> Result<NewTodo> {
        let title = self.title.flatten().ok_or(ServerError::MissingTitle)?;
        Ok(NewTodo {
            title,
            description: self.description.flatten(),
            completed: self.completed.unwrap_or(false),
            deadline_at: self.deadline_at.flatten(),
        })
    }

    /// Overwrites each field present in the patch. A `null` title is
    /// rejected; a `null` description or deadline clears it.
    pub fn apply_to(self, todo: &mut Todo) -> Result<()> {
        if let Some(title) = self.title {
            todo.title = title.ok_or(ServerError::MissingTitle)?;
        }
        if let Some(description) = self.description {
            todo.description = description;
        }
        if let Some(completed) = self.completed {
            todo.completed = completed;
        }
        if let Some(deadline_at) = self.deadline_at {
            todo.deadline_at = deadline_at;
        }
        Ok(())
    }
}

fn present<'de, D, T>(deserializer: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn present_timestamp<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<Option<NaiveDateTime>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(Some(None));
    };
    parse_timestamp(&raw)
        .map(|deadline| Some(Some(deadline)))
        .ok_or_else(|| {
            de::Error::custom(format!(
                "deadline_at is not an ISO-8601 timestamp: {raw:?}"
            ))
        })
}

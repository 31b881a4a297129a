//! HTTP handlers for the todo routes.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use serde_json::{json, Map, Value};

use crate::error::{Result, ServerError};
use crate::filter::{window_cutoff, within_window, ListQuery};
use crate::payload::{check_fields, check_path_id, TodoPatch};
use crate::state::AppState;
use crate::todo::{local_now, Todo, TodoId};

/// GET /health
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// GET /todos?completed=&window=
pub async fn list_todos(
    State(state): State<AppState>,
    query: std::result::Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<Vec<Todo>>> {
    let Query(query) = query?;
    let window = query.window_days()?;

    let todos = state.store.query(query.store_filter())?;
    let todos = match window {
        Some(days) => within_window(todos, window_cutoff(local_now(), days)?),
        None => todos,
    };

    tracing::debug!(count = todos.len(), ?window, "listed todos");
    Ok(Json(todos))
}

/// GET /todos/{id}
pub async fn get_todo(
    State(state): State<AppState>,
    id: std::result::Result<Path<TodoId>, PathRejection>,
) -> Result<Json<Todo>> {
    let Path(id) = id?;
    state
        .store
        .get(id)?
        .map(Json)
        .ok_or(ServerError::NotFound)
}

/// POST /todos
///
/// Every check runs before the store is touched.
pub async fn create_todo(
    State(state): State<AppState>,
    body: std::result::Result<Json<Map<String, Value>>, JsonRejection>,
) -> Result<(StatusCode, Json<Todo>)> {
    let Json(body) = body?;
    check_fields(&body)?;
    let new_todo = TodoPatch::decode(body)?.into_new_todo()?;

    let todo = state.store.insert(new_todo)?;
    tracing::info!(id = todo.id, "created todo");
    Ok((StatusCode::CREATED, Json(todo)))
}

/// PUT /todos/{id}
pub async fn update_todo(
    State(state): State<AppState>,
    id: std::result::Result<Path<TodoId>, PathRejection>,
    body: std::result::Result<Json<Map<String, Value>>, JsonRejection>,
) -> Result<Json<Todo>> {
    let Path(id) = id?;
    let Json(body) = body?;
    check_fields(&body)?;

    let mut todo = state.store.get(id)?.ok_or(ServerError::NotFound)?;
    check_path_id(&body, id)?;
    TodoPatch::decode(body)?.apply_to(&mut todo)?;

    let todo = state.store.update(todo)?;
    tracing::info!(id, "updated todo");
    Ok(Json(todo))
}

/// DELETE /todos/{id}
///
/// Deleting an unknown id succeeds with `{}`; otherwise the response is the
/// record as it was just before removal.
pub async fn delete_todo(
    State(state): State<AppState>,
    id: std::result::Result<Path<TodoId>, PathRejection>,
) -> Result<Json<Value>> {
    let Path(id) = id?;
    let Some(existing) = state.store.get(id)? else {
        return Ok(Json(json!({})));
    };

    // A concurrent delete may win the race; report what we saw either way.
    let removed = state.store.delete(id)?.unwrap_or(existing);
    tracing::info!(id, "deleted todo");
    Ok(Json(json!(removed)))
}

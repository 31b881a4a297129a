//! Stateless HTTP request builder and response parser for the todo API.
//!
//! `TodoClient` holds only a `base_url`. Each operation has a `build_*`
//! method producing an `HttpRequest` and a `parse_*` method consuming the
//! matching `HttpResponse`.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Health, ListQuery, NewTodo, Todo, TodoPatch};

/// Synchronous, stateless client for the todo API.
#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: String,
}

impl TodoClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn build_health(&self) -> HttpRequest {
        self.bodiless(HttpMethod::Get, "/health".to_string())
    }

    pub fn build_list_todos(&self, query: &ListQuery) -> HttpRequest {
        self.bodiless(
            HttpMethod::Get,
            format!("/todos{}", query.to_query_string()),
        )
    }

    pub fn build_get_todo(&self, id: i64) -> HttpRequest {
        self.bodiless(HttpMethod::Get, format!("/todos/{id}"))
    }

    pub fn build_create_todo(&self, input: &NewTodo) -> Result<HttpRequest, ApiError> {
        self.with_json(HttpMethod::Post, "/todos".to_string(), input)
    }

    pub fn build_update_todo(&self, id: i64, patch: &TodoPatch) -> Result<HttpRequest, ApiError> {
        self.with_json(HttpMethod::Put, format!("/todos/{id}"), patch)
    }

    pub fn build_delete_todo(&self, id: i64) -> HttpRequest {
        self.bodiless(HttpMethod::Delete, format!("/todos/{id}"))
    }

    pub fn parse_health(&self, response: HttpResponse) -> Result<Health, ApiError> {
        check_status(&response, 200)?;
        decode(&response.body)
    }

    pub fn parse_list_todos(&self, response: HttpResponse) -> Result<Vec<Todo>, ApiError> {
        check_status(&response, 200)?;
        decode(&response.body)
    }

    pub fn parse_get_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        check_status(&response, 200)?;
        decode(&response.body)
    }

    pub fn parse_create_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        check_status(&response, 201)?;
        decode(&response.body)
    }

    pub fn parse_update_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        check_status(&response, 200)?;
        decode(&response.body)
    }

    /// Returns the removed todo, or `None` when nothing existed under the id
    /// (the server answers `{}` in that case).
    pub fn parse_delete_todo(&self, response: HttpResponse) -> Result<Option<Todo>, ApiError> {
        check_status(&response, 200)?;
        let body: serde_json::Value = decode(&response.body)?;
        if body.as_object().is_some_and(|fields| fields.is_empty()) {
            return Ok(None);
        }
        serde_json::from_value(body)
            .map(Some)
            .map_err(|e| ApiError::DeserializationError(e.to_string()))
    }

    fn bodiless(&self, method: HttpMethod, path: String) -> HttpRequest {
        HttpRequest {
            method,
            path: format!("{}{path}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    fn with_json<T: Serialize>(
        &self,
        method: HttpMethod,
        path: String,
        payload: &T,
    ) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(payload)
            .map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            method,
            path: format!("{}{path}", self.base_url),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    match response.status {
        status if status == expected => Ok(()),
        404 => Err(ApiError::NotFound),
        400 => Err(ApiError::BadRequest {
            message: error_message(&response.body).unwrap_or_else(|| response.body.clone()),
        }),
        status => Err(ApiError::HttpError {
            status,
            body: response.body.clone(),
        }),
    }
}

fn error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value.get("error")?.as_str().map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const TODO_JSON: &str = r#"{"id":1,"title":"Test","description":null,"completed":false,"deadline_at":"2023-02-27T00:00:00","created_at":"2023-02-20T00:00:00","updated_at":"2023-02-20T00:00:00"}"#;

    fn client() -> TodoClient {
        TodoClient::new("http://localhost:3000/api/v1")
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    #[test]
    fn build_list_todos_without_filters() {
        let req = client().build_list_todos(&ListQuery::default());
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:3000/api/v1/todos");
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn build_list_todos_with_filters() {
        let query = ListQuery {
            completed: Some(true),
            window: Some(3),
        };
        let req = client().build_list_todos(&query);
        assert_eq!(
            req.path,
            "http://localhost:3000/api/v1/todos?completed=true&window=3"
        );

        let query = ListQuery {
            completed: None,
            window: Some(-1),
        };
        let req = client().build_list_todos(&query);
        assert_eq!(req.path, "http://localhost:3000/api/v1/todos?window=-1");
    }

    #[test]
    fn build_get_todo_produces_correct_request() {
        let req = client().build_get_todo(7);
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:3000/api/v1/todos/7");
        assert!(req.body.is_none());
    }

    #[test]
    fn build_create_todo_omits_unset_optionals() {
        let req = client().build_create_todo(&NewTodo::new("Buy milk")).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:3000/api/v1/todos");
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({"title": "Buy milk", "completed": false}));
    }

    #[test]
    fn build_create_todo_serializes_deadline() {
        let input = NewTodo {
            deadline_at: NaiveDate::from_ymd_opt(2023, 2, 27)
                .unwrap()
                .and_hms_opt(0, 0, 0),
            ..NewTodo::new("Lecture")
        };
        let req = client().build_create_todo(&input).unwrap();
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["deadline_at"], "2023-02-27T00:00:00");
    }

    #[test]
    fn build_update_todo_sends_only_set_fields() {
        let patch = TodoPatch {
            completed: Some(true),
            description: Some(None),
            ..TodoPatch::default()
        };
        let req = client().build_update_todo(3, &patch).unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.path, "http://localhost:3000/api/v1/todos/3");
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({"completed": true, "description": null}));
    }

    #[test]
    fn build_delete_todo_produces_correct_request() {
        let req = client().build_delete_todo(3);
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.method.as_str(), "DELETE");
        assert!(req.body.is_none());
    }

    #[test]
    fn parse_health_success() {
        let health = client().parse_health(response(200, r#"{"status":"ok"}"#)).unwrap();
        assert_eq!(health.status, "ok");
    }

    #[test]
    fn parse_list_todos_success() {
        let todos = client()
            .parse_list_todos(response(200, &format!("[{TODO_JSON}]")))
            .unwrap();
        assert_eq!(todos.len(), 1);
        assert_eq!(todos[0].title, "Test");
        assert!(todos[0].deadline_at.is_some());
    }

    #[test]
    fn parse_get_todo_not_found() {
        let err = client()
            .parse_get_todo(response(404, r#"{"error":"Todo not found"}"#))
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn parse_create_todo_success() {
        let todo = client().parse_create_todo(response(201, TODO_JSON)).unwrap();
        assert_eq!(todo.id, 1);
        assert!(todo.description.is_none());
    }

    #[test]
    fn parse_create_todo_bad_request_carries_message() {
        let err = client()
            .parse_create_todo(response(400, r#"{"error":"Todo title is required"}"#))
            .unwrap_err();
        match err {
            ApiError::BadRequest { message } => assert_eq!(message, "Todo title is required"),
            other => panic!("expected bad request, got {other:?}"),
        }
    }

    #[test]
    fn parse_create_todo_wrong_status() {
        let err = client()
            .parse_create_todo(response(500, "internal error"))
            .unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 500, .. }));
    }

    #[test]
    fn parse_update_todo_success() {
        let todo = client().parse_update_todo(response(200, TODO_JSON)).unwrap();
        assert_eq!(todo.title, "Test");
    }

    #[test]
    fn parse_delete_todo_returns_removed_item() {
        let removed = client()
            .parse_delete_todo(response(200, TODO_JSON))
            .unwrap()
            .unwrap();
        assert_eq!(removed.id, 1);
    }

    #[test]
    fn parse_delete_todo_empty_object_is_none() {
        let removed = client().parse_delete_todo(response(200, "{}")).unwrap();
        assert!(removed.is_none());
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = TodoClient::new("http://localhost:3000/api/v1/");
        let req = client.build_health();
        assert_eq!(req.path, "http://localhost:3000/api/v1/health");
    }

    #[test]
    fn parse_list_todos_bad_json() {
        let err = client()
            .parse_list_todos(response(200, "not json"))
            .unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }
}

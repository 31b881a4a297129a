//! Error type returned by every handler.
//!
//! Each variant renders as `{"error": "<message>"}`. Client mistakes map to
//! 400/404 with the variant's message; store failures map to 500 and only
//! the log line carries the detail.

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::store::StoreError;

pub type Result<T> = std::result::Result<T, ServerError>;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Todo not found")]
    NotFound,

    #[error("Unexpected fields provided: {}", .0.join(", "))]
    UnexpectedFields(Vec<String>),

    #[error("Todo title is required")]
    MissingTitle,

    #[error("Todo id does not match")]
    IdMismatch,

    /// Input that could not be parsed: body, path id, query or field values.
    #[error("{0}")]
    BadRequest(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::NotFound => StatusCode::NOT_FOUND,
            ServerError::UnexpectedFields(_)
            | ServerError::MissingTitle
            | ServerError::IdMismatch
            | ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ServerError {
    fn from(rejection: JsonRejection) -> Self {
        ServerError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ServerError {
    fn from(rejection: PathRejection) -> Self {
        ServerError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ServerError {
    fn from(rejection: QueryRejection) -> Self {
        ServerError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            ServerError::Store(ref e) => {
                tracing::error!("Store error: {:?}", e);
                "Internal server error".to_string()
            }
            ref other => {
                tracing::debug!(%status, "rejected request: {}", other);
                other.to_string()
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unexpected_fields_lists_every_key() {
        let err = ServerError::UnexpectedFields(vec!["id".to_string(), "owner".to_string()]);
        assert_eq!(err.to_string(), "Unexpected fields provided: id, owner");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn not_found_message_matches_wire_format() {
        assert_eq!(ServerError::NotFound.to_string(), "Todo not found");
        assert_eq!(ServerError::NotFound.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn store_failures_are_internal_errors() {
        let err = ServerError::from(StoreError::Unavailable("poisoned".to_string()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

//! Error types for the todo API client.
//!
//! 404 and 400 get dedicated variants; the server reports both with an
//! `{"error": ...}` body and callers usually branch on them. Other non-2xx
//! responses land in `HttpError` with the raw status and body.

use thiserror::Error;

/// Errors returned by `TodoClient` build and parse methods.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("resource not found")]
    NotFound,

    /// The server rejected the request as invalid.
    #[error("bad request: {message}")]
    BadRequest { message: String },

    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    #[error("serialization failed: {0}")]
    SerializationError(String),
}

//! Synchronous API client core for the todo service.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). The caller executes the
//! round-trip, which keeps the core deterministic and testable.
//!
//! # Design
//! - `TodoClient` holds only `base_url`, which includes the route prefix
//!   (e.g. `http://localhost:3000/api/v1`).
//! - Each operation is split into `build_*` and `parse_*`.
//! - DTOs are defined independently from the server crate.

pub mod client;
pub mod error;
pub mod http;
pub mod types;

pub use client::TodoClient;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use types::{Health, ListQuery, NewTodo, Todo, TodoPatch};

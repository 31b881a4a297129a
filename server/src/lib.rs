//! HTTP service managing todo items.
//!
//! # Overview
//! A stateless handler set in front of a [`TodoStore`]. Requests go through
//! field/parameter validation, then a single store call, then JSON
//! serialization. The store is injected through router state, so tests and
//! the binary each pick their own backing store.
//!
//! # Routes
//! All routes sit under a configurable prefix (default `/api/v1`):
//! `GET /health`, `GET|POST /todos`, `GET|PUT|DELETE /todos/{id}`.

use std::{future::Future, sync::Arc};

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod config;
pub mod error;
pub mod filter;
pub mod payload;
pub mod state;
pub mod store;
pub mod todo;

pub use config::{ServerConfig, DEFAULT_PREFIX};
pub use error::ServerError;
pub use state::AppState;
pub use store::{InMemoryStore, StoreError, TodoFilter, TodoStore};
pub use todo::{NewTodo, Todo, TodoId};

/// Router over a fresh in-memory store under [`DEFAULT_PREFIX`].
pub fn app() -> Router {
    router(Arc::new(InMemoryStore::new()), DEFAULT_PREFIX)
}

/// Router over `store`, nested under `prefix`. An empty or `/` prefix
/// serves the routes from the root.
pub fn router(store: Arc<dyn TodoStore>, prefix: &str) -> Router {
    let routes = Router::new()
        .route("/health", get(api::health))
        .route("/todos", get(api::list_todos).post(api::create_todo))
        .route(
            "/todos/{id}",
            get(api::get_todo)
                .put(api::update_todo)
                .delete(api::delete_todo),
        )
        .with_state(AppState::new(store));

    let prefix = prefix.trim_end_matches('/');
    let app = if prefix.is_empty() {
        routes
    } else {
        Router::new().nest(prefix, routes)
    };

    app.layer(TraceLayer::new_for_http())
}

/// Serves [`app`] on `listener` until the process exits.
pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    serve(listener, app(), std::future::pending()).await
}

/// Serves `app` on `listener`, draining in-flight requests once `shutdown`
/// completes.
pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> Result<(), std::io::Error>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
}

//! Shared application state.

use std::sync::Arc;

use crate::store::TodoStore;

/// State handed to every handler. Cloning shares the same store.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TodoStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn TodoStore>) -> Self {
        Self { store }
    }
}

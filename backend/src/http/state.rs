//! Application state for the HTTP server.

use std::sync::Arc;

use crate::db::repository::DocumentRepository;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Document store, built once at startup
    pub repository: Arc<dyn DocumentRepository>,
}

impl AppState {
    /// Create a new application state with the given repository.
    pub fn new(repository: Arc<dyn DocumentRepository>) -> Self {
        Self { repository }
    }
}

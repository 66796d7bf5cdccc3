//! Application state for the HTTP server.

use std::sync::Arc;

use crate::auth::AuthService;
use crate::db::repository::FullRepository;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Repository instance for data operations
    pub repository: Arc<dyn FullRepository>,
    /// Authentication service backing the session endpoints
    pub auth: AuthService,
}

impl AppState {
    /// Create a new application state with the given repository and auth service.
    pub fn new(repository: Arc<dyn FullRepository>, auth: AuthService) -> Self {
        Self { repository, auth }
    }
}

//! Application state shared by all handlers.

use std::sync::Arc;

use crate::infra::Database;
use crate::services::UserService;

/// Application state containing the injected services.
#[derive(Clone)]
pub struct AppState {
    /// User service
    pub user_service: Arc<dyn UserService>,
    /// Database handle used by the health check; absent when the
    /// store is not database-backed.
    pub database: Option<Arc<Database>>,
}

impl AppState {
    /// Create application state around a user service.
    pub fn new(user_service: Arc<dyn UserService>) -> Self {
        Self {
            user_service,
            database: None,
        }
    }

    /// Attach the database so `/health` can report connectivity.
    pub fn with_database(mut self, database: Arc<Database>) -> Self {
        self.database = Some(database);
        self
    }
}

/// HTTP API Layer
///
/// Request/response boundary consumed by the local UI. It handles:
/// - Project list / create / get
/// - Read-only database inspection for the table viewer

// Project endpoints (GET/POST)
pub mod projects;

// Database inspector endpoints (GET only)
pub mod database;

// Error-to-response mapping shared by all handlers
pub mod error;

use crate::{inspector::TableInspector, project::ProjectStore};

pub use database::create_database_routes;
pub use error::ApiError;
pub use projects::create_project_routes;

/// Application state shared by all handlers
#[derive(Debug, Clone)]
pub struct AppState {
    /// Project store (owns the connection pool)
    pub store: ProjectStore,
    /// Inspector over the same database
    pub inspector: TableInspector,
}

impl AppState {
    pub fn new(store: ProjectStore) -> Self {
        let inspector = store.inspector();
        Self { store, inspector }
    }
}

/// Presentation builder project store
///
/// Local SQLite-backed storage for presentation builder projects: startup schema
/// reconciliation, project CRUD, and a read-only inspector over every table,
/// served to the desktop UI through a small local HTTP API.

// Core configuration and setup
pub mod config;

// Error taxonomy shared by the store and the inspector
pub mod error;

// Dynamic SQLite row <-> JSON conversion
pub mod record;

// Project store - schema reconciliation and CRUD over the projects table
pub mod project;

// Generic table inspector - read-only introspection of any user table
pub mod inspector;

// HTTP API layer - request/response boundary for the UI
pub mod api;

// Server setup and initialization
pub mod server;

// Re-export commonly used types for external consumers
pub use error::{StoreError, StoreResult};
pub use inspector::TableInspector;
pub use project::{MigrationOutcome, Project, ProjectStore, ProjectType};
pub use server::{create_app, start_server};

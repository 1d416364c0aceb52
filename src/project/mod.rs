/// Project management module
///
/// Owns the `projects` table: schema reconciliation at startup and the
/// create / list / get operations the UI layer calls.

pub mod schema;
pub mod store;
pub mod types;

pub use schema::MigrationOutcome;
pub use store::ProjectStore;
pub use types::{NewProject, Project, ProjectType};

/// Project store backed by a single SQLite database file
///
/// Opens the database with one connection, reconciles the `projects` schema,
/// then serves create / list / get. The same connection pool is shared with
/// the table inspector.

use crate::error::{StoreError, StoreResult};
use crate::inspector::TableInspector;
use crate::project::schema::{self, MigrationOutcome};
use crate::project::types::Project;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;

const SELECT_PROJECT: &str = r#"
    SELECT id, name, type,
           COALESCE(description, '') AS description,
           CAST(COALESCE(created_at, '') AS TEXT) AS created_at,
           CAST(COALESCE(updated_at, '') AS TEXT) AS updated_at
    FROM projects
    WHERE id = ?
"#;

const SELECT_PROJECTS: &str = r#"
    SELECT id, name, type,
           COALESCE(description, '') AS description,
           CAST(COALESCE(created_at, '') AS TEXT) AS created_at,
           CAST(COALESCE(updated_at, '') AS TEXT) AS updated_at
    FROM projects
    ORDER BY projects.created_at DESC
"#;

const INSERT_PROJECT: &str = r#"
    INSERT INTO projects (name, type, description, created_at, updated_at)
    VALUES (?, ?, ?, datetime('now'), datetime('now'))
"#;

/// Connection options for a database file, created if missing
pub fn connect_options(path: &Path) -> SqliteConnectOptions {
    SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
}

/// Single-connection pool: all work is serialized on one connection
pub(crate) async fn open_pool(options: SqliteConnectOptions) -> sqlx::Result<SqlitePool> {
    SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
}

/// Explicitly constructed store; pass it to whatever layer needs it
#[derive(Debug, Clone)]
pub struct ProjectStore {
    pool: SqlitePool,
    migration: MigrationOutcome,
}

impl ProjectStore {
    /// Open (or create) the database file at `path` and reconcile the schema
    pub async fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        tracing::info!("🗄️ Opening project database: {}", path.display());

        Self::connect(connect_options(path)).await
    }

    /// Connect with explicit options and reconcile the schema
    pub async fn connect(options: SqliteConnectOptions) -> StoreResult<Self> {
        let pool = open_pool(options).await?;
        let migration = schema::reconcile(&pool).await?;

        tracing::info!("✅ Project database initialized ({})", migration);

        Ok(Self { pool, migration })
    }

    /// Which reconciliation path ran when this store was opened
    pub fn migration(&self) -> MigrationOutcome {
        self.migration
    }

    /// Underlying connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Read-only inspector over the same database
    pub fn inspector(&self) -> TableInspector {
        TableInspector::new(self.pool.clone())
    }

    /// Insert a project and return the stored row
    ///
    /// `kind` is passed through untouched; the CHECK constraint rejects anything
    /// other than `document` or `slides`.
    pub async fn create_project(
        &self,
        name: &str,
        kind: &str,
        description: Option<&str>,
    ) -> StoreResult<Project> {
        if name.trim().is_empty() {
            return Err(StoreError::Validation("project name must not be empty".to_string()));
        }

        let result = sqlx::query(INSERT_PROJECT)
            .bind(name)
            .bind(kind)
            .bind(description.unwrap_or(""))
            .execute(&self.pool)
            .await?;

        let id = result.last_insert_rowid();
        tracing::info!("📝 Created project {} ({}, {})", id, name, kind);

        self.get_project(id)
            .await?
            .ok_or(StoreError::Database(sqlx::Error::RowNotFound))
    }

    /// All projects, most recently created first
    pub async fn list_projects(&self) -> StoreResult<Vec<Project>> {
        let projects = sqlx::query_as::<_, Project>(SELECT_PROJECTS)
            .fetch_all(&self.pool)
            .await?;
        Ok(projects)
    }

    /// Project by id; `None` when no such row exists
    pub async fn get_project(&self, id: i64) -> StoreResult<Option<Project>> {
        let project = sqlx::query_as::<_, Project>(SELECT_PROJECT)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(project)
    }

    /// Close the connection pool
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("🔒 Project database closed");
    }
}

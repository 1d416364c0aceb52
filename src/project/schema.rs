/// Startup schema reconciliation for the `projects` table
///
/// Brings whatever table is on disk to the canonical shape:
/// - no table: create the minimal original shape, then add `type`
/// - only `type` missing: add it in place with ALTER TABLE
/// - unknown/obsolete columns or other expected columns missing: back up rows,
///   drop, recreate canonical, restore rows with defaults
/// - backup unreadable: drop and recreate empty
///
/// Everything runs inside one transaction.

use crate::error::StoreResult;
use crate::record::{bind_or, present, row_to_record, Record};
use serde::Serialize;
use sqlx::{sqlite::SqlitePool, SqliteConnection};
use std::collections::HashSet;
use std::fmt;

/// Columns of the canonical `projects` table
pub const EXPECTED_COLUMNS: [&str; 6] = ["id", "name", "type", "description", "created_at", "updated_at"];

/// Columns from earlier releases known to be incompatible
const OBSOLETE_COLUMNS: [&str; 1] = ["template_id"];

/// Format produced by SQLite's `datetime('now')`
pub(crate) const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const CREATE_MINIMAL_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS projects (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        description TEXT,
        created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
        updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
    )
"#;

const CREATE_CANONICAL_TABLE: &str = r#"
    CREATE TABLE projects (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        type TEXT NOT NULL DEFAULT 'document' CHECK(type IN ('document', 'slides')),
        description TEXT,
        created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
        updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
    )
"#;

const ADD_TYPE_COLUMN: &str = r#"
    ALTER TABLE projects
    ADD COLUMN type TEXT NOT NULL DEFAULT 'document'
    CHECK(type IN ('document', 'slides'))
"#;

const RESTORE_ROW: &str = r#"
    INSERT INTO projects (id, name, type, description, created_at, updated_at)
    VALUES (?, ?, ?, ?, ?, ?)
"#;

/// Which reconciliation path ran
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum MigrationOutcome {
    /// Table already had the canonical shape
    Canonical,
    /// `type` column added in place
    ColumnAdded,
    /// Table rebuilt; `dropped` rows could not be restored
    Reconstructed { restored: usize, dropped: usize },
    /// Backup failed, table recreated empty
    Reset { data_lost: bool },
}

impl fmt::Display for MigrationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MigrationOutcome::Canonical => write!(f, "schema already canonical"),
            MigrationOutcome::ColumnAdded => write!(f, "type column added"),
            MigrationOutcome::Reconstructed { restored, dropped } => {
                write!(f, "table reconstructed, {} rows restored, {} dropped", restored, dropped)
            }
            MigrationOutcome::Reset { .. } => write!(f, "table reset without data restoration"),
        }
    }
}

/// Shape of the on-disk table relative to the canonical one
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SchemaState {
    Canonical,
    MissingType,
    Incompatible { reason: String },
}

/// Classify a table by its column names
pub(crate) fn classify(columns: &[String]) -> SchemaState {
    if let Some(col) = columns.iter().find(|c| OBSOLETE_COLUMNS.contains(&c.as_str())) {
        return SchemaState::Incompatible { reason: format!("obsolete column '{}'", col) };
    }
    if let Some(col) = columns.iter().find(|c| !EXPECTED_COLUMNS.contains(&c.as_str())) {
        return SchemaState::Incompatible { reason: format!("unexpected column '{}'", col) };
    }

    let has = |name: &str| columns.iter().any(|c| c == name);
    if let Some(col) = EXPECTED_COLUMNS.iter().find(|c| **c != "type" && !has(**c)) {
        return SchemaState::Incompatible { reason: format!("missing column '{}'", col) };
    }

    if has("type") {
        SchemaState::Canonical
    } else {
        SchemaState::MissingType
    }
}

/// Reconcile the `projects` table with the canonical schema
///
/// Idempotent: once a pass has succeeded, later passes return `Canonical`.
pub async fn reconcile(pool: &SqlitePool) -> StoreResult<MigrationOutcome> {
    let mut tx = pool.begin().await?;

    sqlx::query(CREATE_MINIMAL_TABLE).execute(&mut *tx).await?;

    let columns = table_columns(&mut tx).await?;
    tracing::debug!("📋 projects columns on disk: {:?}", columns);

    let outcome = match classify(&columns) {
        SchemaState::Canonical => MigrationOutcome::Canonical,
        SchemaState::MissingType => {
            tracing::info!("🔧 Running migration: adding type column to projects table");
            sqlx::query(ADD_TYPE_COLUMN).execute(&mut *tx).await?;
            MigrationOutcome::ColumnAdded
        }
        SchemaState::Incompatible { reason } => {
            tracing::info!("🔧 Detected incompatible projects schema ({}), recreating table", reason);
            reconstruct(&mut tx).await?
        }
    };

    tx.commit().await?;

    Ok(outcome)
}

async fn table_columns(conn: &mut SqliteConnection) -> StoreResult<Vec<String>> {
    let columns: Vec<String> = sqlx::query_scalar("SELECT name FROM pragma_table_info('projects') ORDER BY cid")
        .fetch_all(conn)
        .await?;
    Ok(columns)
}

async fn read_backup(conn: &mut SqliteConnection) -> Result<Vec<Record>, sqlx::Error> {
    let rows = sqlx::query("SELECT * FROM projects").fetch_all(conn).await?;
    rows.iter().map(row_to_record).collect()
}

async fn recreate_table(conn: &mut SqliteConnection) -> StoreResult<()> {
    sqlx::query("DROP TABLE IF EXISTS projects").execute(&mut *conn).await?;
    sqlx::query(CREATE_CANONICAL_TABLE).execute(&mut *conn).await?;
    Ok(())
}

async fn reconstruct(conn: &mut SqliteConnection) -> StoreResult<MigrationOutcome> {
    let backup = match read_backup(conn).await {
        Ok(rows) => rows,
        Err(e) => {
            tracing::warn!("⚠️ Could not back up projects rows, recreating empty table: {}", e);
            recreate_table(conn).await?;
            return Ok(MigrationOutcome::Reset { data_lost: true });
        }
    };

    recreate_table(conn).await?;

    let now = chrono::Utc::now().format(TIMESTAMP_FORMAT).to_string();
    let (mut restored, mut dropped) = (0, 0);

    for (id, record) in plan_restore(&backup) {
        match restore_row(conn, record, id, &now).await {
            Ok(()) => restored += 1,
            Err(e) => {
                tracing::warn!("⚠️ Could not restore row {:?}: {}", record, e);
                dropped += 1;
            }
        }
    }

    tracing::info!("✅ Projects table recreated: {} restored, {} dropped", restored, dropped);

    Ok(MigrationOutcome::Reconstructed { restored, dropped })
}

/// Decide the id each backed-up row is restored under
///
/// An integer id is kept unless an earlier row already claimed it; every other
/// row gets `None` (a fresh id). Rows keeping their id come first so fresh ids,
/// assigned above the largest kept one, never collide with them.
pub(crate) fn plan_restore(backup: &[Record]) -> Vec<(Option<i64>, &Record)> {
    let mut seen_ids = HashSet::new();
    let (kept, fresh): (Vec<_>, Vec<_>) = backup
        .iter()
        .map(|record| {
            let id = record
                .get("id")
                .and_then(|v| v.as_i64())
                .filter(|id| seen_ids.insert(*id));
            (id, record)
        })
        .partition(|(id, _)| id.is_some());

    kept.into_iter().chain(fresh).collect()
}

/// Re-insert one backed-up row, substituting defaults for absent fields
async fn restore_row(
    conn: &mut SqliteConnection,
    record: &Record,
    id: Option<i64>,
    now: &str,
) -> Result<(), sqlx::Error> {
    let query = sqlx::query(RESTORE_ROW).bind(id);
    let query = bind_or(query, present(record, "name"), "Untitled");
    let query = bind_or(query, present(record, "type"), "document");
    let query = bind_or(query, present(record, "description"), "");
    let query = bind_or(query, present(record, "created_at"), now);
    let query = bind_or(query, present(record, "updated_at"), now);

    query.execute(conn).await?;
    Ok(())
}

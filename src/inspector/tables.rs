/// Read-only introspection over the user tables of the project database
///
/// Every operation that takes a table name first checks it against a freshly
/// fetched table list, then embeds it as a quoted identifier. Names that do not
/// exist in the database never reach the SQL text.

use crate::error::{StoreError, StoreResult};
use crate::inspector::types::{ColumnDescriptor, TableInfo, TableSnapshot, TableStats};
use crate::record::{row_to_record, Record};
use sqlx::{sqlite::SqlitePool, Row};

const LIST_TABLES: &str = r#"
    SELECT name FROM sqlite_master
    WHERE type = 'table' AND name NOT LIKE 'sqlite\_%' ESCAPE '\'
    ORDER BY name
"#;

const TABLE_SCHEMA: &str = r#"
    SELECT cid, name, type, "notnull", dflt_value, pk
    FROM pragma_table_info(?)
    ORDER BY cid
"#;

/// Inspector sharing the store's connection pool
#[derive(Debug, Clone)]
pub struct TableInspector {
    pool: SqlitePool,
}

impl TableInspector {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// User tables sorted by name, internal `sqlite_` tables excluded
    pub async fn list_tables(&self) -> StoreResult<Vec<TableInfo>> {
        let tables = sqlx::query_as::<_, TableInfo>(LIST_TABLES)
            .fetch_all(&self.pool)
            .await?;
        Ok(tables)
    }

    /// Column descriptors in declaration order
    pub async fn get_table_schema(&self, table: &str) -> StoreResult<Vec<ColumnDescriptor>> {
        let table = self.resolve(table).await?;
        self.schema_of(&table).await
    }

    /// All rows, highest `id` first
    ///
    /// Tables without an `id` column fail with a database error.
    pub async fn get_table_data(&self, table: &str) -> StoreResult<Vec<Record>> {
        let table = self.resolve(table).await?;
        self.data_of(&table).await
    }

    pub async fn get_table_stats(&self, table: &str) -> StoreResult<TableStats> {
        let table = self.resolve(table).await?;
        self.stats_of(&table).await
    }

    /// Schema, rows and row count in one call
    pub async fn snapshot(&self, table: &str) -> StoreResult<TableSnapshot> {
        let table = self.resolve(table).await?;

        Ok(TableSnapshot {
            schema: self.schema_of(&table).await?,
            data: self.data_of(&table).await?,
            stats: self.stats_of(&table).await?,
            name: table,
        })
    }

    /// Match a caller-supplied name against the current table list
    async fn resolve(&self, table: &str) -> StoreResult<String> {
        self.list_tables()
            .await?
            .into_iter()
            .map(|t| t.name)
            .find(|name| name == table)
            .ok_or_else(|| {
                tracing::warn!("🚫 Rejected inspector request for unknown table: {}", table);
                StoreError::UnknownTable(table.to_string())
            })
    }

    async fn schema_of(&self, table: &str) -> StoreResult<Vec<ColumnDescriptor>> {
        let rows = sqlx::query(TABLE_SCHEMA)
            .bind(table)
            .fetch_all(&self.pool)
            .await?;

        let mut columns = Vec::with_capacity(rows.len());
        for row in rows {
            columns.push(ColumnDescriptor {
                position: row.try_get("cid")?,
                name: row.try_get("name")?,
                declared_type: row.try_get("type")?,
                not_null: row.try_get::<i64, _>("notnull")? != 0,
                default_value: row.try_get("dflt_value")?,
                is_primary_key: row.try_get::<i64, _>("pk")? > 0,
            });
        }

        Ok(columns)
    }

    async fn data_of(&self, table: &str) -> StoreResult<Vec<Record>> {
        let sql = format!("SELECT * FROM {} ORDER BY id DESC", quote_identifier(table));
        tracing::debug!("📝 SQL Query: {}", sql);

        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        let records = rows.iter().map(row_to_record).collect::<Result<Vec<_>, _>>()?;

        Ok(records)
    }

    async fn stats_of(&self, table: &str) -> StoreResult<TableStats> {
        let sql = format!("SELECT COUNT(*) FROM {}", quote_identifier(table));
        let row_count: i64 = sqlx::query_scalar(&sql).fetch_one(&self.pool).await?;
        Ok(TableStats { row_count })
    }
}

/// SQL identifier quoting: wrap in double quotes, double any embedded quote
fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::ProjectStore;
    use serde_json::json;
    use tempfile::TempDir;

    async fn setup(dir: &TempDir, statements: &[&str]) -> (ProjectStore, TableInspector) {
        let store = ProjectStore::open(dir.path().join("inspect.db")).await.unwrap();
        for sql in statements {
            sqlx::query(sql).execute(store.pool()).await.unwrap();
        }
        let inspector = store.inspector();
        (store, inspector)
    }

    fn names(tables: Vec<TableInfo>) -> Vec<String> {
        tables.into_iter().map(|t| t.name).collect()
    }

    #[test]
    fn quotes_identifiers() {
        assert_eq!(quote_identifier("projects"), "\"projects\"");
        assert_eq!(quote_identifier("a\"b"), "\"a\"\"b\"");
    }

    #[tokio::test]
    async fn lists_user_tables_sorted_without_internal_ones() {
        let dir = TempDir::new().unwrap();
        let (store, inspector) = setup(
            &dir,
            &[
                "CREATE TABLE zeta (id INTEGER PRIMARY KEY AUTOINCREMENT, v TEXT)",
                "CREATE TABLE alpha (id INTEGER PRIMARY KEY, v TEXT)",
                "CREATE TABLE sqliteish (id INTEGER PRIMARY KEY)",
            ],
        )
        .await;
        store.create_project("p", "document", None).await.unwrap();

        let tables = names(inspector.list_tables().await.unwrap());

        assert_eq!(tables, ["alpha", "projects", "sqliteish", "zeta"]);
    }

    #[tokio::test]
    async fn describes_projects_schema() {
        let dir = TempDir::new().unwrap();
        let (_store, inspector) = setup(&dir, &[]).await;

        let schema = inspector.get_table_schema("projects").await.unwrap();
        let by_name = |n: &str| schema.iter().find(|c| c.name == n).unwrap().clone();

        assert_eq!(schema.len(), 6);
        assert_eq!(schema[0].position, 0);
        let id = by_name("id");
        assert!(id.is_primary_key);
        assert_eq!(id.declared_type, "INTEGER");
        assert!(by_name("name").not_null);
        let kind = by_name("type");
        assert!(kind.not_null);
        assert_eq!(kind.default_value.as_deref(), Some("'document'"));
        assert!(!by_name("description").is_primary_key);
    }

    #[tokio::test]
    async fn data_is_newest_id_first_and_matches_stats() {
        let dir = TempDir::new().unwrap();
        let (store, inspector) = setup(
            &dir,
            &[
                "CREATE TABLE notes (id INTEGER PRIMARY KEY, body TEXT, score REAL)",
                "INSERT INTO notes (body, score) VALUES ('one', 1.5), ('two', NULL)",
            ],
        )
        .await;
        store.create_project("A", "document", None).await.unwrap();
        store.create_project("B", "slides", None).await.unwrap();

        let notes = inspector.get_table_data("notes").await.unwrap();
        assert_eq!(
            serde_json::to_value(&notes).unwrap(),
            json!([
                {"id": 2, "body": "two", "score": null},
                {"id": 1, "body": "one", "score": 1.5}
            ])
        );

        for table in names(inspector.list_tables().await.unwrap()) {
            let data = inspector.get_table_data(&table).await.unwrap();
            let stats = inspector.get_table_stats(&table).await.unwrap();
            assert_eq!(stats.row_count as usize, data.len(), "table {table}");
        }
    }

    #[tokio::test]
    async fn unknown_and_injected_names_are_rejected() {
        let dir = TempDir::new().unwrap();
        let (_store, inspector) = setup(&dir, &[]).await;

        for name in ["missing", "projects; DROP TABLE projects", "projects\" --"] {
            let err = inspector.get_table_data(name).await.unwrap_err();
            assert!(matches!(err, StoreError::UnknownTable(_)), "{name}: {err:?}");
            assert!(matches!(
                inspector.get_table_stats(name).await,
                Err(StoreError::UnknownTable(_))
            ));
            assert!(matches!(
                inspector.get_table_schema(name).await,
                Err(StoreError::UnknownTable(_))
            ));
        }

        assert_eq!(names(inspector.list_tables().await.unwrap()), ["projects"]);
    }

    #[tokio::test]
    async fn table_without_id_fails_data_but_not_stats() {
        let dir = TempDir::new().unwrap();
        let (_store, inspector) = setup(
            &dir,
            &[
                "CREATE TABLE settings (name TEXT PRIMARY KEY, val TEXT)",
                "INSERT INTO settings VALUES ('theme', 'dark')",
            ],
        )
        .await;

        assert!(matches!(
            inspector.get_table_data("settings").await,
            Err(StoreError::Database(_))
        ));
        assert_eq!(inspector.get_table_stats("settings").await.unwrap().row_count, 1);
    }

    #[tokio::test]
    async fn handles_names_that_need_quoting() {
        let dir = TempDir::new().unwrap();
        let (_store, inspector) = setup(
            &dir,
            &[
                r#"CREATE TABLE "odd ""name"" table" (id INTEGER PRIMARY KEY, v TEXT)"#,
                r#"INSERT INTO "odd ""name"" table" (v) VALUES ('x')"#,
            ],
        )
        .await;

        let snapshot = inspector.snapshot("odd \"name\" table").await.unwrap();

        assert_eq!(snapshot.name, "odd \"name\" table");
        assert_eq!(snapshot.schema.len(), 2);
        assert_eq!(snapshot.stats.row_count, 1);
        assert_eq!(snapshot.data[0]["v"], "x");
    }
}

/// Inspector response types

use crate::record::Record;
use serde::{Deserialize, Serialize};

/// A user table in the database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct TableInfo {
    pub name: String,
}

/// One column as reported by `pragma_table_info`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDescriptor {
    /// Zero-based column position
    pub position: i64,
    pub name: String,
    /// Type as written in the CREATE TABLE statement, may be empty
    pub declared_type: String,
    pub not_null: bool,
    /// Default expression as SQL text
    pub default_value: Option<String>,
    pub is_primary_key: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableStats {
    pub row_count: i64,
}

/// Schema, rows and stats of one table, fetched together
#[derive(Debug, Clone, Serialize)]
pub struct TableSnapshot {
    pub name: String,
    pub schema: Vec<ColumnDescriptor>,
    pub data: Vec<Record>,
    pub stats: TableStats,
}

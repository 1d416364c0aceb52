/// Dynamic row conversion between SQLite and JSON
///
/// Used wherever rows of an arbitrary table are read without a fixed Rust type:
/// the migration backup and the table inspector.

use serde_json::{Map, Number, Value};
use sqlx::{
    query::Query,
    sqlite::{Sqlite, SqliteRow},
    Column, Database, Row, TypeInfo, ValueRef,
};

/// One row keyed by column name, in column order
pub type Record = Map<String, Value>;

pub(crate) type SqliteQuery<'q> = Query<'q, Sqlite, <Sqlite as Database>::Arguments<'q>>;

/// Convert a row into a JSON object using each value's storage class
///
/// INTEGER -> integer, REAL -> number, TEXT -> string, BLOB -> byte array, NULL -> null.
/// Fails on values that cannot be decoded (e.g. TEXT that is not valid UTF-8).
pub fn row_to_record(row: &SqliteRow) -> Result<Record, sqlx::Error> {
    let mut record = Record::new();

    for column in row.columns() {
        let index = column.ordinal();
        let raw = row.try_get_raw(index)?;

        let value = if raw.is_null() {
            Value::Null
        } else {
            match raw.type_info().name() {
                "INTEGER" => Value::from(row.try_get::<i64, _>(index)?),
                "REAL" => Number::from_f64(row.try_get::<f64, _>(index)?)
                    .map(Value::Number)
                    .unwrap_or(Value::Null),
                "BLOB" => Value::from(row.try_get::<Vec<u8>, _>(index)?),
                _ => Value::from(row.try_get::<String, _>(index)?),
            }
        };

        record.insert(column.name().to_string(), value);
    }

    Ok(record)
}

/// Field value that counts as "present" when restoring legacy rows
///
/// Null, empty strings, zero and false are treated as absent so a default is used instead.
pub(crate) fn present<'a>(record: &'a Record, key: &str) -> Option<&'a Value> {
    record.get(key).filter(|value| match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    })
}

/// Bind a JSON value, or `fallback` when absent
pub(crate) fn bind_or<'q>(query: SqliteQuery<'q>, value: Option<&Value>, fallback: &str) -> SqliteQuery<'q> {
    match value {
        Some(Value::String(s)) => query.bind(s.clone()),
        Some(Value::Number(n)) => match n.as_i64() {
            Some(i) => query.bind(i),
            None => query.bind(n.as_f64()),
        },
        Some(Value::Bool(b)) => query.bind(*b),
        Some(other @ (Value::Array(_) | Value::Object(_))) => query.bind(other.to_string()),
        Some(Value::Null) | None => query.bind(fallback.to_string()),
    }
}

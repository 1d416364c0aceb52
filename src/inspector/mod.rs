/// Generic table inspector
///
/// Read-only introspection over every user table in the project database,
/// for the diagnostic database viewer. Table names are only accepted when they
/// appear in the database's own table list.

pub mod tables;
pub mod types;

pub use tables::TableInspector;
pub use types::{ColumnDescriptor, TableInfo, TableSnapshot, TableStats};

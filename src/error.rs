/// Error taxonomy for the project store and table inspector
///
/// Storage errors coming out of sqlx are classified on conversion so that
/// constraint violations reach callers as their own variant.

use sqlx::error::ErrorKind;

/// Errors surfaced by the store and the inspector
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Input rejected before reaching the database (e.g. empty project name)
    #[error("validation failed: {0}")]
    Validation(String),

    /// A CHECK / NOT NULL / UNIQUE constraint rejected the write
    #[error("constraint violation: {0}")]
    Constraint(String),

    /// Table name is not one of the user tables in the database
    #[error("unknown table: {0}")]
    UnknownTable(String),

    /// Filesystem error while preparing the data directory
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Any other storage-layer error
    #[error("database error: {0}")]
    Database(sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            match db_err.kind() {
                ErrorKind::CheckViolation
                | ErrorKind::NotNullViolation
                | ErrorKind::UniqueViolation
                | ErrorKind::ForeignKeyViolation => {
                    return StoreError::Constraint(db_err.message().to_string());
                }
                _ => {}
            }
        }
        StoreError::Database(err)
    }
}

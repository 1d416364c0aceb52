/// Database inspector REST API endpoints
///
/// Mirrors the UI's `db.getTables`, `db.getTableData`, `db.getTableSchema`
/// and `db.getTableStats` calls. Unknown table names answer 404.

use crate::{
    api::{error::ApiError, AppState},
    inspector::{ColumnDescriptor, TableInfo, TableSnapshot, TableStats},
    record::Record,
};
use axum::{
    extract::{Path, State},
    response::Json,
    routing::get,
    Router,
};

/// Create inspector routes
pub fn create_database_routes() -> Router<AppState> {
    Router::new()
        .route("/api/db/tables", get(list_tables))
        .route("/api/db/tables/{name}", get(table_snapshot))
        .route("/api/db/tables/{name}/data", get(table_data))
        .route("/api/db/tables/{name}/schema", get(table_schema))
        .route("/api/db/tables/{name}/stats", get(table_stats))
}

/// GET /api/db/tables
async fn list_tables(State(state): State<AppState>) -> Result<Json<Vec<TableInfo>>, ApiError> {
    Ok(Json(state.inspector.list_tables().await?))
}

/// GET /api/db/tables/{name}
/// Returns: { "name": "...", "schema": [...], "data": [...], "stats": { "rowCount": n } }
async fn table_snapshot(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<TableSnapshot>, ApiError> {
    Ok(Json(state.inspector.snapshot(&name).await?))
}

/// GET /api/db/tables/{name}/data
async fn table_data(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Vec<Record>>, ApiError> {
    Ok(Json(state.inspector.get_table_data(&name).await?))
}

/// GET /api/db/tables/{name}/schema
async fn table_schema(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Vec<ColumnDescriptor>>, ApiError> {
    Ok(Json(state.inspector.get_table_schema(&name).await?))
}

/// GET /api/db/tables/{name}/stats
async fn table_stats(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<TableStats>, ApiError> {
    Ok(Json(state.inspector.get_table_stats(&name).await?))
}

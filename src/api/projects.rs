/// Project REST API endpoints
///
/// Mirrors the UI's `projects.getAll`, `projects.create` and `projects.get` calls.

use crate::{
    api::{error::ApiError, AppState},
    project::{NewProject, Project},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};

/// Create project routes
pub fn create_project_routes() -> Router<AppState> {
    Router::new()
        .route("/api/projects", get(list_projects).post(create_project))
        .route("/api/projects/{id}", get(get_project))
}

/// List all projects, newest first
///
/// GET /api/projects
async fn list_projects(State(state): State<AppState>) -> Result<Json<Vec<Project>>, ApiError> {
    Ok(Json(state.store.list_projects().await?))
}

/// Create a project
///
/// POST /api/projects
/// Body: { "name": "...", "type": "document" | "slides", "description": "..." }
/// The name is trimmed; `type` defaults to "document".
async fn create_project(
    State(state): State<AppState>,
    Json(payload): Json<NewProject>,
) -> Result<(StatusCode, Json<Project>), ApiError> {
    let project = state
        .store
        .create_project(payload.name.trim(), &payload.kind, payload.description.as_deref())
        .await?;

    Ok((StatusCode::CREATED, Json(project)))
}

/// Get a project by id
///
/// GET /api/projects/{id}
async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Project>, ApiError> {
    state
        .store
        .get_project(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("project {}", id)))
}

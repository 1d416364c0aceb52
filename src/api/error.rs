/// Mapping of store errors onto HTTP responses
///
/// Every error becomes a JSON body `{ "error": ..., "code": ... }`.

use crate::error::StoreError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("{0} not found")]
    NotFound(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::Store(err) => match err {
                StoreError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
                StoreError::Constraint(_) => (StatusCode::BAD_REQUEST, "CONSTRAINT_VIOLATION"),
                StoreError::UnknownTable(_) => (StatusCode::NOT_FOUND, "UNKNOWN_TABLE"),
                StoreError::Io(_) | StoreError::Database(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
                }
            },
        };

        let message = if status.is_server_error() {
            tracing::error!("❌ Request failed: {}", self);
            "An internal error occurred".to_string()
        } else {
            self.to_string()
        };

        (status, Json(json!({ "error": message, "code": code }))).into_response()
    }
}

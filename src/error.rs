//! Error types for the catalog service

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::api::validation::ValidationErrors;
use crate::catalog::store::StoreError;

/// Application-wide result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error type
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    #[error("Cannot delete {entity} '{name}' because it is referenced by {referenced_by} product(s).")]
    ReferenceConflict {
        entity: &'static str,
        name: String,
        referenced_by: usize,
    },

    #[error("Malformed request body: {0}")]
    Payload(#[from] JsonRejection),

    #[error("Fixture error: {0}")]
    Fixture(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(errors)
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { entity, id } => AppError::NotFound {
                entity,
                id: id.to_string(),
            },
            StoreError::ForeignKeyViolation { field, id } => {
                AppError::Validation(ValidationErrors::single(field, invalid_pk_message(id)))
            }
            StoreError::Protected {
                entity,
                name,
                referenced_by,
            } => AppError::ReferenceConflict {
                entity,
                name,
                referenced_by,
            },
        }
    }
}

/// Message reported for a primary key that does not resolve to a record
pub fn invalid_pk_message(id: impl std::fmt::Display) -> String {
    format!("Invalid pk \"{}\" - object does not exist.", id)
}

impl AppError {
    /// HTTP status this error is surfaced with
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::ReferenceConflict { .. } => StatusCode::CONFLICT,
            AppError::Payload(rejection) => match rejection.status() {
                StatusCode::UNSUPPORTED_MEDIA_TYPE => StatusCode::UNSUPPORTED_MEDIA_TYPE,
                _ => StatusCode::BAD_REQUEST,
            },
            AppError::Config(_)
            | AppError::Fixture(_)
            | AppError::Io(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            AppError::Validation(errors) => (status, Json(errors)).into_response(),
            AppError::NotFound { .. } => {
                (status, Json(json!({ "detail": "Not found." }))).into_response()
            }
            AppError::Payload(rejection) => {
                (status, Json(json!({ "detail": rejection.body_text() }))).into_response()
            }
            other => {
                if status.is_server_error() {
                    error!(error = %other, "Request failed");
                }
                (status, Json(json!({ "detail": other.to_string() }))).into_response()
            }
        }
    }
}

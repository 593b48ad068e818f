//! Error types for the storage layer and the HTTP surface.

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use todo_core::ErrorBody;

/// A stored document that does not have the shape of a to-do record.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MappingError {
    #[error("document is missing field `{0}`")]
    MissingField(&'static str),

    #[error("document field `{0}` has an unexpected type")]
    WrongType(&'static str),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("mapping failed: {0}")]
    Mapping(#[from] MappingError),

    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),

    /// The in-memory store was asked for a filter or update it cannot evaluate.
    #[error("unsupported operation: {0}")]
    Unsupported(String),
}

/// Failure of a request handler, rendered as `{"detail": ...}`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(&'static str),

    #[error("{0}")]
    BadRequest(&'static str),

    /// The request itself could not be extracted.
    #[error("{detail}")]
    Rejected { status: StatusCode, detail: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Rejected {
            status: rejection.status(),
            detail: rejection.body_text(),
        }
    }
}

/// Missing or malformed query parameters are a validation failure (422),
/// the same status a malformed body gets.
impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Rejected {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            detail: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::Rejected {
            status: rejection.status(),
            detail: rejection.body_text(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            AppError::NotFound(detail) => (StatusCode::NOT_FOUND, detail.to_string()),
            AppError::BadRequest(detail) => (StatusCode::BAD_REQUEST, detail.to_string()),
            AppError::Rejected { status, detail } => (*status, detail.clone()),
            AppError::Store(e) => {
                tracing::error!(error = %e, "storage fault");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };
        (status, Json(ErrorBody { detail })).into_response()
    }
}

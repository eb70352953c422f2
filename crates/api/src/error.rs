//! Unified error handling for the API.
//!
//! Every failure resolves at the handler boundary into a JSON envelope:
//!
//! ```json
//! { "code": 400, "detail": ["name is required", "price is required"] }
//! ```

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use confectionery_core::IdError;

use crate::db::RepositoryError;

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed request: undecodable body or bad path id.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Body that could not be parsed at all on an endpoint that reports it as 422.
    #[error("Unprocessable body: {0}")]
    UnprocessableBody(String),

    /// One message per violated field rule.
    #[error("Validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),

    /// Unique email collision, or removal of a row that is still referenced.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Unique cake name collision.
    #[error("Duplicate name: {0}")]
    DuplicateName(String),

    /// An order points at a customer or cake that does not exist.
    #[error("Reference not found: {0}")]
    ReferenceNotFound(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The path exists but does not accept this method.
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Store operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::InvalidInput(_)
            | Self::Validation(_)
            | Self::DuplicateName(_)
            | Self::ReferenceNotFound(_) => StatusCode::BAD_REQUEST,
            Self::UnprocessableBody(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidInput(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        Self::InvalidInput(format!("invalid id: {}", rejection.body_text()))
    }
}

impl From<IdError> for AppError {
    fn from(e: IdError) -> Self {
        Self::InvalidInput(format!("invalid id: {e}"))
    }
}

/// JSON error envelope.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: u16,
    pub detail: Vec<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Log server errors with Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "API request error"
            );
        }

        // Don't expose internal error details to clients
        let detail = match self {
            Self::Database(_) | Self::Internal(_) => vec!["Internal server error".to_string()],
            Self::Validation(messages) => messages,
            Self::MethodNotAllowed => vec!["Method not allowed".to_string()],
            Self::InvalidInput(message)
            | Self::UnprocessableBody(message)
            | Self::Conflict(message)
            | Self::DuplicateName(message)
            | Self::ReferenceNotFound(message)
            | Self::NotFound(message) => vec![message],
        };

        let body = ErrorBody {
            code: status.as_u16(),
            detail,
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("Cake not found".to_string());
        assert_eq!(err.to_string(), "Not found: Cake not found");

        let err = AppError::Validation(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(err.to_string(), "Validation failed: a, b");
    }

    #[test]
    fn test_app_error_status_codes() {
        fn get_status(err: AppError) -> StatusCode {
            err.into_response().status()
        }

        assert_eq!(
            get_status(AppError::InvalidInput("test".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::UnprocessableBody("test".to_string())),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            get_status(AppError::Validation(vec!["test".to_string()])),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Conflict("test".to_string())),
            StatusCode::CONFLICT
        );
        assert_eq!(
            get_status(AppError::DuplicateName("test".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::ReferenceNotFound("test".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::NotFound("test".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::MethodNotAllowed),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(
            get_status(AppError::Database(RepositoryError::NotFound)),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            get_status(AppError::Internal("test".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_envelope_carries_every_message() {
        let response = AppError::Validation(vec![
            "name is required".to_string(),
            "price is required".to_string(),
        ])
        .into_response();

        assert_eq!(
            body_json(response).await,
            serde_json::json!({
                "code": 400,
                "detail": ["name is required", "price is required"],
            })
        );
    }

    #[tokio::test]
    async fn test_internal_details_are_hidden() {
        let response =
            AppError::Database(RepositoryError::DataCorruption("bad email".to_string()))
                .into_response();

        assert_eq!(
            body_json(response).await,
            serde_json::json!({ "code": 500, "detail": ["Internal server error"] })
        );
    }

    #[test]
    fn test_id_error_is_invalid_input() {
        let err = AppError::from(IdError::NotANumber);
        assert!(matches!(err, AppError::InvalidInput(_)));
    }
}

//! API error types with IntoResponse
//!
//! Errors are converted to JSON responses with appropriate status codes.
//! The body is always `{"message": ...}` - the wire contract the web
//! client was written against.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::DbError;
use crate::models::ValidationError;
use crate::uploads::UploadError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Validation failed (400) - rejected before the data layer
    Validation(ValidationError),

    /// Resource not found (400, per the client contract)
    NotFound { resource: &'static str },

    /// Database error (500, logged)
    Database(DbError),

    /// Upload could not be stored
    Upload(UploadError),

    /// Request body was not usable multipart (400)
    Multipart { message: String },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::Validation(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            Self::NotFound { resource } => {
                (StatusCode::BAD_REQUEST, format!("{} not found", resource))
            }
            Self::Database(e) => {
                // Log the actual error, return a generic message
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "an internal error occurred".to_owned(),
                )
            }
            Self::Upload(UploadError::Io(e)) => {
                tracing::error!("Upload I/O error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "an internal error occurred".to_owned(),
                )
            }
            Self::Upload(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            Self::Multipart { message } => (StatusCode::BAD_REQUEST, message.clone()),
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { resource, .. } => Self::NotFound { resource },
            _ => Self::Database(e),
        }
    }
}

impl From<UploadError> for ApiError {
    fn from(e: UploadError) -> Self {
        Self::Upload(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_message(err: ApiError) -> (StatusCode, String) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), 1024).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        (status, body["message"].as_str().unwrap().to_owned())
    }

    #[tokio::test]
    async fn validation_error_is_400() {
        let err = ApiError::Validation(ValidationError::Empty { field: "name" });
        let (status, message) = body_message(err).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(message, "name cannot be empty");
    }

    #[tokio::test]
    async fn point_not_found_matches_client_contract() {
        let err = ApiError::from(DbError::NotFound {
            resource: "Point",
            id: "42".into(),
        });
        let (status, message) = body_message(err).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(message, "Point not found");
    }

    #[tokio::test]
    async fn database_error_is_opaque_500() {
        let err = ApiError::Database(DbError::Sqlx(sqlx::Error::PoolClosed));
        let (status, message) = body_message(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(message, "an internal error occurred");
    }

    #[tokio::test]
    async fn empty_upload_is_400() {
        let err = ApiError::from(UploadError::EmptyFile);
        let (status, _) = body_message(err).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}

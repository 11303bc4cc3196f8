//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Maps the registry failure taxonomy to HTTP status codes and returns a
//! `{"error": "<message>"}` body. Never exposes internal error details.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::services::RegistryError;

/// Fixed message returned for every 500 response.
pub const INTERNAL_ERROR_MESSAGE: &str = "internal error, please retry later";

/// JSON error response body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    /// Human-readable error message.
    pub error: String,
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum AppError {
    /// Request validation failed (400).
    #[error("{0}")]
    Validation(String),

    /// Request body could not be parsed (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Resource not found (404).
    #[error("{0}")]
    NotFound(String),

    /// Conflict with an existing resource (409).
    #[error("{0}")]
    Conflict(String),

    /// Request body exceeded the configured limit (413).
    #[error("{0}")]
    PayloadTooLarge(String),

    /// Internal server error (500). Message is logged but not returned to client.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Log the failure against `operation`: `warn` for rejected requests,
    /// `error` for internal failures.
    pub fn log(&self, operation: &'static str) {
        match self {
            Self::Internal(_) => tracing::error!(operation, error = %self, "internal failure"),
            _ => tracing::warn!(operation, error = %self, "request rejected"),
        }
    }

    /// Return the HTTP status code for this error.
    fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let error = match &self {
            Self::Internal(_) => INTERNAL_ERROR_MESSAGE.to_string(),
            other => other.to_string(),
        };

        (status, Json(ErrorBody { error })).into_response()
    }
}

impl From<certreg_core::ValidationError> for AppError {
    fn from(err: certreg_core::ValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<RegistryError> for AppError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::Validation(_) | RegistryError::HashMismatch { .. } => {
                Self::Validation(err.to_string())
            }
            RegistryError::DuplicateContent(_) => Self::Conflict(err.to_string()),
            RegistryError::NotFound(msg) => Self::NotFound(msg),
            RegistryError::Store(_) | RegistryError::Content(_) => Self::Internal(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreError;
    use certreg_content::ContentStoreError;
    use certreg_core::{ContentHash, ValidationError};
    use http_body_util::BodyExt;

    async fn body_json(resp: Response) -> serde_json::Value {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn validation_status_code() {
        assert_eq!(AppError::Validation("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::BadRequest("x".into()).status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn not_found_status_code() {
        assert_eq!(AppError::NotFound("x".into()).status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn conflict_status_code() {
        assert_eq!(AppError::Conflict("x".into()).status(), StatusCode::CONFLICT);
    }

    #[test]
    fn payload_too_large_status_code() {
        assert_eq!(
            AppError::PayloadTooLarge("x".into()).status(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
    }

    #[test]
    fn registry_errors_map_to_statuses() {
        let cases = [
            (
                RegistryError::from(ValidationError::MissingField("wallet")),
                StatusCode::BAD_REQUEST,
            ),
            (
                RegistryError::HashMismatch {
                    claimed: ContentHash::of(b"a"),
                    computed: ContentHash::of(b"b"),
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                RegistryError::DuplicateContent(ContentHash::of(b"a")),
                StatusCode::CONFLICT,
            ),
            (RegistryError::NotFound("gone".into()), StatusCode::NOT_FOUND),
            (
                RegistryError::Store(StoreError::CorruptRow("bad".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                RegistryError::Content(ContentStoreError::Unavailable("down".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(AppError::from(err).status(), expected);
        }
    }

    #[tokio::test]
    async fn client_error_body_carries_message() {
        let resp = AppError::from(ValidationError::MissingField("wallet")).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(resp).await, serde_json::json!({"error": "wallet is required"}));
    }

    #[tokio::test]
    async fn internal_error_body_is_generic() {
        let resp = AppError::Internal("connection refused to db:5432".into()).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(resp).await;
        assert_eq!(body["error"], INTERNAL_ERROR_MESSAGE);
        assert!(!body.to_string().contains("5432"));
    }
}

//! API error types with HTTP response mapping.
//!
//! Validation failures never land here: they travel inside the domain's
//! result envelope with a 400 status. This type covers lookups that miss
//! on the HTTP surface and fatal repository failures.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use domain::RepositoryError;

/// API-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// Resource not found.
    NotFound(String),
    /// A repository collaborator failed fatally.
    Repository(RepositoryError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Repository(err) => {
                tracing::error!(error = %err, "repository failure");
                let status = match err {
                    RepositoryError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
                    RepositoryError::Malformed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (status, err.to_string())
            }
        };

        let body = serde_json::json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        ApiError::Repository(err)
    }
}

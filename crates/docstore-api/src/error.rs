//! Maps domain `AppError` to HTTP responses.
//!
//! Handlers return [`ApiError`]; `?` converts any `AppError` into it.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use docstore_core::error::{AppError, ErrorKind};

/// Error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Human-readable message.
    pub error: String,
    /// Machine-readable kind, e.g. `VALIDATION`.
    pub code: String,
}

/// HTTP status for an error kind.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::Authentication => StatusCode::UNAUTHORIZED,
        ErrorKind::Authorization => StatusCode::FORBIDDEN,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::Internal
        | ErrorKind::Database
        | ErrorKind::Storage
        | ErrorKind::Configuration
        | ErrorKind::Serialization => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// HTTP-facing wrapper around [`AppError`].
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let status = status_for(err.kind);

        let message = if err.kind.is_client_error() {
            err.message
        } else {
            let cause = std::error::Error::source(&err).map(|s| s.to_string());
            tracing::error!(
                kind = %err.kind,
                error = %err.message,
                cause = cause.as_deref().unwrap_or("-"),
                "Request failed"
            );
            "Internal server error".to_string()
        };

        let body = ApiErrorResponse {
            error: message,
            code: err.kind.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

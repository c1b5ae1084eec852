//! Maps domain errors and authentication failures to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use forum_auth::AuthFailure;
use forum_core::error::{AppError, ErrorKind};

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Always `false`.
    pub success: bool,
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

impl ApiErrorResponse {
    fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: code.to_string(),
            message: message.into(),
        }
    }
}

/// Handler error wrapping [`AppError`].
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
        let (status, code) = match err.kind {
            ErrorKind::Validation => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ErrorKind::Unauthorized => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            ErrorKind::Forbidden => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            ErrorKind::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ErrorKind::Conflict => (StatusCode::CONFLICT, "CONFLICT"),
            ErrorKind::ServiceUnavailable => {
                (StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE")
            }
            ErrorKind::Database
            | ErrorKind::Configuration
            | ErrorKind::Serialization
            | ErrorKind::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        let message = if err.is_infrastructure() {
            tracing::error!(kind = %err.kind, error = %err.message, "Request failed");
            "An internal error occurred".to_string()
        } else {
            err.message
        };

        (status, Json(ApiErrorResponse::new(code, message))).into_response()
    }
}

/// Login handler error wrapping [`AuthFailure`].
///
/// Only the public message and code reach the client. The distinct reason
/// has already been logged by the authenticator.
#[derive(Debug)]
pub struct LoginError(pub AuthFailure);

impl From<AuthFailure> for LoginError {
    fn from(failure: AuthFailure) -> Self {
        Self(failure)
    }
}

impl IntoResponse for LoginError {
    fn into_response(self) -> Response {
        let failure = self.0;
        let status = match failure {
            AuthFailure::Validation(_) => StatusCode::BAD_REQUEST,
            AuthFailure::NotFound(_)
            | AuthFailure::InvalidSecret { .. }
            | AuthFailure::AccountBanned(_)
            | AuthFailure::AccountInactive(_) => StatusCode::UNAUTHORIZED,
            AuthFailure::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        };

        let body = ApiErrorResponse::new(failure.code(), failure.public_message());
        (status, Json(body)).into_response()
    }
}

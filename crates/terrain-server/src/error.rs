//! Error handling at the HTTP boundary.
//!
//! Token and credential problems carry detail for the logs, but the client
//! always sees one of a few uniform JSON bodies. In particular, every way a
//! request can fail authentication maps to the same 401 so responses do not
//! reveal whether an account exists.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use terrain_auth::AuthError;
use thiserror::Error;
use tracing::{error, warn};

/// Application error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Login failed. Unknown user and wrong password are not distinguished.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Request carried no usable token. The reason is log-only detail.
    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    /// Bad request.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body.
#[derive(Serialize)]
pub struct ErrorResponse {
    /// Error flag.
    pub error: bool,
    /// Error code.
    pub code: String,
    /// Error message.
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "INVALID_CREDENTIALS",
                "Invalid username or password".to_string(),
            ),
            AppError::Unauthenticated(reason) => {
                warn!(%reason, "Rejected unauthenticated request");
                (
                    StatusCode::UNAUTHORIZED,
                    "UNAUTHENTICATED",
                    "Authentication required".to_string(),
                )
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg),
            AppError::Internal(detail) => {
                error!(%detail, "Request failed with internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "Internal server error".to_string(),
                )
            }
        };

        let body = ErrorResponse {
            error: true,
            code: code.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            // All token rejections, including a subject that no longer
            // exists, collapse into one client-visible 401.
            AuthError::Expired
            | AuthError::InvalidSignature
            | AuthError::Malformed
            | AuthError::UnknownSubject(_) => AppError::Unauthenticated(err.to_string()),
            AuthError::Store(_)
            | AuthError::Hash(_)
            | AuthError::InvalidHashFormat(_)
            | AuthError::Configuration(_) => AppError::Internal(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_errors_collapse_to_unauthenticated() {
        for err in [
            AuthError::Expired,
            AuthError::InvalidSignature,
            AuthError::Malformed,
            AuthError::UnknownSubject("marie.dupont".to_string()),
        ] {
            assert!(matches!(AppError::from(err), AppError::Unauthenticated(_)));
        }
    }

    #[test]
    fn test_infrastructure_errors_become_internal() {
        let err = AuthError::Store("lock poisoned".to_string());
        assert!(matches!(AppError::from(err), AppError::Internal(_)));
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::InvalidCredentials.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::Unauthenticated("x".to_string())
                .into_response()
                .status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::BadRequest("x".to_string()).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::NotFound("x".to_string()).into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Internal("x".to_string()).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_body_shape() {
        let body = ErrorResponse {
            error: true,
            code: "UNAUTHENTICATED".to_string(),
            message: "Authentication required".to_string(),
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["error"], true);
        assert_eq!(value["code"], "UNAUTHENTICATED");
        assert_eq!(value["message"], "Authentication required");
    }
}

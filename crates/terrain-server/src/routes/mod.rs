//! HTTP route handlers.

pub mod auth;
pub mod health;

use crate::error::AppError;

/// Fallback handler for unknown paths.
pub async fn not_found() -> AppError {
    AppError::NotFound("No such route".to_string())
}

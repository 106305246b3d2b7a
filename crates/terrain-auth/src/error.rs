//! Authentication error types

use thiserror::Error;

/// Errors produced by credential storage, hashing and token handling.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Token has expired")]
    Expired,

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token is malformed")]
    Malformed,

    #[error("Token subject no longer exists: {0}")]
    UnknownSubject(String),

    #[error("Credential store error: {0}")]
    Store(String),

    #[error("Password hashing failed: {0}")]
    Hash(String),

    #[error("Stored password hash is unusable: {0}")]
    InvalidHashFormat(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Result type for authentication operations
pub type AuthResult<T> = Result<T, AuthError>;

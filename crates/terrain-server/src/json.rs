//! JSON request and response types for the HTTP API.

use serde::{Deserialize, Serialize};

/// Login form fields, shared by the API and HTML login routes.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Account username.
    pub username: String,
    /// Plaintext password, used for this request only.
    pub password: String,
}

/// Successful API login response.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    /// Signed access token.
    pub access_token: String,
    /// Token scheme, always `"bearer"`.
    pub token_type: String,
}

impl TokenResponse {
    /// Wrap a freshly issued token.
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
        }
    }
}

/// Response for the authenticated-account endpoint.
#[derive(Debug, Serialize)]
pub struct MeResponse {
    /// Account username.
    pub username: String,
    /// Account role label.
    pub role: String,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Health status.
    pub status: String,
    /// Server version.
    pub version: String,
}

//! Access token issuance and verification.
//!
//! Access tokens are JWTs signed with an HMAC secret. The server issues them
//! at login and checks them on every guarded request. Verification is
//! stateless, a token is trusted as long as its signature checks out and its
//! expiry has not passed.
//!
//! # Token Claims
//!
//! ```json
//! {
//!   "sub": "marie.dupont",
//!   "exp": 1735689600,
//!   "iat": 1735687800
//! }
//! ```

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::{is_hmac, AuthConfig};
use crate::error::{AuthError, AuthResult};

/// Claims carried by an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (username of the authenticated account).
    pub sub: String,

    /// Expiration time (Unix timestamp).
    pub exp: u64,

    /// Issued at time (Unix timestamp).
    #[serde(default)]
    pub iat: Option<u64>,
}

/// Signs and verifies access tokens.
///
/// Both operations use the same symmetric secret, so a codec built from a
/// different secret rejects tokens issued here and vice versa.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    header: Header,
    validation: Validation,
    token_ttl: Duration,
}

impl TokenCodec {
    /// Build a codec from the authentication configuration.
    ///
    /// Fails when the secret is empty or the configured algorithm is not in
    /// the HMAC family.
    pub fn new(config: &AuthConfig) -> AuthResult<Self> {
        if config.secret.is_empty() {
            return Err(AuthError::Configuration(
                "Token signing secret must not be empty".to_string(),
            ));
        }
        if !is_hmac(config.algorithm) {
            return Err(AuthError::Configuration(format!(
                "Unsupported signing algorithm {:?}, expected HS256, HS384 or HS512",
                config.algorithm
            )));
        }

        let mut validation = Validation::new(config.algorithm);
        validation.leeway = config.leeway_secs;
        validation.validate_exp = true;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            header: Header::new(config.algorithm),
            validation,
            token_ttl: config.token_ttl,
        })
    }

    /// Issue a token for the given subject with the configured lifetime.
    pub fn issue(&self, subject: &str) -> AuthResult<String> {
        self.issue_with_ttl(subject, self.token_ttl)
    }

    /// Issue a token for the given subject with an explicit lifetime.
    pub fn issue_with_ttl(&self, subject: &str, ttl: Duration) -> AuthResult<String> {
        let now = unix_now();
        let claims = Claims {
            sub: subject.to_string(),
            exp: now + ttl.as_secs(),
            iat: Some(now),
        };

        encode(&self.header, &claims, &self.encoding_key)
            .map_err(|e| AuthError::Configuration(format!("Token signing failed: {e}")))
    }

    /// Verify a token and return its claims.
    ///
    /// The checks are ordered: a token that is both tampered with and expired
    /// reports [`AuthError::InvalidSignature`], not [`AuthError::Expired`].
    pub fn verify(&self, token: &str) -> AuthResult<Claims> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => AuthError::Expired,
                    ErrorKind::InvalidSignature
                    | ErrorKind::InvalidAlgorithm
                    | ErrorKind::InvalidAlgorithmName => AuthError::InvalidSignature,
                    _ => AuthError::Malformed,
                }
            })?;

        Ok(token_data.claims)
    }

    /// Lifetime applied by [`TokenCodec::issue`].
    pub fn token_ttl(&self) -> Duration {
        self.token_ttl
    }
}

/// Current Unix timestamp in seconds
fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

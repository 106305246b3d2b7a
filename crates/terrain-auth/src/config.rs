//! Authentication configuration

use std::fmt;
use std::time::Duration;

use jsonwebtoken::Algorithm;

use crate::error::{AuthError, AuthResult};

/// Environment variable holding the token signing secret
pub const ENV_SECRET_KEY: &str = "TERRAIN_SECRET_KEY";

/// Environment variable selecting the signing algorithm
pub const ENV_ALGORITHM: &str = "TERRAIN_ALGORITHM";

/// Environment variable overriding the token lifetime in minutes
pub const ENV_TOKEN_TTL_MINUTES: &str = "TERRAIN_TOKEN_TTL_MINUTES";

/// Default signing algorithm
pub const DEFAULT_ALGORITHM: Algorithm = Algorithm::HS256;

/// Default token lifetime in minutes
pub const DEFAULT_TOKEN_TTL_MINUTES: u64 = 30;

/// Configuration for password and token handling.
///
/// The signing secret has no default. It must come from the caller or from
/// the `TERRAIN_SECRET_KEY` environment variable.
#[derive(Clone)]
pub struct AuthConfig {
    /// Secret used to sign and verify tokens
    pub secret: String,
    /// HMAC algorithm used for token signatures
    pub algorithm: Algorithm,
    /// Lifetime of newly issued tokens
    pub token_ttl: Duration,
    /// Clock skew tolerated when checking expiry, in seconds
    pub leeway_secs: u64,
}

impl AuthConfig {
    /// Create a configuration with the given secret and default settings
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            algorithm: DEFAULT_ALGORITHM,
            token_ttl: Duration::from_secs(DEFAULT_TOKEN_TTL_MINUTES * 60),
            leeway_secs: 0,
        }
    }

    /// Set the signing algorithm
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Set the token lifetime
    pub fn with_token_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = ttl;
        self
    }

    /// Set the expiry leeway in seconds
    pub fn with_leeway(mut self, secs: u64) -> Self {
        self.leeway_secs = secs;
        self
    }

    /// Load the configuration from the environment.
    ///
    /// Fails when `TERRAIN_SECRET_KEY` is missing or empty, or when an
    /// override variable holds an unusable value.
    pub fn from_env() -> AuthResult<Self> {
        let secret = std::env::var(ENV_SECRET_KEY)
            .map_err(|_| AuthError::Configuration(format!("{ENV_SECRET_KEY} is not set")))?;
        if secret.is_empty() {
            return Err(AuthError::Configuration(format!(
                "{ENV_SECRET_KEY} must not be empty"
            )));
        }

        let algorithm = match std::env::var(ENV_ALGORITHM) {
            Ok(name) => parse_hmac_algorithm(&name)?,
            Err(_) => DEFAULT_ALGORITHM,
        };

        let ttl_minutes = match std::env::var(ENV_TOKEN_TTL_MINUTES) {
            Ok(raw) => raw.parse::<u64>().map_err(|_| {
                AuthError::Configuration(format!(
                    "{ENV_TOKEN_TTL_MINUTES} must be a positive integer, got {raw:?}"
                ))
            })?,
            Err(_) => DEFAULT_TOKEN_TTL_MINUTES,
        };

        Ok(Self {
            secret,
            algorithm,
            token_ttl: Duration::from_secs(ttl_minutes * 60),
            leeway_secs: 0,
        })
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("secret", &"<redacted>")
            .field("algorithm", &self.algorithm)
            .field("token_ttl", &self.token_ttl)
            .field("leeway_secs", &self.leeway_secs)
            .finish()
    }
}

/// Parse an algorithm name, accepting only the HMAC family
pub fn parse_hmac_algorithm(name: &str) -> AuthResult<Algorithm> {
    match name {
        "HS256" => Ok(Algorithm::HS256),
        "HS384" => Ok(Algorithm::HS384),
        "HS512" => Ok(Algorithm::HS512),
        other => Err(AuthError::Configuration(format!(
            "Unsupported signing algorithm {other:?}, expected HS256, HS384 or HS512"
        ))),
    }
}

/// Whether the algorithm belongs to the HMAC family
pub fn is_hmac(algorithm: Algorithm) -> bool {
    matches!(
        algorithm,
        Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AuthConfig::new("secret");
        assert_eq!(config.algorithm, Algorithm::HS256);
        assert_eq!(config.token_ttl, Duration::from_secs(30 * 60));
        assert_eq!(config.leeway_secs, 0);
    }

    #[test]
    fn test_builder_overrides() {
        let config = AuthConfig::new("secret")
            .with_algorithm(Algorithm::HS512)
            .with_token_ttl(Duration::from_secs(60))
            .with_leeway(5);
        assert_eq!(config.algorithm, Algorithm::HS512);
        assert_eq!(config.token_ttl, Duration::from_secs(60));
        assert_eq!(config.leeway_secs, 5);
    }

    #[test]
    fn test_parse_hmac_algorithm() {
        assert_eq!(parse_hmac_algorithm("HS256").unwrap(), Algorithm::HS256);
        assert_eq!(parse_hmac_algorithm("HS384").unwrap(), Algorithm::HS384);
        assert_eq!(parse_hmac_algorithm("HS512").unwrap(), Algorithm::HS512);
    }

    #[test]
    fn test_parse_rejects_non_hmac() {
        assert!(parse_hmac_algorithm("RS256").is_err());
        assert!(parse_hmac_algorithm("hs256").is_err());
        assert!(parse_hmac_algorithm("").is_err());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = AuthConfig::new("super-secret-value");
        let printed = format!("{config:?}");
        assert!(!printed.contains("super-secret-value"));
        assert!(printed.contains("<redacted>"));
    }
}

//! Authentication core for the Terrain backend.
//!
//! Everything needed to manage credentials for field personnel without
//! touching HTTP: a credential store contract with an in-memory
//! implementation, Argon2 password hashing, JWT issuance and verification,
//! and a password authenticator tying them together. The HTTP layer lives
//! in `terrain-server`.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use terrain_auth::{
//!     hash_password, AuthConfig, Authenticator, CredentialStore, Identity,
//!     MemoryCredentialStore, TokenCodec, FIELD_AGENT_ROLE,
//! };
//!
//! # fn main() -> terrain_auth::AuthResult<()> {
//! let store = Arc::new(MemoryCredentialStore::new());
//! store.insert(Identity::new(
//!     "marie.dupont",
//!     hash_password("Secret1!")?,
//!     FIELD_AGENT_ROLE,
//! ))?;
//!
//! let authenticator = Authenticator::new(store);
//! assert!(authenticator.authenticate("marie.dupont", "Secret1!")?.is_some());
//!
//! let codec = TokenCodec::new(&AuthConfig::new("signing-secret"))?;
//! let token = codec.issue("marie.dupont")?;
//! assert_eq!(codec.verify(&token)?.sub, "marie.dupont");
//! # Ok(())
//! # }
//! ```

pub mod authenticator;
pub mod config;
pub mod error;
pub mod password;
pub mod store;
pub mod token;

pub use authenticator::Authenticator;
pub use config::AuthConfig;
pub use error::{AuthError, AuthResult};
pub use password::{hash_password, verify_password};
pub use store::{
    CredentialStore, Identity, MemoryCredentialStore, FIELD_AGENT_ROLE, SUPER_USER_ROLE,
};
pub use token::{Claims, TokenCodec};

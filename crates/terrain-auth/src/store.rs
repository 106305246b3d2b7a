//! Credential storage.
//!
//! Defines the store contract the rest of the crate authenticates against,
//! plus an in-memory implementation backing the server until accounts move
//! to a database.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::{AuthError, AuthResult};

/// Role held by the provisioned administrator account
pub const SUPER_USER_ROLE: &str = "super_utilisateur";

/// Role held by ordinary field personnel
pub const FIELD_AGENT_ROLE: &str = "agent_terrain";

/// A stored account record.
///
/// Only the Argon2 hash of the password is kept. The type has no serde
/// support on purpose, API responses use their own types so the hash cannot
/// leak into a payload.
#[derive(Debug, Clone)]
pub struct Identity {
    /// Unique, case sensitive username
    pub username: String,
    /// PHC string produced by [`crate::hash_password`]
    pub password_hash: String,
    /// Role label, e.g. [`SUPER_USER_ROLE`]
    pub role: String,
}

impl Identity {
    /// Create an account record from its parts
    pub fn new(
        username: impl Into<String>,
        password_hash: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password_hash: password_hash.into(),
            role: role.into(),
        }
    }
}

/// Source of account records for authentication.
///
/// Lookups are by exact username. Implementations must enforce username
/// uniqueness.
pub trait CredentialStore: Send + Sync {
    /// Look up an account by its exact username
    fn find_by_username(&self, username: &str) -> AuthResult<Option<Identity>>;

    /// Add a new account, failing when the username is already taken
    fn insert(&self, identity: Identity) -> AuthResult<()>;

    /// Whether the store holds no accounts at all
    fn is_empty(&self) -> AuthResult<bool>;
}

/// In-memory credential store.
///
/// Accounts live in a `RwLock<HashMap>` keyed by username, so reads from
/// concurrent request handlers do not contend with each other.
#[derive(Default)]
pub struct MemoryCredentialStore {
    identities: RwLock<HashMap<String, Identity>>,
}

impl MemoryCredentialStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove an account, returning whether it existed
    pub fn remove(&self, username: &str) -> bool {
        let mut identities = self.identities.write().unwrap();
        identities.remove(username).is_some()
    }

    /// Number of stored accounts
    pub fn count(&self) -> usize {
        self.identities.read().unwrap().len()
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn find_by_username(&self, username: &str) -> AuthResult<Option<Identity>> {
        let identities = self.identities.read().unwrap();
        Ok(identities.get(username).cloned())
    }

    fn insert(&self, identity: Identity) -> AuthResult<()> {
        let mut identities = self.identities.write().unwrap();
        if identities.contains_key(&identity.username) {
            return Err(AuthError::Store(format!(
                "Username already exists: {}",
                identity.username
            )));
        }
        identities.insert(identity.username.clone(), identity);
        Ok(())
    }

    fn is_empty(&self) -> AuthResult<bool> {
        Ok(self.identities.read().unwrap().is_empty())
    }
}

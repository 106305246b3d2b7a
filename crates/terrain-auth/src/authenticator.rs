//! Username and password authentication

use std::sync::Arc;

use tracing::warn;

use crate::error::{AuthError, AuthResult};
use crate::password::verify_password;
use crate::store::{CredentialStore, Identity};

/// Validates username/password pairs against a credential store.
#[derive(Clone)]
pub struct Authenticator {
    store: Arc<dyn CredentialStore>,
}

impl Authenticator {
    /// Create an authenticator backed by the given store
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }

    /// Check a username/password pair.
    ///
    /// Returns `Ok(Some(identity))` on success and `Ok(None)` on failure.
    /// An unknown username, a wrong password and an unreadable stored hash
    /// all come back as the same `Ok(None)`, so callers cannot tell which
    /// accounts exist. Store failures still surface as errors.
    pub fn authenticate(&self, username: &str, password: &str) -> AuthResult<Option<Identity>> {
        let identity = match self.store.find_by_username(username)? {
            Some(identity) => identity,
            None => return Ok(None),
        };

        match verify_password(password, &identity.password_hash) {
            Ok(true) => Ok(Some(identity)),
            Ok(false) => Ok(None),
            Err(AuthError::InvalidHashFormat(detail)) => {
                warn!(username, %detail, "Stored password hash is not verifiable");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::password::hash_password;
    use crate::store::{MemoryCredentialStore, FIELD_AGENT_ROLE};

    fn authenticator_with(identities: Vec<Identity>) -> Authenticator {
        let store = MemoryCredentialStore::new();
        for identity in identities {
            store.insert(identity).unwrap();
        }
        Authenticator::new(Arc::new(store))
    }

    #[test]
    fn test_correct_credentials() {
        let auth = authenticator_with(vec![Identity::new(
            "marie.dupont",
            hash_password("Secret1!").unwrap(),
            FIELD_AGENT_ROLE,
        )]);

        let identity = auth.authenticate("marie.dupont", "Secret1!").unwrap();
        let identity = identity.unwrap();
        assert_eq!(identity.username, "marie.dupont");
        assert_eq!(identity.role, FIELD_AGENT_ROLE);
    }

    #[test]
    fn test_wrong_password() {
        let auth = authenticator_with(vec![Identity::new(
            "marie.dupont",
            hash_password("Secret1!").unwrap(),
            FIELD_AGENT_ROLE,
        )]);

        assert!(auth
            .authenticate("marie.dupont", "wrong")
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_unknown_username() {
        let auth = authenticator_with(vec![]);
        assert!(auth.authenticate("nobody", "Secret1!").unwrap().is_none());
    }

    #[test]
    fn test_unknown_user_and_wrong_password_look_identical() {
        let auth = authenticator_with(vec![Identity::new(
            "marie.dupont",
            hash_password("Secret1!").unwrap(),
            FIELD_AGENT_ROLE,
        )]);

        let ghost = auth.authenticate("nobody", "Secret1!").unwrap();
        let wrong = auth.authenticate("marie.dupont", "wrong").unwrap();
        assert!(ghost.is_none());
        assert!(wrong.is_none());
    }

    #[test]
    fn test_corrupt_stored_hash_fails_closed() {
        let auth = authenticator_with(vec![Identity::new(
            "marie.dupont",
            "not-a-phc-hash",
            FIELD_AGENT_ROLE,
        )]);

        // Unusable hash must reject the login, never grant or panic
        assert!(auth
            .authenticate("marie.dupont", "Secret1!")
            .unwrap()
            .is_none());
    }
}

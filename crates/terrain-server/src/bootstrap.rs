//! First-boot provisioning.
//!
//! An empty credential store would leave the server with nothing to log in
//! as. At startup this module provisions one privileged account, using the
//! configured password or, when none is given, a generated one that is
//! logged a single time so the operator can sign in and change it. The
//! plaintext is hashed before it reaches the store and is never persisted.

use rand::distributions::Alphanumeric;
use rand::Rng;
use terrain_auth::{hash_password, AuthResult, CredentialStore, Identity};
use tracing::{debug, info, warn};

use crate::config::BootstrapConfig;

/// Length of a generated bootstrap password
const GENERATED_PASSWORD_LEN: usize = 24;

/// Outcome of the first-boot provisioning check.
#[derive(Debug, PartialEq, Eq)]
pub enum BootstrapOutcome {
    /// The store already had accounts; nothing was provisioned.
    AlreadyProvisioned,
    /// The privileged account was created with the configured password.
    Created,
    /// The privileged account was created with a generated password.
    CreatedWithGeneratedPassword,
}

/// Provision the privileged account if the store is empty.
pub fn ensure_privileged_account(
    store: &dyn CredentialStore,
    config: &BootstrapConfig,
) -> AuthResult<BootstrapOutcome> {
    if !store.is_empty()? {
        debug!("Credential store already provisioned");
        return Ok(BootstrapOutcome::AlreadyProvisioned);
    }

    let (password, generated) = match &config.password {
        Some(password) => (password.clone(), false),
        None => (generate_password(), true),
    };

    let identity = Identity::new(&config.username, hash_password(&password)?, &config.role);
    store.insert(identity)?;

    if generated {
        // The only place a generated password is ever visible
        warn!(
            username = %config.username,
            password = %password,
            "Provisioned privileged account with a generated password; log in and change it"
        );
        Ok(BootstrapOutcome::CreatedWithGeneratedPassword)
    } else {
        info!(username = %config.username, role = %config.role, "Provisioned privileged account");
        Ok(BootstrapOutcome::Created)
    }
}

/// Generate a random alphanumeric password
fn generate_password() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(GENERATED_PASSWORD_LEN)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use terrain_auth::{verify_password, MemoryCredentialStore, SUPER_USER_ROLE};

    fn config_with_password(password: Option<&str>) -> BootstrapConfig {
        BootstrapConfig {
            username: "admin".to_string(),
            role: SUPER_USER_ROLE.to_string(),
            password: password.map(str::to_string),
        }
    }

    #[test]
    fn test_provisions_empty_store() {
        let store = MemoryCredentialStore::new();
        let config = config_with_password(Some("ProvidedPassword1!"));

        let outcome = ensure_privileged_account(&store, &config).unwrap();
        assert_eq!(outcome, BootstrapOutcome::Created);

        let identity = store.find_by_username("admin").unwrap().unwrap();
        assert_eq!(identity.role, SUPER_USER_ROLE);
        assert!(verify_password("ProvidedPassword1!", &identity.password_hash).unwrap());
    }

    #[test]
    fn test_password_is_stored_hashed() {
        let store = MemoryCredentialStore::new();
        let config = config_with_password(Some("ProvidedPassword1!"));

        ensure_privileged_account(&store, &config).unwrap();

        let identity = store.find_by_username("admin").unwrap().unwrap();
        assert!(identity.password_hash.starts_with("$argon2"));
        assert!(!identity.password_hash.contains("ProvidedPassword1!"));
    }

    #[test]
    fn test_generates_password_when_none_configured() {
        let store = MemoryCredentialStore::new();
        let config = config_with_password(None);

        let outcome = ensure_privileged_account(&store, &config).unwrap();
        assert_eq!(outcome, BootstrapOutcome::CreatedWithGeneratedPassword);
        assert!(store.find_by_username("admin").unwrap().is_some());
    }

    #[test]
    fn test_populated_store_is_left_alone() {
        let store = MemoryCredentialStore::new();
        store
            .insert(Identity::new("existing", "$argon2id$fake", SUPER_USER_ROLE))
            .unwrap();

        let outcome =
            ensure_privileged_account(&store, &config_with_password(Some("x"))).unwrap();
        assert_eq!(outcome, BootstrapOutcome::AlreadyProvisioned);
        assert_eq!(store.count(), 1);
        assert!(store.find_by_username("admin").unwrap().is_none());
    }

    #[test]
    fn test_second_boot_is_a_no_op() {
        let store = MemoryCredentialStore::new();
        let config = config_with_password(Some("ProvidedPassword1!"));

        assert_eq!(
            ensure_privileged_account(&store, &config).unwrap(),
            BootstrapOutcome::Created
        );
        assert_eq!(
            ensure_privileged_account(&store, &config).unwrap(),
            BootstrapOutcome::AlreadyProvisioned
        );
        assert_eq!(store.count(), 1);
    }

    #[test]
    fn test_generated_passwords_differ() {
        let first = generate_password();
        let second = generate_password();
        assert_eq!(first.len(), GENERATED_PASSWORD_LEN);
        assert_ne!(first, second);
    }
}

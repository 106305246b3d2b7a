//! Password hashing
//!
//! Passwords are hashed with Argon2id and a per-password random salt. The
//! stored string is a self-describing PHC string, so parameters can change
//! without invalidating existing records.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{
    Error as PasswordHashError, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
};
use argon2::Argon2;

use crate::error::{AuthError, AuthResult};

/// Hash a plaintext password with a freshly generated salt
pub fn hash_password(password: &str) -> AuthResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError::Hash(e.to_string()))?;
    Ok(hash.to_string())
}

/// Check a plaintext password against a stored hash.
///
/// Returns `Ok(false)` on a mismatch. A stored hash that cannot be parsed
/// is an [`AuthError::InvalidHashFormat`] error, never a silent mismatch.
pub fn verify_password(password: &str, stored_hash: &str) -> AuthResult<bool> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|e| AuthError::InvalidHashFormat(e.to_string()))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(PasswordHashError::Password) => Ok(false),
        Err(e) => Err(AuthError::InvalidHashFormat(e.to_string())),
    }
}

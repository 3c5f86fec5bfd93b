//! Password hashing
//!
//! argon2id with a per-password random salt, stored as a PHC string. Hashing is
//! CPU-bound, so the async wrappers move it onto the blocking pool.

use crate::config::SecretString;
use crate::domain::{Result, ShiftSyncError};
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use secrecy::ExposeSecret;

/// Hashes a password into a PHC-format argon2id string
///
/// # Errors
///
/// Returns an error if argon2 rejects the input
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| ShiftSyncError::Other(format!("Failed to hash password: {e}")))
}

/// Checks a password against a stored PHC hash
///
/// A malformed stored hash counts as a mismatch.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    match PasswordHash::new(stored_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            tracing::warn!(error = %e, "Stored password hash could not be parsed");
            false
        }
    }
}

/// [`hash_password`] on the blocking thread pool
pub async fn hash_password_async(password: SecretString) -> Result<String> {
    tokio::task::spawn_blocking(move || hash_password(password.expose_secret().as_str()))
        .await
        .map_err(|e| ShiftSyncError::Other(format!("Password hashing task failed: {e}")))?
}

/// [`verify_password`] on the blocking thread pool
pub async fn verify_password_async(password: SecretString, stored_hash: String) -> Result<bool> {
    tokio::task::spawn_blocking(move || {
        verify_password(password.expose_secret().as_str(), &stored_hash)
    })
    .await
    .map_err(|e| ShiftSyncError::Other(format!("Password verification task failed: {e}")))
}

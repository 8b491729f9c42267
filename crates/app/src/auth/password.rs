//! Password hashing.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use once_cell::sync::Lazy;
use thiserror::Error;

/// Shortest password accepted at registration.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Hash checked when a login names no account, so both failures cost one Argon2 run.
static UNKNOWN_ACCOUNT_HASH: Lazy<Option<String>> =
    Lazy::new(|| hash_password("unknown-account-placeholder").ok());

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("password must be at least {MIN_PASSWORD_LENGTH} characters")]
    TooShort,

    #[error("failed to hash password")]
    Hash,

    #[error("password does not match")]
    Mismatch,
}

/// Reject passwords that do not meet the minimum policy.
///
/// # Errors
///
/// Returns [`PasswordError::TooShort`] when the password has fewer than
/// [`MIN_PASSWORD_LENGTH`] characters.
pub fn validate_password(password: &str) -> Result<(), PasswordError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(PasswordError::TooShort);
    }

    Ok(())
}

/// Hash a password into an Argon2id PHC string.
///
/// # Errors
///
/// Returns [`PasswordError::Hash`] if hashing fails.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_ignored| PasswordError::Hash)
}

/// Verify a password against a stored PHC string.
///
/// # Errors
///
/// Returns [`PasswordError::Mismatch`] if the hash is malformed or the password is wrong.
pub fn verify_password(password: &str, hash: &str) -> Result<(), PasswordError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_ignored| PasswordError::Mismatch)?;

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_ignored| PasswordError::Mismatch)
}

/// Spend the same Argon2 work as [`verify_password`] for a login whose email matched no
/// account. The outcome is always a mismatch.
pub fn verify_password_without_account(password: &str) {
    if let Some(hash) = UNKNOWN_ACCOUNT_HASH.as_deref() {
        let _mismatch = verify_password(password, hash);
    }
}

//! Credential hashing and reset-token helpers.

use anyhow::{Context, Result};
use base64ct::{Base64UrlUnpadded, Encoding};
use rand::{RngCore, rngs::OsRng};
use secrecy::{ExposeSecret, SecretString};

/// Reset tokens are 10 characters over the URL-safe base64 alphabet.
pub const RESET_TOKEN_LEN: usize = 10;

// 7 random bytes encode to exactly RESET_TOKEN_LEN unpadded characters.
const RESET_TOKEN_BYTES: usize = 7;

/// Create a new opaque reset token.
///
/// The raw value is only handed to the owning user; honoring it later goes
/// through the store's active-token lookup.
pub(crate) fn generate_reset_token() -> Result<String> {
    let mut bytes = [0u8; RESET_TOKEN_BYTES];
    OsRng
        .try_fill_bytes(&mut bytes)
        .context("failed to generate reset token")?;
    Ok(Base64UrlUnpadded::encode_string(&bytes))
}

/// Hash a plaintext password with bcrypt at the given cost.
///
/// # Errors
/// Returns an error if the cost is outside bcrypt's accepted range.
pub fn hash_password(password: &SecretString, cost: u32) -> Result<String> {
    bcrypt::hash(password.expose_secret(), cost).context("failed to hash password")
}

/// Check a candidate password against a stored bcrypt hash.
///
/// The stored hash and the candidate take distinct types, so the two
/// arguments cannot be swapped at a call site.
///
/// # Errors
/// Returns an error if the stored hash is not a valid bcrypt string.
pub fn verify_password(hash: &str, candidate: &SecretString) -> Result<bool> {
    bcrypt::verify(candidate.expose_secret(), hash).context("failed to verify password")
}

pub(super) fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().is_some_and(|code| code.as_ref() == "23505"),
        _ => false,
    }
}

//! CredentialHasher trait for one-way password hashing.
//!
//! Defined in pronouns-core so services can hash passwords without coupling
//! to a specific algorithm. The Argon2id adapter lives in pronouns-infra.

use std::sync::Arc;

use pronouns_types::error::CredentialError;
use secrecy::{ExposeSecret, SecretString};

/// Salted, deliberately slow password hashing.
///
/// `hash` must produce a different output for every call (random salt).
/// `verify` must return `false` for a malformed stored hash instead of
/// panicking.
pub trait CredentialHasher: Send + Sync + 'static {
    /// Hash a raw password into a self-describing string (salt included).
    fn hash(&self, raw: &str) -> Result<String, CredentialError>;

    /// Check a raw password against a stored hash.
    fn verify(&self, raw: &str, hashed: &str) -> bool;

    /// A well-formed hash that no password matches. Login verifies against it
    /// when the email is unknown, so both failure paths do the same work.
    fn decoy_hash(&self) -> &str;
}

/// Run `hash` on the blocking pool.
///
/// The blocking task is not cancelled if the caller's future is dropped, so a
/// started hash always runs to completion.
pub async fn hash_blocking<H: CredentialHasher>(
    hasher: &Arc<H>,
    raw: SecretString,
) -> Result<String, CredentialError> {
    let hasher = Arc::clone(hasher);
    tokio::task::spawn_blocking(move || hasher.hash(raw.expose_secret()))
        .await
        .map_err(|_| CredentialError::TaskAborted)?
}

/// Run `verify` on the blocking pool. A panicked or aborted task counts as a mismatch.
pub async fn verify_blocking<H: CredentialHasher>(
    hasher: &Arc<H>,
    raw: SecretString,
    hashed: String,
) -> bool {
    let hasher = Arc::clone(hasher);
    tokio::task::spawn_blocking(move || hasher.verify(raw.expose_secret(), &hashed))
        .await
        .unwrap_or(false)
}

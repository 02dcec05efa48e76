//! Argon2id password hashing.
//!
//! Implements the `CredentialHasher` trait from `pronouns-core` using the
//! `argon2` crate (RustCrypto ecosystem). Output is a PHC string carrying the
//! algorithm, parameters and salt, so verification needs nothing else.

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use rand::rngs::OsRng;

use pronouns_core::service::credential::CredentialHasher;
use pronouns_types::error::CredentialError;

/// Parsed with the default parameters, so verifying against it costs the same
/// as verifying a real account's hash.
const DECOY_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHRzb21lc2FsdA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

/// Argon2id with the crate's default (OWASP) parameters and a fresh salt per hash.
#[derive(Default)]
pub struct Argon2CredentialHasher {
    argon2: Argon2<'static>,
}

impl Argon2CredentialHasher {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialHasher for Argon2CredentialHasher {
    fn hash(&self, raw: &str) -> Result<String, CredentialError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(raw.as_bytes(), &salt)
            .map(|phc| phc.to_string())
            .map_err(|_| CredentialError::HashFailed)
    }

    fn verify(&self, raw: &str, hashed: &str) -> bool {
        match PasswordHash::new(hashed) {
            Ok(parsed) => self
                .argon2
                .verify_password(raw.as_bytes(), &parsed)
                .is_ok(),
            Err(_) => false,
        }
    }

    fn decoy_hash(&self) -> &str {
        DECOY_HASH
    }
}

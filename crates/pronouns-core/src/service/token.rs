//! TokenService trait for issuing and verifying identity tokens.
//!
//! The HS256 JWT adapter lives in pronouns-infra.

use pronouns_types::auth::{Identity, IssuedToken};
use pronouns_types::error::AuthError;
use pronouns_types::id::AccountId;

/// Signed, time-limited, self-contained identity tokens.
///
/// `verify` never consults storage. Bad signature, malformed input and
/// expiry all yield `AuthError::InvalidToken`.
pub trait TokenService: Send + Sync {
    /// Issue a token for the given account.
    fn issue(&self, account_id: &AccountId, email: &str) -> Result<IssuedToken, AuthError>;

    /// Verify a token and return the identity it carries.
    fn verify(&self, token: &str) -> Result<Identity, AuthError>;
}

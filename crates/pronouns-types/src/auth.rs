use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize, Serializer};

use crate::id::AccountId;

/// Identity resolved from a verified token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub account_id: AccountId,
    pub email: String,
}

/// Claims carried inside a signed token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Account id.
    pub sub: String,
    pub email: String,
    /// Issued at (unix seconds).
    pub iat: i64,
    /// Expires at (unix seconds).
    pub exp: i64,
}

/// A freshly issued token plus its expiry.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuedToken {
    /// Exposed only when serialized into the login response.
    #[serde(serialize_with = "serialize_exposed")]
    pub token: SecretString,
    pub token_type: &'static str,
    pub expires_at: DateTime<Utc>,
}

impl IssuedToken {
    pub fn bearer(token: String, expires_at: DateTime<Utc>) -> Self {
        Self {
            token: SecretString::from(token),
            token_type: "Bearer",
            expires_at,
        }
    }
}

fn serialize_exposed<S: Serializer>(secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(secret.expose_secret())
}

/// Login payload.
#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<SecretString>,
}

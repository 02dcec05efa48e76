//! HS256 identity tokens.
//!
//! Implements `TokenService` from `pronouns-core` with `jsonwebtoken`. A token
//! is valid when its signature matches and `exp` has not passed; there is no
//! revocation list.

use chrono::{TimeDelta, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use rand::RngCore;
use rand::rngs::OsRng;
use secrecy::ExposeSecret;

use pronouns_core::service::token::TokenService;
use pronouns_types::auth::{Identity, IssuedToken, TokenClaims};
use pronouns_types::config::{AuthConfig, parse_lifetime};
use pronouns_types::error::AuthError;
use pronouns_types::id::AccountId;

/// Fallback lifetime when the configured one does not parse.
const DEFAULT_LIFETIME_HOURS: i64 = 7;

/// Length of the per-process secret generated when none is configured.
const GENERATED_SECRET_LEN: usize = 32;

/// Signs and verifies HS256 tokens with one process-wide secret.
pub struct JwtTokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    lifetime: TimeDelta,
}

impl JwtTokenService {
    pub fn new(secret: &[u8], lifetime: TimeDelta) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            lifetime,
        }
    }

    /// Build from configuration.
    ///
    /// A missing or blank secret is replaced by random bytes, so tokens stop
    /// verifying after a restart. An unparsable or out-of-range lifetime falls
    /// back to 7 hours.
    pub fn from_config(auth: &AuthConfig) -> Self {
        let lifetime = match parse_lifetime(&auth.token_lifetime) {
            Ok(lifetime) => lifetime,
            Err(err) => {
                tracing::warn!("{err}, using {DEFAULT_LIFETIME_HOURS}h token lifetime");
                TimeDelta::hours(DEFAULT_LIFETIME_HOURS)
            }
        };

        let secret = auth
            .jwt_secret
            .as_ref()
            .map(|s| s.expose_secret())
            .filter(|s| !s.trim().is_empty());
        match secret {
            Some(secret) => Self::new(secret.as_bytes(), lifetime),
            None => {
                tracing::warn!(
                    "no JWT secret configured; generated a random one, tokens will not survive a restart"
                );
                let mut secret = [0u8; GENERATED_SECRET_LEN];
                OsRng.fill_bytes(&mut secret);
                Self::new(&secret, lifetime)
            }
        }
    }

    pub fn lifetime(&self) -> TimeDelta {
        self.lifetime
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, account_id: &AccountId, email: &str) -> Result<IssuedToken, AuthError> {
        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(self.lifetime)
            .ok_or_else(|| AuthError::Issue("token lifetime overflows the clock".to_string()))?;
        let claims = TokenClaims {
            sub: account_id.to_string(),
            email: email.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::Issue(e.to_string()))?;

        Ok(IssuedToken::bearer(token, expires_at))
    }

    fn verify(&self, token: &str) -> Result<Identity, AuthError> {
        let data = decode::<TokenClaims>(token, &self.decoding, &self.validation).map_err(|e| {
            tracing::debug!(error = %e, "token rejected");
            AuthError::InvalidToken
        })?;

        let account_id = data
            .claims
            .sub
            .parse::<AccountId>()
            .map_err(|_| AuthError::InvalidToken)?;

        Ok(Identity {
            account_id,
            email: data.claims.email,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    const SECRET: &[u8] = b"test-secret-with-enough-entropy";

    fn service() -> JwtTokenService {
        JwtTokenService::new(SECRET, TimeDelta::hours(7))
    }

    fn forge(secret: &[u8], sub: &str, exp: i64) -> String {
        let claims = TokenClaims {
            sub: sub.to_string(),
            email: "sam@example.com".to_string(),
            iat: exp - 60,
            exp,
        };
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret),
        )
        .unwrap()
    }

    #[test]
    fn test_issue_then_verify() {
        let tokens = service();
        let id = AccountId::new();

        let issued = tokens.issue(&id, "sam@example.com").unwrap();
        assert_eq!(issued.token_type, "Bearer");
        let remaining = issued.expires_at - Utc::now();
        assert!(remaining > TimeDelta::hours(6) && remaining <= TimeDelta::hours(7));

        let identity = tokens.verify(issued.token.expose_secret()).unwrap();
        assert_eq!(identity.account_id, id);
        assert_eq!(identity.email, "sam@example.com");
    }

    #[test]
    fn test_expired_token_rejected() {
        let tokens = service();
        let past = Utc::now().timestamp() - 10;
        let token = forge(SECRET, &AccountId::new().to_string(), past);

        assert!(matches!(
            tokens.verify(&token).unwrap_err(),
            AuthError::InvalidToken
        ));
    }

    #[test]
    fn test_other_secret_rejected() {
        let issued = JwtTokenService::new(b"another-secret", TimeDelta::hours(1))
            .issue(&AccountId::new(), "sam@example.com")
            .unwrap();

        assert!(matches!(
            service().verify(issued.token.expose_secret()).unwrap_err(),
            AuthError::InvalidToken
        ));
    }

    #[test]
    fn test_corrupted_token_rejected() {
        let tokens = service();
        let issued = tokens.issue(&AccountId::new(), "sam@example.com").unwrap();
        let other = tokens.issue(&AccountId::new(), "eve@example.com").unwrap();

        // Other token's payload under the original signature.
        let parts: Vec<&str> = issued.token.expose_secret().split('.').collect();
        let other_parts: Vec<&str> = other.token.expose_secret().split('.').collect();
        let tampered = format!("{}.{}.{}", parts[0], other_parts[1], parts[2]);

        for token in [tampered.as_str(), "", "abc", "a.b.c", "Bearer x.y.z"] {
            assert!(matches!(
                tokens.verify(token).unwrap_err(),
                AuthError::InvalidToken
            ));
        }
    }

    #[test]
    fn test_non_uuid_subject_rejected() {
        let future = Utc::now().timestamp() + 3600;
        let token = forge(SECRET, "42", future);
        assert!(matches!(
            service().verify(&token).unwrap_err(),
            AuthError::InvalidToken
        ));
    }

    #[test]
    fn test_from_config_fallbacks() {
        let auth = AuthConfig {
            jwt_secret: None,
            token_lifetime: "fortnight".to_string(),
        };
        let tokens = JwtTokenService::from_config(&auth);
        assert_eq!(tokens.lifetime(), TimeDelta::hours(7));

        let issued = tokens.issue(&AccountId::new(), "sam@example.com").unwrap();
        assert!(tokens.verify(issued.token.expose_secret()).is_ok());
        assert!(service().verify(issued.token.expose_secret()).is_err());
    }

    #[test]
    fn test_from_config_uses_secret_and_lifetime() {
        let auth = AuthConfig {
            jwt_secret: Some(SecretString::from(String::from_utf8(SECRET.to_vec()).unwrap())),
            token_lifetime: "1d".to_string(),
        };
        let tokens = JwtTokenService::from_config(&auth);
        assert_eq!(tokens.lifetime(), TimeDelta::days(1));

        let issued = tokens.issue(&AccountId::new(), "sam@example.com").unwrap();
        assert!(service().verify(issued.token.expose_secret()).is_ok());
    }

    #[test]
    fn test_overflowing_lifetime_is_an_issue_error() {
        let tokens = JwtTokenService::new(SECRET, TimeDelta::MAX);
        assert!(matches!(
            tokens.issue(&AccountId::new(), "sam@example.com").unwrap_err(),
            AuthError::Issue(_)
        ));
    }

    #[test]
    fn test_from_config_out_of_range_lifetime_falls_back() {
        let auth = AuthConfig {
            jwt_secret: Some(SecretString::from("configured-secret")),
            token_lifetime: "100000000d".to_string(),
        };
        let tokens = JwtTokenService::from_config(&auth);
        assert_eq!(tokens.lifetime(), TimeDelta::hours(7));
        assert!(tokens.issue(&AccountId::new(), "sam@example.com").is_ok());
    }
}

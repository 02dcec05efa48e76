//! Bearer token authentication extractor.
//!
//! Reads `Authorization: Bearer <token>` and verifies the token with the
//! token service only; the account table is never consulted here, so a token
//! may outlive its account.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use pronouns_types::auth::Identity;

use crate::http::error::AppError;
use crate::state::AppState;

/// Same message for every rejection so callers cannot tell why.
pub const UNAUTHENTICATED_MESSAGE: &str =
    "Authentication required. Provide a valid token via 'Authorization: Bearer <token>'.";

/// Identity of the caller. Extracting this validates the bearer token.
pub struct AuthenticatedAccount(pub Identity);

impl FromRequestParts<AppState> for AuthenticatedAccount {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or_else(unauthenticated)?;

        let identity = state.auth_service.verify_token(token).map_err(|e| {
            tracing::debug!(error = %e, "bearer token rejected");
            unauthenticated()
        })?;

        Ok(AuthenticatedAccount(identity))
    }
}

fn unauthenticated() -> AppError {
    AppError::Unauthorized(UNAUTHENTICATED_MESSAGE.to_string())
}

/// The token part of a `Bearer` authorization header, if any.
fn bearer_token(parts: &Parts) -> Option<&str> {
    let header = parts.headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then_some(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with(auth: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/api/v1/users/me");
        if let Some(value) = auth {
            builder = builder.header(AUTHORIZATION, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn test_bearer_token_extraction() {
        assert_eq!(bearer_token(&parts_with(Some("Bearer abc.def"))), Some("abc.def"));
        assert_eq!(bearer_token(&parts_with(None)), None);
        assert_eq!(bearer_token(&parts_with(Some("Basic dXNlcjpwYXNz"))), None);
        assert_eq!(bearer_token(&parts_with(Some("Bearer   "))), None);
    }
}

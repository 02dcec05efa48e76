//! Application error type mapping to HTTP status codes and envelope format.
//!
//! Status codes come from each domain error's [`ErrorKind`]; message text is
//! never inspected. Internal failures are logged with their detail and
//! answered with a generic message.
//!
//! An [`AppError`] response carries an [`ErrorReport`] extension instead of a
//! body; the request-context middleware renders it into the envelope with
//! the request's own id and timing.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use pronouns_types::error::{AccountError, AuthError, ErrorKind, PronounError, PronounSetError};

use crate::http::response::{ApiResponse, RequestContext};

/// Message returned for every 500.
const INTERNAL_MESSAGE: &str = "internal server error";

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    Pronoun(PronounError),
    PronounSet(PronounSetError),
    Account(AccountError),
    Auth(AuthError),
    /// Authentication gate failure.
    Unauthorized(String),
    /// Request could not be parsed.
    Validation(String),
    /// Unknown route resource (e.g. an unparsable path id).
    NotFound(String),
}

impl From<PronounError> for AppError {
    fn from(e: PronounError) -> Self {
        AppError::Pronoun(e)
    }
}

impl From<PronounSetError> for AppError {
    fn from(e: PronounSetError) -> Self {
        AppError::PronounSet(e)
    }
}

impl From<AccountError> for AppError {
    fn from(e: AccountError) -> Self {
        AppError::Account(e)
    }
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        AppError::Auth(e)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl AppError {
    fn kind(&self) -> ErrorKind {
        match self {
            AppError::Pronoun(e) => e.kind(),
            AppError::PronounSet(e) => e.kind(),
            AppError::Account(e) => e.kind(),
            AppError::Auth(e) => e.kind(),
            AppError::Unauthorized(_) => ErrorKind::Unauthorized,
            AppError::Validation(_) => ErrorKind::Validation,
            AppError::NotFound(_) => ErrorKind::NotFound,
        }
    }

    fn message(&self) -> String {
        match self {
            AppError::Pronoun(e) => e.to_string(),
            AppError::PronounSet(e) => e.to_string(),
            AppError::Account(e) => e.to_string(),
            AppError::Auth(AuthError::InvalidCredentials) => "Invalid credentials.".to_string(),
            AppError::Auth(e) => e.to_string(),
            AppError::Unauthorized(msg) | AppError::Validation(msg) | AppError::NotFound(msg) => {
                msg.clone()
            }
        }
    }
}

fn status_and_code(kind: ErrorKind) -> (StatusCode, &'static str) {
    match kind {
        ErrorKind::Validation => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
        ErrorKind::Conflict => (StatusCode::CONFLICT, "CONFLICT"),
        ErrorKind::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
        ErrorKind::Unauthorized => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
        ErrorKind::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
    }
}

/// Client-facing code and message of a failed request.
#[derive(Debug, Clone)]
pub struct ErrorReport {
    pub code: &'static str,
    pub message: String,
}

impl ErrorReport {
    pub fn envelope(&self, ctx: &RequestContext) -> ApiResponse<()> {
        ctx.error(self.code, &self.message)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let kind = self.kind();
        let (status, code) = status_and_code(kind);

        let message = if kind == ErrorKind::Internal {
            tracing::error!(error = %self.message(), "request failed");
            INTERNAL_MESSAGE.to_string()
        } else {
            self.message()
        };

        let mut response = status.into_response();
        response.extensions_mut().insert(ErrorReport { code, message });
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_from_kind() {
        let cases = [
            (AppError::from(PronounError::ValueConflict("xe".into())), StatusCode::CONFLICT),
            (AppError::from(PronounError::PronounSetNotFound), StatusCode::BAD_REQUEST),
            (AppError::from(PronounSetError::NotFound), StatusCode::NOT_FOUND),
            (AppError::from(AccountError::EmailConflict), StatusCode::CONFLICT),
            (AppError::from(AuthError::InvalidCredentials), StatusCode::UNAUTHORIZED),
            (AppError::Validation("bad json".into()), StatusCode::BAD_REQUEST),
            (
                AppError::from(AccountError::StorageError("disk full".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn test_internal_detail_not_exposed() {
        let err = AppError::from(PronounError::StorageError("sqlite locked at /var/db".into()));
        assert_eq!(err.kind(), ErrorKind::Internal);
        assert!(err.message().contains("sqlite locked"));

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let report = response.extensions().get::<ErrorReport>().unwrap();
        assert_eq!(report.code, "INTERNAL_ERROR");
        assert_eq!(report.message, INTERNAL_MESSAGE);
    }

    #[test]
    fn test_invalid_credentials_message() {
        assert_eq!(
            AppError::from(AuthError::InvalidCredentials).message(),
            "Invalid credentials."
        );
    }
}

use thiserror::Error;

/// Coarse error taxonomy shared by every domain error.
///
/// The HTTP layer maps this to a status code; it never needs to look at the
/// message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Conflict,
    NotFound,
    Unauthorized,
    Internal,
}

/// Errors related to pronoun operations.
#[derive(Debug, Error)]
pub enum PronounError {
    #[error("pronoun not found")]
    NotFound,

    #[error("{0}")]
    Validation(String),

    #[error("pronoun set not found")]
    PronounSetNotFound,

    #[error("pronoun value '{0}' already exists")]
    ValueConflict(String),

    #[error("storage error: {0}")]
    StorageError(String),
}

impl PronounError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PronounError::NotFound => ErrorKind::NotFound,
            PronounError::Validation(_) | PronounError::PronounSetNotFound => {
                ErrorKind::Validation
            }
            PronounError::ValueConflict(_) => ErrorKind::Conflict,
            PronounError::StorageError(_) => ErrorKind::Internal,
        }
    }
}

/// Errors related to pronoun set operations.
#[derive(Debug, Error)]
pub enum PronounSetError {
    #[error("pronoun set not found")]
    NotFound,

    #[error("{0}")]
    Validation(String),

    #[error("pronoun set '{0}' already exists")]
    NameConflict(String),

    #[error("storage error: {0}")]
    StorageError(String),
}

impl PronounSetError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PronounSetError::NotFound => ErrorKind::NotFound,
            PronounSetError::Validation(_) => ErrorKind::Validation,
            PronounSetError::NameConflict(_) => ErrorKind::Conflict,
            PronounSetError::StorageError(_) => ErrorKind::Internal,
        }
    }
}

/// Errors related to account operations.
#[derive(Debug, Error)]
pub enum AccountError {
    #[error("account not found")]
    NotFound,

    #[error("{0}")]
    Validation(String),

    #[error("email already in use")]
    EmailConflict,

    #[error("pronoun set not found")]
    PronounSetNotFound,

    #[error("credential error: {0}")]
    Credential(#[from] CredentialError),

    #[error("storage error: {0}")]
    StorageError(String),
}

impl AccountError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AccountError::NotFound => ErrorKind::NotFound,
            AccountError::Validation(_) | AccountError::PronounSetNotFound => {
                ErrorKind::Validation
            }
            AccountError::EmailConflict => ErrorKind::Conflict,
            AccountError::Credential(_) | AccountError::StorageError(_) => ErrorKind::Internal,
        }
    }
}

/// Errors from the login flow and token handling.
///
/// `InvalidCredentials` covers both unknown email and wrong password, and
/// `InvalidToken` covers bad signature, malformed token and expiry.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{0}")]
    Validation(String),

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("missing bearer token")]
    MissingToken,

    #[error("invalid token")]
    InvalidToken,

    #[error("token issuance failed: {0}")]
    Issue(String),

    #[error("storage error: {0}")]
    StorageError(String),
}

impl AuthError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Validation(_) => ErrorKind::Validation,
            AuthError::InvalidCredentials | AuthError::MissingToken | AuthError::InvalidToken => {
                ErrorKind::Unauthorized
            }
            AuthError::Issue(_) | AuthError::StorageError(_) => ErrorKind::Internal,
        }
    }
}

/// Errors from password hashing.
///
/// Never carries the raw password.
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("password hashing failed")]
    HashFailed,

    #[error("hashing task aborted")]
    TaskAborted,
}

/// Errors from repository operations (used by trait definitions in pronouns-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("foreign key violation: {0}")]
    ForeignKey(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pronoun_error_kinds() {
        assert_eq!(PronounError::NotFound.kind(), ErrorKind::NotFound);
        assert_eq!(PronounError::PronounSetNotFound.kind(), ErrorKind::Validation);
        assert_eq!(
            PronounError::ValueConflict("she-her".to_string()).kind(),
            ErrorKind::Conflict
        );
        assert_eq!(
            PronounError::StorageError("disk".to_string()).kind(),
            ErrorKind::Internal
        );
    }

    #[test]
    fn test_auth_errors_collapse_to_unauthorized() {
        for err in [
            AuthError::InvalidCredentials,
            AuthError::MissingToken,
            AuthError::InvalidToken,
        ] {
            assert_eq!(err.kind(), ErrorKind::Unauthorized);
        }
    }

    #[test]
    fn test_account_error_display() {
        assert_eq!(AccountError::EmailConflict.to_string(), "email already in use");
        assert_eq!(AccountError::EmailConflict.kind(), ErrorKind::Conflict);
        assert_eq!(
            AccountError::from(CredentialError::HashFailed).kind(),
            ErrorKind::Internal
        );
    }

    #[test]
    fn test_repository_error_display() {
        let err = RepositoryError::Query("syntax error".to_string());
        assert_eq!(err.to_string(), "query error: syntax error");
    }
}

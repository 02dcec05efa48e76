//! Authentication service: registration, login and identity resolution.

use std::sync::Arc;

use pronouns_types::account::{AccountView, RegisterRequest};
use pronouns_types::auth::{Identity, IssuedToken, LoginRequest};
use pronouns_types::error::{AccountError, AuthError};
use secrecy::ExposeSecret;

use crate::repository::account::AccountRepository;
use crate::repository::pronoun_set::PronounSetRepository;
use crate::service::account::AccountService;
use crate::service::credential::CredentialHasher;
use crate::service::token::TokenService;

pub struct AuthService<A, S, H, T>
where
    A: AccountRepository,
    S: PronounSetRepository,
    H: CredentialHasher,
    T: TokenService,
{
    accounts: Arc<AccountService<A, S, H>>,
    tokens: Arc<T>,
}

impl<A, S, H, T> AuthService<A, S, H, T>
where
    A: AccountRepository,
    S: PronounSetRepository,
    H: CredentialHasher,
    T: TokenService,
{
    pub fn new(accounts: Arc<AccountService<A, S, H>>, tokens: Arc<T>) -> Self {
        Self { accounts, tokens }
    }

    /// Self-service registration. Same rules as an admin-created account.
    pub async fn register(&self, request: RegisterRequest) -> Result<AccountView, AccountError> {
        self.accounts.create_account(request).await
    }

    /// Exchange email and password for a signed token.
    ///
    /// Unknown email and wrong password both yield `InvalidCredentials`. Both
    /// paths run exactly one verification; an unknown email is checked
    /// against the hasher's decoy hash.
    pub async fn login(&self, request: LoginRequest) -> Result<IssuedToken, AuthError> {
        let email = request
            .email
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty())
            .ok_or_else(|| AuthError::Validation("email is required".to_string()))?;
        let password = request
            .password
            .filter(|p| !p.expose_secret().is_empty())
            .ok_or_else(|| AuthError::Validation("password is required".to_string()))?;

        let account = self
            .accounts
            .find_by_email(&email)
            .await
            .map_err(|e| AuthError::StorageError(e.to_string()))?;

        let hashed = match &account {
            Some(account) => account.password_hash.clone(),
            None => self.accounts.decoy_hash(),
        };
        let verified = self.accounts.verify_password(password, hashed).await;

        match account {
            Some(account) if verified => {
                let issued = self.tokens.issue(&account.id, &account.email)?;
                tracing::info!(account_id = %account.id, "login succeeded");
                Ok(issued)
            }
            Some(account) => {
                tracing::warn!(account_id = %account.id, "login failed: wrong password");
                Err(AuthError::InvalidCredentials)
            }
            None => {
                tracing::warn!("login failed: unknown email");
                Err(AuthError::InvalidCredentials)
            }
        }
    }

    /// Verify a bearer token.
    pub fn verify_token(&self, token: &str) -> Result<Identity, AuthError> {
        self.tokens.verify(token)
    }

    /// The account behind a verified identity. A token that outlives its
    /// account reports `NotFound`.
    pub async fn current_account(&self, identity: &Identity) -> Result<AccountView, AccountError> {
        self.accounts.get_account(&identity.account_id).await
    }
}

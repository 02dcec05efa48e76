//! Account management service.
//!
//! Owns the password-hashing discipline for stored accounts and the
//! projection to [`AccountView`]. Uniqueness of email and existence of the
//! linked pronoun set are enforced by the store in the same write, so there
//! is no read-then-write window.

use std::collections::HashMap;
use std::sync::Arc;

use pronouns_types::account::{
    Account, AccountPatch, AccountView, RegisterRequest, UpdateAccountRequest,
};
use pronouns_types::error::{AccountError, RepositoryError};
use pronouns_types::id::{AccountId, PronounSetId};
use pronouns_types::pronoun::PronounSet;
use secrecy::{ExposeSecret, SecretString};

use crate::repository::account::AccountRepository;
use crate::repository::pronoun_set::PronounSetRepository;
use crate::service::credential::{CredentialHasher, hash_blocking, verify_blocking};
use crate::service::required;

pub struct AccountService<A: AccountRepository, S: PronounSetRepository, H: CredentialHasher> {
    account_repo: A,
    set_repo: S,
    hasher: Arc<H>,
}

fn map_write_error(err: RepositoryError) -> AccountError {
    match err {
        RepositoryError::Conflict(_) => AccountError::EmailConflict,
        RepositoryError::ForeignKey(_) => AccountError::PronounSetNotFound,
        RepositoryError::NotFound => AccountError::NotFound,
        other => AccountError::StorageError(other.to_string()),
    }
}

fn storage(err: RepositoryError) -> AccountError {
    AccountError::StorageError(err.to_string())
}

/// Trimmed email with a non-empty local part and domain.
fn validate_email(email: Option<String>) -> Result<String, AccountError> {
    let email = required(email, "email").map_err(AccountError::Validation)?;
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(email),
        _ => Err(AccountError::Validation(format!("invalid email: '{email}'"))),
    }
}

/// Passwords are hashed exactly as given; only emptiness is rejected.
fn validate_password(password: Option<SecretString>) -> Result<SecretString, AccountError> {
    match password {
        Some(p) if !p.expose_secret().is_empty() => Ok(p),
        _ => Err(AccountError::Validation("password is required".to_string())),
    }
}

impl<A: AccountRepository, S: PronounSetRepository, H: CredentialHasher> AccountService<A, S, H> {
    pub fn new(account_repo: A, set_repo: S, hasher: Arc<H>) -> Self {
        Self {
            account_repo,
            set_repo,
            hasher,
        }
    }

    async fn resolve_set(&self, id: Option<&PronounSetId>) -> Result<Option<PronounSet>, AccountError> {
        match id {
            Some(id) => self.set_repo.get_by_id(id).await.map_err(storage),
            None => Ok(None),
        }
    }

    async fn view(&self, account: &Account) -> Result<AccountView, AccountError> {
        let set = self.resolve_set(account.pronoun_set_id.as_ref()).await?;
        Ok(AccountView::new(account, set))
    }

    /// Create an account from a registration payload.
    pub async fn create_account(&self, request: RegisterRequest) -> Result<AccountView, AccountError> {
        let email = validate_email(request.email)?;
        let password = validate_password(request.password)?;
        let username = required(request.username, "username").map_err(AccountError::Validation)?;

        let password_hash = hash_blocking(&self.hasher, password).await?;

        let now = chrono::Utc::now();
        let account = Account {
            id: AccountId::new(),
            email,
            username,
            password_hash,
            pronoun_set_id: request.pronoun_set_id,
            created_at: now,
            updated_at: now,
        };

        let created = self
            .account_repo
            .create(&account)
            .await
            .map_err(map_write_error)?;

        tracing::info!(id = %created.id, "account created");
        self.view(&created).await
    }

    /// Get an account view by ID.
    pub async fn get_account(&self, id: &AccountId) -> Result<AccountView, AccountError> {
        let account = self
            .account_repo
            .get_by_id(id)
            .await
            .map_err(storage)?
            .ok_or(AccountError::NotFound)?;
        self.view(&account).await
    }

    /// List all account views.
    pub async fn list_accounts(&self) -> Result<Vec<AccountView>, AccountError> {
        let accounts = self.account_repo.list().await.map_err(storage)?;

        let mut sets: HashMap<PronounSetId, Option<PronounSet>> = HashMap::new();
        let mut views = Vec::with_capacity(accounts.len());
        for account in &accounts {
            let set = match account.pronoun_set_id {
                Some(set_id) => match sets.get(&set_id) {
                    Some(cached) => cached.clone(),
                    None => {
                        let resolved = self.resolve_set(Some(&set_id)).await?;
                        sets.insert(set_id, resolved.clone());
                        resolved
                    }
                },
                None => None,
            };
            views.push(AccountView::new(account, set));
        }

        Ok(views)
    }

    /// Update the fields present in the request. A new password is re-hashed
    /// before the patch is written; absent fields are left to the store.
    pub async fn update_account(
        &self,
        id: &AccountId,
        request: UpdateAccountRequest,
    ) -> Result<AccountView, AccountError> {
        let mut patch = AccountPatch::touch(chrono::Utc::now());
        if request.email.is_some() {
            patch.email = Some(validate_email(request.email)?);
        }
        if request.username.is_some() {
            patch.username =
                Some(required(request.username, "username").map_err(AccountError::Validation)?);
        }
        if request.password.is_some() {
            let password = validate_password(request.password)?;
            patch.password_hash = Some(hash_blocking(&self.hasher, password).await?);
        }
        patch.pronoun_set_id = request.pronoun_set_id;

        let updated = self
            .account_repo
            .update(id, &patch)
            .await
            .map_err(map_write_error)?;

        tracing::info!(%id, "account updated");
        self.view(&updated).await
    }

    /// Hard-delete an account.
    pub async fn delete_account(&self, id: &AccountId) -> Result<(), AccountError> {
        self.account_repo.delete(id).await.map_err(map_write_error)?;
        tracing::info!(%id, "account deleted");
        Ok(())
    }

    /// Stored record for a login attempt, hash included. Crate-internal.
    pub(crate) async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountError> {
        self.account_repo.get_by_email(email).await.map_err(storage)
    }

    /// Compare a raw password with a stored hash on the blocking pool.
    pub(crate) async fn verify_password(&self, raw: SecretString, hashed: String) -> bool {
        verify_blocking(&self.hasher, raw, hashed).await
    }

    /// Hash to verify against when no account matches a login email.
    pub(crate) fn decoy_hash(&self) -> String {
        self.hasher.decoy_hash().to_string()
    }
}

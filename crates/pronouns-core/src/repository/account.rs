//! Account repository trait definition.

use pronouns_types::account::{Account, AccountPatch};
use pronouns_types::error::RepositoryError;
use pronouns_types::id::AccountId;

/// Repository trait for account persistence.
///
/// Returns full [`Account`] records including the password hash; projecting
/// to `AccountView` is the service's job.
pub trait AccountRepository: Send + Sync {
    /// Insert an account. `Conflict` on duplicate email, `ForeignKey` on unknown set.
    fn create(
        &self,
        account: &Account,
    ) -> impl std::future::Future<Output = Result<Account, RepositoryError>> + Send;

    /// Get an account by its unique ID.
    fn get_by_id(
        &self,
        id: &AccountId,
    ) -> impl std::future::Future<Output = Result<Option<Account>, RepositoryError>> + Send;

    /// Get an account by email (case-insensitive).
    fn get_by_email(
        &self,
        email: &str,
    ) -> impl std::future::Future<Output = Result<Option<Account>, RepositoryError>> + Send;

    /// List all accounts, oldest first.
    fn list(&self) -> impl std::future::Future<Output = Result<Vec<Account>, RepositoryError>> + Send;

    /// Apply a patch in one statement and return the row as stored. Same
    /// constraint errors as `create`, plus `NotFound` for an unknown id.
    fn update(
        &self,
        id: &AccountId,
        patch: &AccountPatch,
    ) -> impl std::future::Future<Output = Result<Account, RepositoryError>> + Send;

    /// Permanently delete an account. `NotFound` if the id does not exist.
    fn delete(
        &self,
        id: &AccountId,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}

//! Pronoun repository trait definition.

use pronouns_types::error::RepositoryError;
use pronouns_types::id::{PronounId, PronounSetId};
use pronouns_types::pronoun::{Pronoun, PronounPatch};

/// Repository trait for pronoun persistence.
///
/// Implementations live in pronouns-infra (e.g., SqlitePronounRepository).
/// Uses native async fn in traits (Rust 2024 edition, no async_trait macro).
pub trait PronounRepository: Send + Sync {
    /// Insert a pronoun. `Conflict` on duplicate value, `ForeignKey` on unknown set.
    fn create(
        &self,
        pronoun: &Pronoun,
    ) -> impl std::future::Future<Output = Result<Pronoun, RepositoryError>> + Send;

    /// Get a pronoun by its unique ID.
    fn get_by_id(
        &self,
        id: &PronounId,
    ) -> impl std::future::Future<Output = Result<Option<Pronoun>, RepositoryError>> + Send;

    /// List every pronoun, oldest first.
    fn list(&self) -> impl std::future::Future<Output = Result<Vec<Pronoun>, RepositoryError>> + Send;

    /// List the pronouns belonging to one set.
    fn list_by_set(
        &self,
        set_id: &PronounSetId,
    ) -> impl std::future::Future<Output = Result<Vec<Pronoun>, RepositoryError>> + Send;

    /// Apply a patch in one statement and return the row as stored. Columns
    /// the patch leaves unset keep their current value. `NotFound` if the id
    /// does not exist.
    fn update(
        &self,
        id: &PronounId,
        patch: &PronounPatch,
    ) -> impl std::future::Future<Output = Result<Pronoun, RepositoryError>> + Send;

    /// Permanently delete a pronoun. `NotFound` if the id does not exist.
    fn delete(
        &self,
        id: &PronounId,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}

//! Pronoun set repository trait definition.

use pronouns_types::error::RepositoryError;
use pronouns_types::id::PronounSetId;
use pronouns_types::pronoun::PronounSet;

/// Repository trait for pronoun set persistence.
pub trait PronounSetRepository: Send + Sync {
    /// Create a new set. `Conflict` if the name is taken.
    fn create(
        &self,
        set: &PronounSet,
    ) -> impl std::future::Future<Output = Result<PronounSet, RepositoryError>> + Send;

    /// Get a set by its unique ID.
    fn get_by_id(
        &self,
        id: &PronounSetId,
    ) -> impl std::future::Future<Output = Result<Option<PronounSet>, RepositoryError>> + Send;

    /// List all sets ordered by name.
    fn list(&self) -> impl std::future::Future<Output = Result<Vec<PronounSet>, RepositoryError>> + Send;

    /// Permanently delete a set. Its pronouns go with it; accounts are unlinked.
    fn delete(
        &self,
        id: &PronounSetId,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}

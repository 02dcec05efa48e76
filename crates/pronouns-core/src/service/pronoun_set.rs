//! Pronoun set service: the minimal lifecycle of the sets that pronouns and
//! accounts point at.

use pronouns_types::error::{PronounSetError, RepositoryError};
use pronouns_types::id::PronounSetId;
use pronouns_types::pronoun::{CreatePronounSetRequest, PronounSet, PronounSetDetail};

use crate::repository::pronoun::PronounRepository;
use crate::repository::pronoun_set::PronounSetRepository;
use crate::service::required;

pub struct PronounSetService<S: PronounSetRepository, P: PronounRepository> {
    set_repo: S,
    pronoun_repo: P,
}

impl<S: PronounSetRepository, P: PronounRepository> PronounSetService<S, P> {
    pub fn new(set_repo: S, pronoun_repo: P) -> Self {
        Self {
            set_repo,
            pronoun_repo,
        }
    }

    pub async fn create_set(&self, request: CreatePronounSetRequest) -> Result<PronounSet, PronounSetError> {
        let name = required(request.name, "name").map_err(PronounSetError::Validation)?;
        let now = chrono::Utc::now();
        let set = PronounSet {
            id: PronounSetId::new(),
            name,
            created_at: now,
            updated_at: now,
        };

        let created = self.set_repo.create(&set).await.map_err(|e| match e {
            RepositoryError::Conflict(_) => PronounSetError::NameConflict(set.name.clone()),
            other => PronounSetError::StorageError(other.to_string()),
        })?;

        tracing::info!(id = %created.id, name = %created.name, "pronoun set created");
        Ok(created)
    }

    pub async fn list_sets(&self) -> Result<Vec<PronounSet>, PronounSetError> {
        self.set_repo
            .list()
            .await
            .map_err(|e| PronounSetError::StorageError(e.to_string()))
    }

    pub async fn get_set(&self, id: &PronounSetId) -> Result<PronounSet, PronounSetError> {
        self.set_repo
            .get_by_id(id)
            .await
            .map_err(|e| PronounSetError::StorageError(e.to_string()))?
            .ok_or(PronounSetError::NotFound)
    }

    /// A set together with its pronouns.
    pub async fn get_set_detail(&self, id: &PronounSetId) -> Result<PronounSetDetail, PronounSetError> {
        let set = self.get_set(id).await?;
        let pronouns = self
            .pronoun_repo
            .list_by_set(id)
            .await
            .map_err(|e| PronounSetError::StorageError(e.to_string()))?;
        Ok(PronounSetDetail { set, pronouns })
    }

    /// Delete a set. Its pronouns are removed and linked accounts unlinked by the store.
    pub async fn delete_set(&self, id: &PronounSetId) -> Result<(), PronounSetError> {
        self.set_repo.delete(id).await.map_err(|e| match e {
            RepositoryError::NotFound => PronounSetError::NotFound,
            other => PronounSetError::StorageError(other.to_string()),
        })?;

        tracing::info!(%id, "pronoun set deleted");
        Ok(())
    }
}

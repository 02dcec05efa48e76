//! Pronoun management service.
//!
//! Validates input, derives the `value` slug from the label and maps store
//! constraint failures onto [`PronounError`].

use pronouns_types::error::{PronounError, RepositoryError};
use pronouns_types::id::{PronounId, PronounSetId};
use pronouns_types::pronoun::{
    CreatePronounRequest, Pronoun, PronounPatch, UpdatePronounRequest, normalize_label,
};
use pronouns_types::update::FieldUpdate;

use crate::repository::pronoun::PronounRepository;
use crate::service::required;

/// Service over the pronoun vocabulary.
pub struct PronounService<P: PronounRepository> {
    repo: P,
}

fn map_write_error(err: RepositoryError, value: &str) -> PronounError {
    match err {
        RepositoryError::Conflict(_) => PronounError::ValueConflict(value.to_string()),
        RepositoryError::ForeignKey(_) => PronounError::PronounSetNotFound,
        RepositoryError::NotFound => PronounError::NotFound,
        other => PronounError::StorageError(other.to_string()),
    }
}

/// Validate a label and derive its slug.
fn label_and_value(label: Option<String>) -> Result<(String, String), PronounError> {
    let label = required(label, "label").map_err(PronounError::Validation)?;
    let value = normalize_label(&label);
    if value.is_empty() {
        return Err(PronounError::Validation(
            "label must contain at least one alphanumeric character".to_string(),
        ));
    }
    Ok((label, value))
}

impl<P: PronounRepository> PronounService<P> {
    pub fn new(repo: P) -> Self {
        Self { repo }
    }

    /// Create a pronoun. `value` is always derived from `label`.
    pub async fn create_pronoun(&self, request: CreatePronounRequest) -> Result<Pronoun, PronounError> {
        let pronoun_set_id = request
            .pronoun_set_id
            .ok_or_else(|| PronounError::Validation("pronounSetId is required".to_string()))?;
        let (label, value) = label_and_value(request.label)?;

        let now = chrono::Utc::now();
        let pronoun = Pronoun {
            id: PronounId::new(),
            pronoun_set_id,
            label,
            value,
            description: request.description,
            created_at: now,
            updated_at: now,
        };

        let created = self
            .repo
            .create(&pronoun)
            .await
            .map_err(|e| map_write_error(e, &pronoun.value))?;

        tracing::info!(id = %created.id, value = %created.value, "pronoun created");
        Ok(created)
    }

    /// List every pronoun.
    pub async fn list_pronouns(&self) -> Result<Vec<Pronoun>, PronounError> {
        self.repo
            .list()
            .await
            .map_err(|e| PronounError::StorageError(e.to_string()))
    }

    /// List the pronouns of one set.
    pub async fn list_for_set(&self, set_id: &PronounSetId) -> Result<Vec<Pronoun>, PronounError> {
        self.repo
            .list_by_set(set_id)
            .await
            .map_err(|e| PronounError::StorageError(e.to_string()))
    }

    /// Get a pronoun by ID.
    pub async fn get_pronoun(&self, id: &PronounId) -> Result<Pronoun, PronounError> {
        self.repo
            .get_by_id(id)
            .await
            .map_err(|e| PronounError::StorageError(e.to_string()))?
            .ok_or(PronounError::NotFound)
    }

    /// Update the fields present in the request. Only those columns are
    /// written, so concurrent updates of other fields are kept.
    pub async fn update_pronoun(
        &self,
        id: &PronounId,
        request: UpdatePronounRequest,
    ) -> Result<Pronoun, PronounError> {
        let mut patch = PronounPatch::touch(chrono::Utc::now());

        if request.label.is_some() {
            let (label, value) = label_and_value(request.label)?;
            patch.label = Some(label);
            patch.value = Some(value);
        }

        patch.description = request.description;

        match request.pronoun_set_id {
            FieldUpdate::Unchanged => {}
            FieldUpdate::Clear => {
                return Err(PronounError::Validation(
                    "pronounSetId cannot be null".to_string(),
                ));
            }
            FieldUpdate::Set(set_id) => patch.pronoun_set_id = Some(set_id),
        }

        let updated = self
            .repo
            .update(id, &patch)
            .await
            .map_err(|e| map_write_error(e, patch.value.as_deref().unwrap_or_default()))?;

        tracing::info!(%id, value = %updated.value, "pronoun updated");
        Ok(updated)
    }

    /// Hard-delete a pronoun. A second delete reports `NotFound`.
    pub async fn delete_pronoun(&self, id: &PronounId) -> Result<(), PronounError> {
        self.repo.delete(id).await.map_err(|e| match e {
            RepositoryError::NotFound => PronounError::NotFound,
            other => PronounError::StorageError(other.to_string()),
        })?;

        tracing::info!(%id, "pronoun deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemoryStore;

    fn setup() -> (PronounService<MemoryStore>, PronounSetId) {
        let store = MemoryStore::new();
        let set_id = store.seed_set("they/them");
        (PronounService::new(store), set_id)
    }

    fn create_req(label: &str, set_id: PronounSetId) -> CreatePronounRequest {
        CreatePronounRequest {
            label: Some(label.to_string()),
            description: None,
            pronoun_set_id: Some(set_id),
        }
    }

    #[tokio::test]
    async fn test_create_derives_value() {
        let (service, set_id) = setup();
        let pronoun = service
            .create_pronoun(create_req("They/Them", set_id))
            .await
            .unwrap();

        assert_eq!(pronoun.label, "They/Them");
        assert_eq!(pronoun.value, normalize_label("They/Them"));
        assert_eq!(pronoun.pronoun_set_id, set_id);
        assert!(pronoun.description.is_none());
    }

    #[tokio::test]
    async fn test_create_requires_label_and_set() {
        let (service, set_id) = setup();

        let err = service
            .create_pronoun(CreatePronounRequest {
                label: None,
                description: None,
                pronoun_set_id: Some(set_id),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, PronounError::Validation(_)));

        let err = service
            .create_pronoun(CreatePronounRequest {
                label: Some("she".to_string()),
                description: None,
                pronoun_set_id: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, PronounError::Validation(_)));
    }

    #[tokio::test]
    async fn test_create_rejects_label_with_empty_slug() {
        let (service, set_id) = setup();
        for label in ["", "   ", "/ ! /"] {
            let err = service
                .create_pronoun(create_req(label, set_id))
                .await
                .unwrap_err();
            assert!(matches!(err, PronounError::Validation(_)), "label {label:?}");
        }
    }

    #[tokio::test]
    async fn test_create_unknown_set() {
        let (service, _) = setup();
        let err = service
            .create_pronoun(create_req("xe", PronounSetId::new()))
            .await
            .unwrap_err();
        assert!(matches!(err, PronounError::PronounSetNotFound));
    }

    #[tokio::test]
    async fn test_create_duplicate_value_conflicts() {
        let (service, set_id) = setup();
        service.create_pronoun(create_req("She Her", set_id)).await.unwrap();
        let err = service
            .create_pronoun(create_req("she-her", set_id))
            .await
            .unwrap_err();
        assert!(matches!(err, PronounError::ValueConflict(v) if v == "she-her"));
    }

    #[tokio::test]
    async fn test_update_description_only_keeps_label_and_value() {
        let (service, set_id) = setup();
        let created = service.create_pronoun(create_req("Ze / Hir", set_id)).await.unwrap();

        let updated = service
            .update_pronoun(
                &created.id,
                UpdatePronounRequest {
                    description: FieldUpdate::Set("neopronoun".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.label, created.label);
        assert_eq!(updated.value, created.value);
        assert_eq!(updated.description.as_deref(), Some("neopronoun"));
    }

    #[tokio::test]
    async fn test_update_label_recomputes_value() {
        let (service, set_id) = setup();
        let created = service.create_pronoun(create_req("Xe", set_id)).await.unwrap();

        let updated = service
            .update_pronoun(
                &created.id,
                UpdatePronounRequest {
                    label: Some("Xe / Xem".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.label, "Xe / Xem");
        assert_eq!(updated.value, "xe-xem");
    }

    #[tokio::test]
    async fn test_update_rejects_empty_label() {
        let (service, set_id) = setup();
        let created = service.create_pronoun(create_req("Fae", set_id)).await.unwrap();

        let err = service
            .update_pronoun(
                &created.id,
                UpdatePronounRequest {
                    label: Some(String::new()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, PronounError::Validation(_)));

        let unchanged = service.get_pronoun(&created.id).await.unwrap();
        assert_eq!(unchanged.value, "fae");
    }

    #[tokio::test]
    async fn test_update_clear_description_and_null_set() {
        let (service, set_id) = setup();
        let mut req = create_req("It", set_id);
        req.description = Some("object".to_string());
        let created = service.create_pronoun(req).await.unwrap();

        let cleared = service
            .update_pronoun(
                &created.id,
                UpdatePronounRequest {
                    description: FieldUpdate::Clear,
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(cleared.description.is_none());

        let err = service
            .update_pronoun(
                &created.id,
                UpdatePronounRequest {
                    pronoun_set_id: FieldUpdate::Clear,
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, PronounError::Validation(_)));
    }

    #[tokio::test]
    async fn test_update_relink_to_unknown_set() {
        let (service, set_id) = setup();
        let created = service.create_pronoun(create_req("Ey", set_id)).await.unwrap();

        let err = service
            .update_pronoun(
                &created.id,
                UpdatePronounRequest {
                    pronoun_set_id: FieldUpdate::Set(PronounSetId::new()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, PronounError::PronounSetNotFound));
    }

    #[tokio::test]
    async fn test_interleaved_updates_keep_both_fields() {
        let (service, set_id) = setup();
        let created = service.create_pronoun(create_req("Per", set_id)).await.unwrap();

        let relabel = service.update_pronoun(
            &created.id,
            UpdatePronounRequest {
                label: Some("Per / Pers".to_string()),
                ..Default::default()
            },
        );
        let describe = service.update_pronoun(
            &created.id,
            UpdatePronounRequest {
                description: FieldUpdate::Set("gender-neutral".to_string()),
                ..Default::default()
            },
        );
        let (relabeled, described) = tokio::join!(relabel, describe);
        relabeled.unwrap();
        described.unwrap();

        let stored = service.get_pronoun(&created.id).await.unwrap();
        assert_eq!(stored.label, "Per / Pers");
        assert_eq!(stored.value, "per-pers");
        assert_eq!(stored.description.as_deref(), Some("gender-neutral"));
    }

    #[tokio::test]
    async fn test_update_missing_id() {
        let (service, _) = setup();
        let err = service
            .update_pronoun(&PronounId::new(), UpdatePronounRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, PronounError::NotFound));
    }

    #[tokio::test]
    async fn test_delete_twice_reports_not_found() {
        let (service, set_id) = setup();
        let created = service.create_pronoun(create_req("He", set_id)).await.unwrap();

        service.delete_pronoun(&created.id).await.unwrap();
        let err = service.delete_pronoun(&created.id).await.unwrap_err();
        assert!(matches!(err, PronounError::NotFound));
        assert!(matches!(
            service.get_pronoun(&created.id).await.unwrap_err(),
            PronounError::NotFound
        ));
    }
}

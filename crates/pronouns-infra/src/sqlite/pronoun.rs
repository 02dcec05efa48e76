//! SQLite pronoun repository implementation.
//!
//! The UNIQUE constraint on `value` and the foreign key on `pronoun_set_id`
//! are what turn duplicate slugs and unknown sets into `Conflict` and
//! `ForeignKey` errors.

use pronouns_core::repository::pronoun::PronounRepository;
use pronouns_types::error::RepositoryError;
use pronouns_types::id::{PronounId, PronounSetId};
use pronouns_types::pronoun::{Pronoun, PronounPatch};
use sqlx::Row;

use super::pool::DatabasePool;
use super::{format_datetime, map_read_error, map_write_error, parse_datetime};

/// SQLite-backed implementation of `PronounRepository`.
pub struct SqlitePronounRepository {
    pool: DatabasePool,
}

impl SqlitePronounRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

/// Internal row type for mapping SQLite rows to domain Pronoun.
struct PronounRow {
    id: String,
    pronoun_set_id: String,
    label: String,
    value: String,
    description: Option<String>,
    created_at: String,
    updated_at: String,
}

impl PronounRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            pronoun_set_id: row.try_get("pronoun_set_id")?,
            label: row.try_get("label")?,
            value: row.try_get("value")?,
            description: row.try_get("description")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    fn into_pronoun(self) -> Result<Pronoun, RepositoryError> {
        let id = self
            .id
            .parse::<PronounId>()
            .map_err(|e| RepositoryError::Query(format!("invalid pronoun id: {e}")))?;
        let pronoun_set_id = self
            .pronoun_set_id
            .parse::<PronounSetId>()
            .map_err(|e| RepositoryError::Query(format!("invalid pronoun set id: {e}")))?;

        Ok(Pronoun {
            id,
            pronoun_set_id,
            label: self.label,
            value: self.value,
            description: self.description,
            created_at: parse_datetime(&self.created_at)?,
            updated_at: parse_datetime(&self.updated_at)?,
        })
    }
}

fn pronoun_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Pronoun, RepositoryError> {
    PronounRow::from_row(row)
        .map_err(|e| RepositoryError::Query(e.to_string()))?
        .into_pronoun()
}

impl PronounRepository for SqlitePronounRepository {
    async fn create(&self, pronoun: &Pronoun) -> Result<Pronoun, RepositoryError> {
        sqlx::query(
            "INSERT INTO pronouns (id, pronoun_set_id, label, value, description, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(pronoun.id.to_string())
        .bind(pronoun.pronoun_set_id.to_string())
        .bind(&pronoun.label)
        .bind(&pronoun.value)
        .bind(&pronoun.description)
        .bind(format_datetime(&pronoun.created_at))
        .bind(format_datetime(&pronoun.updated_at))
        .execute(&self.pool.writer)
        .await
        .map_err(|e| map_write_error(e, &pronoun.value))?;

        Ok(pronoun.clone())
    }

    async fn get_by_id(&self, id: &PronounId) -> Result<Option<Pronoun>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM pronouns WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(map_read_error)?;

        row.as_ref().map(pronoun_from_row).transpose()
    }

    async fn list(&self) -> Result<Vec<Pronoun>, RepositoryError> {
        // v7 ids sort by creation time, which breaks ties within one timestamp.
        let rows = sqlx::query("SELECT * FROM pronouns ORDER BY created_at ASC, id ASC")
            .fetch_all(&self.pool.reader)
            .await
            .map_err(map_read_error)?;

        rows.iter().map(pronoun_from_row).collect()
    }

    async fn list_by_set(&self, set_id: &PronounSetId) -> Result<Vec<Pronoun>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT * FROM pronouns WHERE pronoun_set_id = ? ORDER BY created_at ASC, id ASC",
        )
        .bind(set_id.to_string())
        .fetch_all(&self.pool.reader)
        .await
        .map_err(map_read_error)?;

        rows.iter().map(pronoun_from_row).collect()
    }

    async fn update(
        &self,
        id: &PronounId,
        patch: &PronounPatch,
    ) -> Result<Pronoun, RepositoryError> {
        // NULL binds leave the column as stored.
        let row = sqlx::query(
            "UPDATE pronouns SET
                 label = COALESCE(?, label),
                 value = COALESCE(?, value),
                 description = CASE WHEN ? THEN ? ELSE description END,
                 pronoun_set_id = COALESCE(?, pronoun_set_id),
                 updated_at = ?
             WHERE id = ?
             RETURNING *",
        )
        .bind(patch.label.as_deref())
        .bind(patch.value.as_deref())
        .bind(!patch.description.is_unchanged())
        .bind(patch.description.new_value().map(String::as_str))
        .bind(patch.pronoun_set_id.map(|set_id| set_id.to_string()))
        .bind(format_datetime(&patch.updated_at))
        .bind(id.to_string())
        .fetch_optional(&self.pool.writer)
        .await
        .map_err(|e| map_write_error(e, patch.value.as_deref().unwrap_or_default()))?;

        row.as_ref()
            .map(pronoun_from_row)
            .transpose()?
            .ok_or(RepositoryError::NotFound)
    }

    async fn delete(&self, id: &PronounId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM pronouns WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool.writer)
            .await
            .map_err(|e| map_write_error(e, &id.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}

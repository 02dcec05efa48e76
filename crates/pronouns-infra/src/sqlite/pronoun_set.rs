//! SQLite pronoun set repository implementation.

use pronouns_core::repository::pronoun_set::PronounSetRepository;
use pronouns_types::error::RepositoryError;
use pronouns_types::id::PronounSetId;
use pronouns_types::pronoun::PronounSet;
use sqlx::Row;

use super::pool::DatabasePool;
use super::{format_datetime, map_read_error, map_write_error, parse_datetime};

/// SQLite-backed implementation of `PronounSetRepository`.
pub struct SqlitePronounSetRepository {
    pool: DatabasePool,
}

impl SqlitePronounSetRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

struct PronounSetRow {
    id: String,
    name: String,
    created_at: String,
    updated_at: String,
}

impl PronounSetRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    fn into_set(self) -> Result<PronounSet, RepositoryError> {
        let id = self
            .id
            .parse::<PronounSetId>()
            .map_err(|e| RepositoryError::Query(format!("invalid pronoun set id: {e}")))?;

        Ok(PronounSet {
            id,
            name: self.name,
            created_at: parse_datetime(&self.created_at)?,
            updated_at: parse_datetime(&self.updated_at)?,
        })
    }
}

fn set_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<PronounSet, RepositoryError> {
    PronounSetRow::from_row(row)
        .map_err(|e| RepositoryError::Query(e.to_string()))?
        .into_set()
}

impl PronounSetRepository for SqlitePronounSetRepository {
    async fn create(&self, set: &PronounSet) -> Result<PronounSet, RepositoryError> {
        sqlx::query(
            "INSERT INTO pronoun_sets (id, name, created_at, updated_at) VALUES (?, ?, ?, ?)",
        )
        .bind(set.id.to_string())
        .bind(&set.name)
        .bind(format_datetime(&set.created_at))
        .bind(format_datetime(&set.updated_at))
        .execute(&self.pool.writer)
        .await
        .map_err(|e| map_write_error(e, &set.name))?;

        Ok(set.clone())
    }

    async fn get_by_id(&self, id: &PronounSetId) -> Result<Option<PronounSet>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM pronoun_sets WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(map_read_error)?;

        row.as_ref().map(set_from_row).transpose()
    }

    async fn list(&self) -> Result<Vec<PronounSet>, RepositoryError> {
        let rows = sqlx::query("SELECT * FROM pronoun_sets ORDER BY name ASC")
            .fetch_all(&self.pool.reader)
            .await
            .map_err(map_read_error)?;

        rows.iter().map(set_from_row).collect()
    }

    async fn delete(&self, id: &PronounSetId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM pronoun_sets WHERE id = ?")
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

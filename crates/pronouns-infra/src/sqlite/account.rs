//! SQLite account repository implementation.

use pronouns_core::repository::account::AccountRepository;
use pronouns_types::account::{Account, AccountPatch};
use pronouns_types::error::RepositoryError;
use pronouns_types::id::{AccountId, PronounSetId};
use sqlx::Row;

use super::pool::DatabasePool;
use super::{format_datetime, map_read_error, map_write_error, parse_datetime};

/// SQLite-backed implementation of `AccountRepository`.
///
/// `email` is declared `COLLATE NOCASE`, so both the UNIQUE constraint and
/// `get_by_email` ignore ASCII case.
pub struct SqliteAccountRepository {
    pool: DatabasePool,
}

impl SqliteAccountRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

struct AccountRow {
    id: String,
    email: String,
    username: String,
    password_hash: String,
    pronoun_set_id: Option<String>,
    created_at: String,
    updated_at: String,
}

impl AccountRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            email: row.try_get("email")?,
            username: row.try_get("username")?,
            password_hash: row.try_get("password_hash")?,
            pronoun_set_id: row.try_get("pronoun_set_id")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    fn into_account(self) -> Result<Account, RepositoryError> {
        let id = self
            .id
            .parse::<AccountId>()
            .map_err(|e| RepositoryError::Query(format!("invalid account id: {e}")))?;
        let pronoun_set_id = self
            .pronoun_set_id
            .as_deref()
            .map(str::parse::<PronounSetId>)
            .transpose()
            .map_err(|e| RepositoryError::Query(format!("invalid pronoun set id: {e}")))?;

        Ok(Account {
            id,
            email: self.email,
            username: self.username,
            password_hash: self.password_hash,
            pronoun_set_id,
            created_at: parse_datetime(&self.created_at)?,
            updated_at: parse_datetime(&self.updated_at)?,
        })
    }
}

fn account_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Account, RepositoryError> {
    AccountRow::from_row(row)
        .map_err(|e| RepositoryError::Query(e.to_string()))?
        .into_account()
}

impl AccountRepository for SqliteAccountRepository {
    async fn create(&self, account: &Account) -> Result<Account, RepositoryError> {
        sqlx::query(
            "INSERT INTO accounts (id, email, username, password_hash, pronoun_set_id, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(account.id.to_string())
        .bind(&account.email)
        .bind(&account.username)
        .bind(&account.password_hash)
        .bind(account.pronoun_set_id.map(|id| id.to_string()))
        .bind(format_datetime(&account.created_at))
        .bind(format_datetime(&account.updated_at))
        .execute(&self.pool.writer)
        .await
        .map_err(|e| map_write_error(e, &account.email))?;

        Ok(account.clone())
    }

    async fn get_by_id(&self, id: &AccountId) -> Result<Option<Account>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM accounts WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(map_read_error)?;

        row.as_ref().map(account_from_row).transpose()
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<Account>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM accounts WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(map_read_error)?;

        row.as_ref().map(account_from_row).transpose()
    }

    async fn list(&self) -> Result<Vec<Account>, RepositoryError> {
        let rows = sqlx::query("SELECT * FROM accounts ORDER BY created_at ASC, id ASC")
            .fetch_all(&self.pool.reader)
            .await
            .map_err(map_read_error)?;

        rows.iter().map(account_from_row).collect()
    }

    async fn update(
        &self,
        id: &AccountId,
        patch: &AccountPatch,
    ) -> Result<Account, RepositoryError> {
        let subject = patch.email.clone().unwrap_or_else(|| id.to_string());
        let row = sqlx::query(
            "UPDATE accounts SET
                 email = COALESCE(?, email),
                 username = COALESCE(?, username),
                 password_hash = COALESCE(?, password_hash),
                 pronoun_set_id = CASE WHEN ? THEN ? ELSE pronoun_set_id END,
                 updated_at = ?
             WHERE id = ?
             RETURNING *",
        )
        .bind(patch.email.as_deref())
        .bind(patch.username.as_deref())
        .bind(patch.password_hash.as_deref())
        .bind(!patch.pronoun_set_id.is_unchanged())
        .bind(patch.pronoun_set_id.new_value().map(|set_id| set_id.to_string()))
        .bind(format_datetime(&patch.updated_at))
        .bind(id.to_string())
        .fetch_optional(&self.pool.writer)
        .await
        .map_err(|e| map_write_error(e, &subject))?;

        row.as_ref()
            .map(account_from_row)
            .transpose()?
            .ok_or(RepositoryError::NotFound)
    }

    async fn delete(&self, id: &AccountId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM accounts WHERE id = ?")
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

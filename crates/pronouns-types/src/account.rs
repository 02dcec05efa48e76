use chrono::{DateTime, Utc};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::id::{AccountId, PronounSetId};
use crate::pronoun::PronounSet;
use crate::update::FieldUpdate;

/// A stored user account.
///
/// Deliberately not `Serialize`: the only outbound shape is [`AccountView`],
/// which has no field for the password hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: AccountId,
    /// Unique (case-insensitive) login email.
    pub email: String,
    pub username: String,
    /// Argon2id PHC string. Never the raw password.
    pub password_hash: String,
    /// Optional pronoun-set preference.
    pub pronoun_set_id: Option<PronounSetId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public projection of an account with its linked pronoun set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountView {
    pub id: AccountId,
    pub email: String,
    pub username: String,
    pub pronoun_set: Option<PronounSet>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AccountView {
    /// Build the view for an account and its (already resolved) set.
    pub fn new(account: &Account, pronoun_set: Option<PronounSet>) -> Self {
        Self {
            id: account.id,
            email: account.email.clone(),
            username: account.username.clone(),
            pronoun_set,
            created_at: account.created_at,
            updated_at: account.updated_at,
        }
    }
}

/// Registration payload. Used by both `/auth/register` and `POST /users`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub password: Option<SecretString>,
    pub username: Option<String>,
    pub pronoun_set_id: Option<PronounSetId>,
}

/// Profile update payload. Absent fields are left untouched.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAccountRequest {
    pub email: Option<String>,
    pub username: Option<String>,
    /// Re-hashed before storage.
    pub password: Option<SecretString>,
    /// `null` unlinks the set, a value relinks it.
    #[serde(default)]
    pub pronoun_set_id: FieldUpdate<PronounSetId>,
}

/// Column-level changes to one account, written in a single statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountPatch {
    pub email: Option<String>,
    pub username: Option<String>,
    pub password_hash: Option<String>,
    pub pronoun_set_id: FieldUpdate<PronounSetId>,
    pub updated_at: DateTime<Utc>,
}

impl AccountPatch {
    /// A patch that only bumps `updated_at`.
    pub fn touch(updated_at: DateTime<Utc>) -> Self {
        Self {
            email: None,
            username: None,
            password_hash: None,
            pronoun_set_id: FieldUpdate::Unchanged,
            updated_at,
        }
    }

    /// Apply to an in-memory record, column by column.
    pub fn apply(&self, account: &mut Account) {
        if let Some(email) = &self.email {
            account.email = email.clone();
        }
        if let Some(username) = &self.username {
            account.username = username.clone();
        }
        if let Some(hash) = &self.password_hash {
            account.password_hash = hash.clone();
        }
        account.pronoun_set_id = self.pronoun_set_id.clone().apply_to(account.pronoun_set_id);
        account.updated_at = self.updated_at;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_account() -> Account {
        let now = Utc::now();
        Account {
            id: AccountId::new(),
            email: "a@x.com".to_string(),
            username: "ash".to_string(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
            pronoun_set_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_view_has_no_password_hash() {
        let view = AccountView::new(&sample_account(), None);
        let json = serde_json::to_value(&view).unwrap();
        let obj = json.as_object().unwrap();
        assert!(!obj.contains_key("passwordHash"));
        assert!(!obj.contains_key("password_hash"));
        assert!(!json.to_string().contains("argon2"));
        assert_eq!(obj["email"], "a@x.com");
        assert!(obj["pronounSet"].is_null());
    }

    #[test]
    fn test_update_request_unlink_vs_absent() {
        let unlink: UpdateAccountRequest =
            serde_json::from_str(r#"{"pronounSetId": null}"#).unwrap();
        assert_eq!(unlink.pronoun_set_id, FieldUpdate::Clear);

        let absent: UpdateAccountRequest = serde_json::from_str(r#"{"username": "b"}"#).unwrap();
        assert!(absent.pronoun_set_id.is_unchanged());
    }

    #[test]
    fn test_debug_masks_password() {
        let req: RegisterRequest = serde_json::from_str(
            r#"{"email": "a@x.com", "password": "secret123", "username": "ash"}"#,
        )
        .unwrap();
        assert!(req.password.is_some());
        assert!(!format!("{req:?}").contains("secret123"));

        let update: UpdateAccountRequest =
            serde_json::from_str(r#"{"password": "n3w-secret"}"#).unwrap();
        assert!(!format!("{update:?}").contains("n3w-secret"));
    }

    #[test]
    fn test_patch_touches_only_named_columns() {
        let mut account = sample_account();
        let original = account.clone();
        let later = original.updated_at + chrono::TimeDelta::seconds(5);

        AccountPatch {
            username: Some("rin".to_string()),
            ..AccountPatch::touch(later)
        }
        .apply(&mut account);

        assert_eq!(account.username, "rin");
        assert_eq!(account.email, original.email);
        assert_eq!(account.password_hash, original.password_hash);
        assert_eq!(account.updated_at, later);
    }
}

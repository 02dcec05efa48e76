//! In-memory test doubles for the core ports.
//!
//! `MemoryStore` implements every repository trait over shared maps and
//! enforces the same unique and foreign-key rules as the SQLite schema.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use chrono::Utc;
use pronouns_types::account::{Account, AccountPatch};
use pronouns_types::auth::{Identity, IssuedToken};
use pronouns_types::error::{AuthError, CredentialError, RepositoryError};
use pronouns_types::id::{AccountId, PronounId, PronounSetId};
use pronouns_types::pronoun::{Pronoun, PronounPatch, PronounSet};

use crate::repository::account::AccountRepository;
use crate::repository::pronoun::PronounRepository;
use crate::repository::pronoun_set::PronounSetRepository;
use crate::service::credential::CredentialHasher;
use crate::service::token::TokenService;

#[derive(Default)]
struct Tables {
    sets: HashMap<PronounSetId, PronounSet>,
    pronouns: Vec<Pronoun>,
    accounts: Vec<Account>,
}

/// Shared in-memory store. Clones see the same data.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a set directly and return its id.
    pub fn seed_set(&self, name: &str) -> PronounSetId {
        let now = Utc::now();
        let set = PronounSet {
            id: PronounSetId::new(),
            name: name.to_string(),
            created_at: now,
            updated_at: now,
        };
        let id = set.id;
        self.tables.lock().unwrap().sets.insert(id, set);
        id
    }

    pub fn account_count(&self) -> usize {
        self.tables.lock().unwrap().accounts.len()
    }

    /// Raw stored account, hash included.
    pub fn stored_account(&self, id: &AccountId) -> Option<Account> {
        self.tables
            .lock()
            .unwrap()
            .accounts
            .iter()
            .find(|a| a.id == *id)
            .cloned()
    }
}

fn check_pronoun(tables: &Tables, pronoun: &Pronoun) -> Result<(), RepositoryError> {
    if !tables.sets.contains_key(&pronoun.pronoun_set_id) {
        return Err(RepositoryError::ForeignKey("pronoun_set_id".to_string()));
    }
    if tables
        .pronouns
        .iter()
        .any(|p| p.value == pronoun.value && p.id != pronoun.id)
    {
        return Err(RepositoryError::Conflict(pronoun.value.clone()));
    }
    Ok(())
}

fn check_account(tables: &Tables, account: &Account) -> Result<(), RepositoryError> {
    if let Some(set_id) = &account.pronoun_set_id {
        if !tables.sets.contains_key(set_id) {
            return Err(RepositoryError::ForeignKey("pronoun_set_id".to_string()));
        }
    }
    if tables
        .accounts
        .iter()
        .any(|a| a.email.eq_ignore_ascii_case(&account.email) && a.id != account.id)
    {
        return Err(RepositoryError::Conflict(account.email.clone()));
    }
    Ok(())
}

impl PronounSetRepository for MemoryStore {
    async fn create(&self, set: &PronounSet) -> Result<PronounSet, RepositoryError> {
        let mut tables = self.tables.lock().unwrap();
        if tables.sets.values().any(|s| s.name == set.name) {
            return Err(RepositoryError::Conflict(set.name.clone()));
        }
        tables.sets.insert(set.id, set.clone());
        Ok(set.clone())
    }

    async fn get_by_id(&self, id: &PronounSetId) -> Result<Option<PronounSet>, RepositoryError> {
        Ok(self.tables.lock().unwrap().sets.get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<PronounSet>, RepositoryError> {
        let mut sets: Vec<_> = self.tables.lock().unwrap().sets.values().cloned().collect();
        sets.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(sets)
    }

    async fn delete(&self, id: &PronounSetId) -> Result<(), RepositoryError> {
        let mut tables = self.tables.lock().unwrap();
        if tables.sets.remove(id).is_none() {
            return Err(RepositoryError::NotFound);
        }
        tables.pronouns.retain(|p| p.pronoun_set_id != *id);
        for account in tables.accounts.iter_mut() {
            if account.pronoun_set_id == Some(*id) {
                account.pronoun_set_id = None;
            }
        }
        Ok(())
    }
}

impl PronounRepository for MemoryStore {
    async fn create(&self, pronoun: &Pronoun) -> Result<Pronoun, RepositoryError> {
        let mut tables = self.tables.lock().unwrap();
        check_pronoun(&tables, pronoun)?;
        tables.pronouns.push(pronoun.clone());
        Ok(pronoun.clone())
    }

    async fn get_by_id(&self, id: &PronounId) -> Result<Option<Pronoun>, RepositoryError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.pronouns.iter().find(|p| p.id == *id).cloned())
    }

    async fn list(&self) -> Result<Vec<Pronoun>, RepositoryError> {
        Ok(self.tables.lock().unwrap().pronouns.clone())
    }

    async fn list_by_set(&self, set_id: &PronounSetId) -> Result<Vec<Pronoun>, RepositoryError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .pronouns
            .iter()
            .filter(|p| p.pronoun_set_id == *set_id)
            .cloned()
            .collect())
    }

    async fn update(
        &self,
        id: &PronounId,
        patch: &PronounPatch,
    ) -> Result<Pronoun, RepositoryError> {
        let mut tables = self.tables.lock().unwrap();
        let index = tables
            .pronouns
            .iter()
            .position(|p| p.id == *id)
            .ok_or(RepositoryError::NotFound)?;
        let mut candidate = tables.pronouns[index].clone();
        patch.apply(&mut candidate);
        check_pronoun(&tables, &candidate)?;
        tables.pronouns[index] = candidate.clone();
        Ok(candidate)
    }

    async fn delete(&self, id: &PronounId) -> Result<(), RepositoryError> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.pronouns.len();
        tables.pronouns.retain(|p| p.id != *id);
        if tables.pronouns.len() == before {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

impl AccountRepository for MemoryStore {
    async fn create(&self, account: &Account) -> Result<Account, RepositoryError> {
        let mut tables = self.tables.lock().unwrap();
        check_account(&tables, account)?;
        tables.accounts.push(account.clone());
        Ok(account.clone())
    }

    async fn get_by_id(&self, id: &AccountId) -> Result<Option<Account>, RepositoryError> {
        Ok(self.stored_account(id))
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<Account>, RepositoryError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .accounts
            .iter()
            .find(|a| a.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn list(&self) -> Result<Vec<Account>, RepositoryError> {
        Ok(self.tables.lock().unwrap().accounts.clone())
    }

    async fn update(
        &self,
        id: &AccountId,
        patch: &AccountPatch,
    ) -> Result<Account, RepositoryError> {
        let mut tables = self.tables.lock().unwrap();
        let index = tables
            .accounts
            .iter()
            .position(|a| a.id == *id)
            .ok_or(RepositoryError::NotFound)?;
        let mut candidate = tables.accounts[index].clone();
        patch.apply(&mut candidate);
        check_account(&tables, &candidate)?;
        tables.accounts[index] = candidate.clone();
        Ok(candidate)
    }

    async fn delete(&self, id: &AccountId) -> Result<(), RepositoryError> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.accounts.len();
        tables.accounts.retain(|a| a.id != *id);
        if tables.accounts.len() == before {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

/// Fast, insecure hasher: `plain$<counter>$<raw>`.
#[derive(Default)]
pub struct PlainHasher {
    counter: AtomicU64,
    verifications: AtomicU64,
}

impl PlainHasher {
    /// Number of `verify` calls so far.
    pub fn verifications(&self) -> u64 {
        self.verifications.load(Ordering::Relaxed)
    }
}

impl CredentialHasher for PlainHasher {
    fn hash(&self, raw: &str) -> Result<String, CredentialError> {
        let salt = self.counter.fetch_add(1, Ordering::Relaxed);
        Ok(format!("plain${salt}${raw}"))
    }

    fn verify(&self, raw: &str, hashed: &str) -> bool {
        self.verifications.fetch_add(1, Ordering::Relaxed);
        let mut parts = hashed.splitn(3, '$');
        matches!(
            (parts.next(), parts.next(), parts.next()),
            (Some("plain"), Some(_), Some(stored)) if stored == raw
        )
    }

    fn decoy_hash(&self) -> &str {
        "decoy"
    }
}

/// Unsigned `<account_id>|<email>` tokens.
#[derive(Default)]
pub struct FakeTokens;

impl TokenService for FakeTokens {
    fn issue(&self, account_id: &AccountId, email: &str) -> Result<IssuedToken, AuthError> {
        Ok(IssuedToken::bearer(
            format!("{account_id}|{email}"),
            Utc::now() + chrono::TimeDelta::hours(1),
        ))
    }

    fn verify(&self, token: &str) -> Result<Identity, AuthError> {
        let (id, email) = token.split_once('|').ok_or(AuthError::InvalidToken)?;
        let account_id = id.parse().map_err(|_| AuthError::InvalidToken)?;
        Ok(Identity {
            account_id,
            email: email.to_string(),
        })
    }
}

//! Application state wiring all services together.
//!
//! AppState holds the concrete service instances used by both CLI and REST API.
//! Services are generic over repository/hasher/token traits, but AppState
//! pins them to the concrete infra implementations.

use std::path::PathBuf;
use std::sync::Arc;

use pronouns_core::service::account::AccountService;
use pronouns_core::service::auth::AuthService;
use pronouns_core::service::pronoun::PronounService;
use pronouns_core::service::pronoun_set::PronounSetService;
use pronouns_infra::config::database_url;
use pronouns_infra::crypto::password::Argon2CredentialHasher;
use pronouns_infra::crypto::token::JwtTokenService;
use pronouns_infra::sqlite::account::SqliteAccountRepository;
use pronouns_infra::sqlite::pool::DatabasePool;
use pronouns_infra::sqlite::pronoun::SqlitePronounRepository;
use pronouns_infra::sqlite::pronoun_set::SqlitePronounSetRepository;
use pronouns_types::config::AppConfig;

/// Concrete type aliases for the service generics pinned to infra implementations.
pub type ConcretePronounService = PronounService<SqlitePronounRepository>;

pub type ConcretePronounSetService =
    PronounSetService<SqlitePronounSetRepository, SqlitePronounRepository>;

pub type ConcreteAccountService =
    AccountService<SqliteAccountRepository, SqlitePronounSetRepository, Argon2CredentialHasher>;

pub type ConcreteAuthService = AuthService<
    SqliteAccountRepository,
    SqlitePronounSetRepository,
    Argon2CredentialHasher,
    JwtTokenService,
>;

/// Shared application state holding all services.
///
/// Used by both CLI commands and REST API handlers.
#[derive(Clone)]
pub struct AppState {
    pub pronoun_service: Arc<ConcretePronounService>,
    pub pronoun_set_service: Arc<ConcretePronounSetService>,
    pub account_service: Arc<ConcreteAccountService>,
    pub auth_service: Arc<ConcreteAuthService>,
    pub data_dir: PathBuf,
}

impl AppState {
    /// Initialize the application state: connect to DB, wire services.
    pub async fn init(config: &AppConfig, data_dir: PathBuf) -> anyhow::Result<Self> {
        // Ensure data directory exists
        tokio::fs::create_dir_all(&data_dir).await?;

        let db_pool = DatabasePool::new(&database_url(config, &data_dir)).await?;
        Ok(Self::from_pool(db_pool, config, data_dir))
    }

    /// Wire services over an already opened pool.
    pub fn from_pool(db_pool: DatabasePool, config: &AppConfig, data_dir: PathBuf) -> Self {
        let pronoun_service = PronounService::new(SqlitePronounRepository::new(db_pool.clone()));

        let pronoun_set_service = PronounSetService::new(
            SqlitePronounSetRepository::new(db_pool.clone()),
            SqlitePronounRepository::new(db_pool.clone()),
        );

        let account_service = Arc::new(AccountService::new(
            SqliteAccountRepository::new(db_pool.clone()),
            SqlitePronounSetRepository::new(db_pool.clone()),
            Arc::new(Argon2CredentialHasher::new()),
        ));

        let tokens = Arc::new(JwtTokenService::from_config(&config.auth));
        let auth_service = AuthService::new(Arc::clone(&account_service), tokens);

        Self {
            pronoun_service: Arc::new(pronoun_service),
            pronoun_set_service: Arc::new(pronoun_set_service),
            account_service,
            auth_service: Arc::new(auth_service),
            data_dir,
        }
    }
}

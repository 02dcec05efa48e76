//! Configuration loader for the Pronouns API.
//!
//! Reads `config.toml` from the data directory (`~/.pronouns/` in production)
//! into [`AppConfig`], then lets the environment override individual fields.
//! A missing or malformed file falls back to defaults.

use std::path::{Path, PathBuf};

use pronouns_types::config::AppConfig;
use secrecy::SecretString;

use crate::sqlite::pool::default_database_url;

/// Environment variables that override `config.toml`.
pub const ENV_HOST: &str = "HOST";
pub const ENV_PORT: &str = "PORT";
pub const ENV_DATABASE_URL: &str = "DATABASE_URL";
pub const ENV_JWT_SECRET: &str = "JWT_SECRET";
pub const ENV_JWT_EXPIRES_IN: &str = "JWT_EXPIRES_IN";
pub const ENV_DATA_DIR: &str = "PRONOUNS_DATA_DIR";

/// Resolve the data directory from environment or platform defaults.
///
/// Priority:
/// 1. `PRONOUNS_DATA_DIR` environment variable
/// 2. `~/.pronouns`
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(ENV_DATA_DIR) {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".pronouns");
    }

    // Last resort: current directory
    PathBuf::from(".pronouns")
}

/// Load configuration from `{data_dir}/config.toml` plus process environment.
pub async fn load_config(data_dir: &Path) -> AppConfig {
    let config = load_file(data_dir).await;
    apply_env_overrides(config, |key| std::env::var(key).ok())
}

async fn load_file(data_dir: &Path) -> AppConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return AppConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return AppConfig::default();
        }
    };

    match toml::from_str::<AppConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            AppConfig::default()
        }
    }
}

/// Overlay environment values on a loaded config. Empty values are ignored.
pub fn apply_env_overrides<F>(mut config: AppConfig, lookup: F) -> AppConfig
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(host) = get(ENV_HOST) {
        config.server.host = host;
    }
    if let Some(port) = get(ENV_PORT) {
        match port.trim().parse::<u16>() {
            Ok(port) => config.server.port = port,
            Err(_) => tracing::warn!("Ignoring invalid {ENV_PORT}={port}"),
        }
    }
    if let Some(url) = get(ENV_DATABASE_URL) {
        config.database.url = Some(url);
    }
    if let Some(secret) = get(ENV_JWT_SECRET) {
        config.auth.jwt_secret = Some(SecretString::from(secret));
    }
    if let Some(lifetime) = get(ENV_JWT_EXPIRES_IN) {
        config.auth.token_lifetime = lifetime;
    }

    config
}

/// The configured database URL, or the default file in the data directory.
pub fn database_url(config: &AppConfig, data_dir: &Path) -> String {
    config
        .database
        .url
        .clone()
        .unwrap_or_else(|| default_database_url(data_dir))
}

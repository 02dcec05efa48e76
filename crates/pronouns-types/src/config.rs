//! Configuration types for the Pronouns API.
//!
//! `AppConfig` mirrors `config.toml` in the data directory. Every field has a
//! default, so an empty file (or no file) yields a runnable configuration.

use chrono::TimeDelta;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Longest accepted token lifetime.
pub const MAX_LIFETIME_DAYS: i64 = 365;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    4000
}

/// Database settings. `url` falls back to a file in the data directory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: Option<String>,
}

/// Token settings.
#[derive(Debug, Deserialize)]
pub struct AuthConfig {
    /// HS256 signing secret. When unset a random per-process secret is used.
    pub jwt_secret: Option<SecretString>,
    /// Token lifetime such as `"7h"`, `"1d"`, `"30m"` or plain seconds.
    #[serde(default = "default_token_lifetime")]
    pub token_lifetime: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            token_lifetime: default_token_lifetime(),
        }
    }
}

fn default_token_lifetime() -> String {
    "7h".to_string()
}

/// Parse a lifetime such as `"7h"`, `"1d"`, `"30m"`, `"45s"` or `"3600"`.
///
/// Returns an error message for empty, zero, negative or unknown-unit input,
/// and for anything longer than [`MAX_LIFETIME_DAYS`].
pub fn parse_lifetime(input: &str) -> Result<TimeDelta, String> {
    let input = input.trim();
    let split = input
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(input.len());
    let (digits, unit) = input.split_at(split);

    let amount: i64 = digits
        .parse()
        .map_err(|_| format!("invalid lifetime: '{input}'"))?;
    if amount <= 0 {
        return Err(format!("lifetime must be positive: '{input}'"));
    }

    let delta = match unit {
        "" | "s" => TimeDelta::try_seconds(amount),
        "m" => TimeDelta::try_minutes(amount),
        "h" => TimeDelta::try_hours(amount),
        "d" => TimeDelta::try_days(amount),
        other => return Err(format!("unknown lifetime unit '{other}' in '{input}'")),
    };

    match delta {
        Some(delta) if delta <= TimeDelta::days(MAX_LIFETIME_DAYS) => Ok(delta),
        _ => Err(format!(
            "lifetime out of range (max {MAX_LIFETIME_DAYS}d): '{input}'"
        )),
    }
}

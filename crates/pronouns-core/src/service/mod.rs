//! Business logic services (use cases).
//!
//! Services orchestrate repository calls, hashing, token issuance and
//! validation rules. They depend on traits (ports) -- never on concrete
//! infrastructure implementations.

pub mod account;
pub mod auth;
pub mod credential;
pub mod pronoun;
pub mod pronoun_set;
pub mod token;

/// Trim a required text field, treating blank as missing.
pub(crate) fn required(value: Option<String>, field: &str) -> Result<String, String> {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(format!("{field} is required")),
    }
}

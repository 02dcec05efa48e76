//! Infrastructure layer for the Pronouns API.
//!
//! Contains implementations of the traits defined in `pronouns-core`:
//! SQLite storage, Argon2id password hashing and HS256 token signing, plus
//! the configuration loader and data directory resolution.

pub mod config;
pub mod crypto;
pub mod sqlite;

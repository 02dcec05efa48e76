//! Cryptographic operations for the Pronouns API.
//!
//! - `password`: Argon2id password hashing
//! - `token`: HS256 signed identity tokens

pub mod password;
pub mod token;

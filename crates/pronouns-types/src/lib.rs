//! Shared domain types for the Pronouns API.
//!
//! Pronoun sets, pronouns, accounts, auth tokens, configuration and the
//! error types shared by every layer.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod account;
pub mod auth;
pub mod config;
pub mod error;
pub mod id;
pub mod pronoun;
pub mod update;

//! Business logic and repository trait definitions for the Pronouns API.
//!
//! This crate defines the "ports" (repository, credential and token traits)
//! that the infrastructure layer implements. It depends only on
//! `pronouns-types` -- never on `pronouns-infra` or any database/IO crate.

pub mod repository;
pub mod service;

#[cfg(test)]
pub(crate) mod testing;

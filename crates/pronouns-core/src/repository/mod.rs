//! Repository trait definitions (ports).
//!
//! These traits define the storage interface that the infrastructure layer
//! (pronouns-infra) implements. Uniqueness and referential integrity are the
//! store's job: implementations must report `RepositoryError::Conflict` for a
//! violated unique constraint and `RepositoryError::ForeignKey` for a
//! dangling pronoun-set reference, atomically at write time.

pub mod account;
pub mod pronoun;
pub mod pronoun_set;

//! HTTP request handlers for the REST API.

pub mod auth;
pub mod pronoun;
pub mod pronoun_set;
pub mod user;

use std::str::FromStr;

use crate::http::error::AppError;

/// Parse a path id. Anything unparsable cannot exist, so it is a 404.
pub(crate) fn parse_id<T: FromStr>(raw: &str, entity: &str) -> Result<T, AppError> {
    raw.parse()
        .map_err(|_| AppError::NotFound(format!("{entity} not found")))
}

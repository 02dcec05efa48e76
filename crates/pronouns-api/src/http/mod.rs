//! HTTP/REST API layer for the Pronouns API.
//!
//! Axum-based REST API at `/api/v1/` with bearer-token authentication,
//! envelope response format, and CORS support.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod router;

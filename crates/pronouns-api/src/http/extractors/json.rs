//! JSON body extractor whose rejection uses the API error envelope.
//!
//! Malformed or mistyped bodies become `400 VALIDATION_ERROR` instead of
//! axum's plain-text 4xx responses.

use axum::extract::FromRequest;

use crate::http::error::AppError;

#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);

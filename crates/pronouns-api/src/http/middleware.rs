//! Request context middleware.
//!
//! Assigns every request an id and start time, makes them available to
//! handlers as [`RequestContext`], renders error envelopes from the same
//! values and echoes the id in the `x-request-id` response header.

use axum::Json;
use axum::extract::Request;
use axum::http::{HeaderName, HeaderValue};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::http::error::ErrorReport;
use crate::http::response::RequestContext;

pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

pub async fn request_context(mut request: Request, next: Next) -> Response {
    let ctx = RequestContext::new();
    request.extensions_mut().insert(ctx.clone());

    let mut response = next.run(request).await;

    if let Some(report) = response.extensions_mut().remove::<ErrorReport>() {
        let status = response.status();
        response = (status, Json(report.envelope(&ctx))).into_response();
    }

    if let Ok(value) = HeaderValue::from_str(ctx.request_id()) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

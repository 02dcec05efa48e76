//! Envelope response format for all API responses.
//!
//! Every response is wrapped in a consistent envelope:
//! ```json
//! {
//!   "data": { ... },
//!   "meta": { "requestId": "...", "timestamp": "...", "responseTimeMs": 5 },
//!   "errors": [],
//!   "_links": { "self": "..." }
//! }
//! ```

use std::collections::HashMap;
use std::convert::Infallible;
use std::time::Instant;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use serde::Serialize;

/// Envelope response wrapping all API data.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    /// The main response payload; `null` on errors.
    pub data: Option<T>,

    /// Request metadata.
    pub meta: ApiMeta,

    /// Error list (empty on success).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ApiErrorDetail>,

    /// HATEOAS-style links for discoverability.
    #[serde(rename = "_links", skip_serializing_if = "HashMap::is_empty")]
    pub links: HashMap<String, String>,
}

/// Metadata included in every response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiMeta {
    /// Unique request identifier for tracing.
    pub request_id: String,
    /// RFC 3339 timestamp of the response.
    pub timestamp: String,
    /// Response time in milliseconds.
    pub response_time_ms: u64,
}

impl ApiMeta {
    fn new(request_id: String, response_time_ms: u64) -> Self {
        Self {
            request_id,
            timestamp: chrono::Utc::now().to_rfc3339(),
            response_time_ms,
        }
    }
}

/// Individual error detail.
#[derive(Debug, Serialize)]
pub struct ApiErrorDetail {
    /// Machine-readable error code.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

/// Per-request id and start time, turned into `meta` when the response is built.
///
/// The `request_context` middleware creates one per request; handlers extract
/// it and error envelopes are rendered from the same instance.
#[derive(Debug, Clone)]
pub struct RequestContext {
    start: Instant,
    request_id: String,
}

impl RequestContext {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            request_id: uuid::Uuid::now_v7().to_string(),
        }
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    fn elapsed_ms(&self) -> u64 {
        u64::try_from(self.start.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    /// Wrap `data` in a success envelope.
    pub fn success<T: Serialize>(self, data: T) -> ApiResponse<T> {
        let elapsed = self.elapsed_ms();
        ApiResponse::success(data, self.request_id, elapsed)
    }

    /// Error envelope for this request.
    pub fn error(&self, code: &str, message: &str) -> ApiResponse<()> {
        ApiResponse::error(code, message, self.request_id.clone(), self.elapsed_ms())
    }
}

/// Handlers share the context installed by the middleware. Outside it (e.g.
/// a router built without the layer) a fresh context is used.
impl<S: Send + Sync> FromRequestParts<S> for RequestContext {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<RequestContext>()
            .cloned()
            .unwrap_or_default())
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a success response with data.
    pub fn success(data: T, request_id: String, response_time_ms: u64) -> Self {
        Self {
            data: Some(data),
            meta: ApiMeta::new(request_id, response_time_ms),
            errors: Vec::new(),
            links: HashMap::new(),
        }
    }

    /// Add a HATEOAS link.
    pub fn with_link(mut self, rel: &str, href: &str) -> Self {
        self.links.insert(rel.to_string(), href.to_string());
        self
    }
}

impl ApiResponse<()> {
    /// Create an error response (no data).
    pub fn error(code: &str, message: &str, request_id: String, response_time_ms: u64) -> Self {
        Self {
            data: None,
            meta: ApiMeta::new(request_id, response_time_ms),
            errors: vec![ApiErrorDetail {
                code: code.to_string(),
                message: message.to_string(),
            }],
            links: HashMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope_shape() {
        let resp = RequestContext::new()
            .success(vec!["she-her"])
            .with_link("self", "/api/v1/pronouns");
        let json = serde_json::to_value(&resp).unwrap();

        assert_eq!(json["data"][0], "she-her");
        assert!(json["meta"]["requestId"].is_string());
        assert!(json["meta"]["responseTimeMs"].is_u64());
        assert!(json.get("errors").is_none());
        assert_eq!(json["_links"]["self"], "/api/v1/pronouns");
    }

    #[test]
    fn test_error_envelope_has_null_data() {
        let resp = ApiResponse::error("NOT_FOUND", "pronoun not found", "req-1".to_string(), 3);
        let json = serde_json::to_value(&resp).unwrap();

        assert!(json["data"].is_null());
        assert_eq!(json["errors"][0]["code"], "NOT_FOUND");
        assert_eq!(json["meta"]["requestId"], "req-1");
        assert_eq!(json["meta"]["responseTimeMs"], 3);
        assert!(json.get("_links").is_none());
    }

    #[test]
    fn test_context_error_reuses_request_id() {
        let ctx = RequestContext::new();
        let json = serde_json::to_value(ctx.error("CONFLICT", "taken")).unwrap();
        assert_eq!(json["meta"]["requestId"], ctx.request_id());

        let success = serde_json::to_value(ctx.clone().success(1)).unwrap();
        assert_eq!(success["meta"]["requestId"], json["meta"]["requestId"]);
    }
}

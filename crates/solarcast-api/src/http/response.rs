//! Error envelope returned by every failed request.
//!
//! ```json
//! {
//!   "data": null,
//!   "meta": { "request_id": "...", "timestamp": "...", "response_time_ms": 0 },
//!   "errors": [{ "code": "VALIDATION_ERROR", "message": "..." }]
//! }
//! ```
//!
//! Successful responses are the bare payloads (`[{ds, yhat}]`, `{answer}`).

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    /// Always `null`.
    pub data: Option<()>,
    pub meta: ApiMeta,
    pub errors: Vec<ApiErrorDetail>,
}

/// Metadata included in every envelope.
#[derive(Debug, Serialize)]
pub struct ApiMeta {
    /// Unique request identifier for tracing.
    pub request_id: String,
    /// ISO-8601 timestamp of the response.
    pub timestamp: String,
    pub response_time_ms: u64,
}

#[derive(Debug, Serialize)]
pub struct ApiErrorDetail {
    /// Machine-readable error code.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

impl ErrorEnvelope {
    pub fn new(code: &str, message: &str, request_id: String, response_time_ms: u64) -> Self {
        Self {
            data: None,
            meta: ApiMeta {
                request_id,
                timestamp: chrono::Utc::now().to_rfc3339(),
                response_time_ms,
            },
            errors: vec![ApiErrorDetail {
                code: code.to_string(),
                message: message.to_string(),
            }],
        }
    }
}

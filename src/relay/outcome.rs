//! Outcome of one outbound relay call.

use axum::http::{header, HeaderMap};
use serde::Serialize;
use serde_json::Value;

/// Downstream response body as it appears in the `/api/start` payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DownstreamBody {
    /// Body of a response whose content-type starts with `application/json`.
    Json(Value),
    /// Any other body, verbatim.
    Text(String),
}

/// A completed downstream exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct RelayOutcome {
    pub status: u16,
    pub body: DownstreamBody,
}

/// Whether a downstream response declares a JSON body.
pub fn declares_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.trim_start().to_ascii_lowercase().starts_with("application/json"))
}

//! Request identifiers.
//!
//! Every inbound request carries an `x-request-id`. When the caller sent a
//! valid `traceparent`, the id is the W3C trace-id so log lines and spans
//! from every hop of a chain share one key; otherwise a UUID v4 is minted.
//! An id supplied by the caller is kept as-is by `SetRequestIdLayer`.

use axum::http::{HeaderValue, Request};
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

use crate::observability::propagation;

/// Header name for the request identifier.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Request-id generator that prefers the inbound trace-id.
#[derive(Debug, Clone, Copy, Default)]
pub struct TraceAwareRequestId;

impl MakeRequestId for TraceAwareRequestId {
    fn make_request_id<B>(&mut self, request: &Request<B>) -> Option<RequestId> {
        let id = propagation::inbound_trace_id(request.headers())
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

//! Server-side trace context.
//!
//! [`ServerSpan`] builds the single `http_request` server span that
//! `TraceLayer` opens for every inbound request. Its parent is the remote
//! context carried by the request headers, if any, so no span of the request
//! starts a trace of its own. [`trace_context_middleware`] runs inside that
//! span and records the outcome on it. Spans opened by handlers (the
//! outbound `start_request` span in particular) nest under it.

use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request},
    http,
    middleware::Next,
    response::Response,
};
use tower_http::trace::MakeSpan;
use tracing::{field, Span};
use tracing_opentelemetry::OpenTelemetrySpanExt;

use crate::http::request::X_REQUEST_ID;
use crate::observability::{metrics, propagation};

/// Route label for requests that matched no route.
const UNMATCHED_ROUTE: &str = "unmatched";

fn route_label<B>(request: &http::Request<B>) -> String {
    request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| UNMATCHED_ROUTE.to_owned())
}

/// `MakeSpan` for `TraceLayer` producing the server span of a request.
#[derive(Debug, Clone, Copy, Default)]
pub struct ServerSpan;

impl<B> MakeSpan<B> for ServerSpan {
    fn make_span(&mut self, request: &http::Request<B>) -> Span {
        let method = request.method();
        let route = route_label(request);
        let request_id = request
            .headers()
            .get(X_REQUEST_ID)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("unknown");

        let otel_name = format!("{} {}", method, route);

        let span = tracing::info_span!(
            "http_request",
            otel.name = %otel_name,
            otel.kind = "server",
            otel.status_code = field::Empty,
            http.method = %method,
            http.route = %route,
            http.target = %request.uri(),
            request_id = %request_id,
            http.status_code = field::Empty,
        );

        // Must precede the first enter; the OTel span is started lazily from it.
        if let Err(e) = span.set_parent(propagation::extract_context(request.headers())) {
            tracing::debug!(error = ?e, request_id, "Remote parent not attached to server span");
        }
        span
    }
}

/// Record status and request metrics on the enclosing server span.
pub async fn trace_context_middleware(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let route = route_label(&request);

    let response = next.run(request).await;

    let status = response.status();
    let span = Span::current();
    span.record("http.status_code", status.as_u16());
    if status.is_server_error() {
        span.record("otel.status_code", "ERROR");
    }

    metrics::record_request(method.as_str(), &route, status.as_u16(), start);

    response
}

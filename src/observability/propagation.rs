//! W3C Trace Context propagation over HTTP headers.
//!
//! Inbound requests are read through [`HeaderExtractor`]; outbound requests
//! are written through [`HeaderInjector`]. Both wrap the `http::HeaderMap`
//! shared by axum and reqwest, so one pair serves both directions.
//!
//! Injection is a no-op for contexts without a valid span (for example when
//! no OpenTelemetry layer is installed), so nothing is emitted while tracing
//! is disabled.

use axum::http::{HeaderMap, HeaderName, HeaderValue};
use opentelemetry::propagation::{Extractor, Injector, TextMapPropagator};
use opentelemetry::trace::TraceContextExt;
use opentelemetry::Context;
use opentelemetry_sdk::propagation::TraceContextPropagator;
use tracing_opentelemetry::OpenTelemetrySpanExt;

/// Header carrying version, trace-id, parent span-id and flags.
pub const TRACEPARENT_HEADER: &str = "traceparent";

/// Header carrying vendor-specific trace state.
pub const TRACESTATE_HEADER: &str = "tracestate";

/// Write-side carrier over a header map.
pub struct HeaderInjector<'a>(pub &'a mut HeaderMap);

impl Injector for HeaderInjector<'_> {
    fn set(&mut self, key: &str, value: String) {
        if let (Ok(name), Ok(val)) = (
            HeaderName::from_bytes(key.as_bytes()),
            HeaderValue::from_str(&value),
        ) {
            self.0.insert(name, val);
        }
    }
}

/// Read-side carrier over a header map.
pub struct HeaderExtractor<'a>(pub &'a HeaderMap);

impl Extractor for HeaderExtractor<'_> {
    fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|v| v.to_str().ok())
    }

    fn keys(&self) -> Vec<&str> {
        self.0.keys().map(HeaderName::as_str).collect()
    }
}

/// Extract the remote parent context carried by `headers`.
///
/// Returns an empty context when no valid `traceparent` is present, even
/// while a local span is active.
pub fn extract_context(headers: &HeaderMap) -> Context {
    TraceContextPropagator::new()
        .extract_with_context(&Context::new(), &HeaderExtractor(headers))
}

/// Serialize `cx` into `headers`.
pub fn inject_context(cx: &Context, headers: &mut HeaderMap) {
    TraceContextPropagator::new().inject_context(cx, &mut HeaderInjector(headers));
}

/// Build the carrier headers for `span`.
pub fn span_headers(span: &tracing::Span) -> HeaderMap {
    let mut headers = HeaderMap::new();
    inject_context(&span.context(), &mut headers);
    headers
}

/// Trace-id of a valid inbound `traceparent`, as lowercase hex.
pub fn inbound_trace_id(headers: &HeaderMap) -> Option<String> {
    let cx = extract_context(headers);
    let span = cx.span();
    let span_context = span.span_context();
    span_context
        .is_valid()
        .then(|| span_context.trace_id().to_string())
}

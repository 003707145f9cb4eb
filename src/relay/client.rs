//! Span-scoped outbound dispatch.
//!
//! Each call to [`RelayClient::forward`] opens a `start_request` client span
//! as a child of the current (server) span, injects that span's context into
//! the outbound headers, and records the downstream status on it. The span
//! is owned by the instrumented future, so it closes on every exit path.

use std::time::Duration;

use axum::http::HeaderMap;
use tracing::{field, Instrument, Span};

use crate::config::RelayConfig;
use crate::observability::propagation;
use crate::relay::error::RelayError;
use crate::relay::outcome::{declares_json, DownstreamBody, RelayOutcome};

/// Outbound HTTP client shared by all requests.
///
/// Cloning is cheap; the underlying connection handle is reference counted.
#[derive(Clone)]
pub struct RelayClient {
    client: reqwest::Client,
    timeout: Duration,
    app_name: String,
    propagate: bool,
}

impl RelayClient {
    /// Build a client from the relay and telemetry settings.
    pub fn new(config: &RelayConfig) -> Result<Self, RelayError> {
        let timeout = Duration::from_secs(config.relay.timeout_secs);
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .no_proxy()
            .build()
            .map_err(RelayError::ClientBuild)?;

        Ok(Self {
            client,
            timeout,
            app_name: config.service.name.clone(),
            propagate: config.telemetry.enabled,
        })
    }

    /// Outbound timeout applied to every call.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Issue one GET to `target` inside a `start_request` span.
    pub async fn forward(&self, target: &str) -> Result<RelayOutcome, RelayError> {
        let span = tracing::info_span!(
            "start_request",
            otel.name = "start_request",
            otel.kind = "client",
            otel.status_code = field::Empty,
            otel.status_message = field::Empty,
            http.method = "GET",
            http.url = %target,
            app.name = %self.app_name,
            http.status_code = field::Empty,
        );

        let result = self.dispatch(target, &span).instrument(span.clone()).await;
        if let Err(e) = &result {
            span.record("otel.status_code", "ERROR");
            span.record("otel.status_message", e.to_string().as_str());
        }
        result
    }

    async fn dispatch(&self, target: &str, span: &Span) -> Result<RelayOutcome, RelayError> {
        let headers = if self.propagate {
            propagation::span_headers(span)
        } else {
            HeaderMap::new()
        };

        let response = self
            .client
            .get(target)
            .headers(headers)
            .send()
            .await
            .map_err(|e| RelayError::from_reqwest(e, self.timeout))?;

        let status = response.status().as_u16();
        span.record("http.status_code", status);

        let is_json = declares_json(response.headers());
        let text = response
            .text()
            .await
            .map_err(|e| RelayError::from_reqwest(e, self.timeout))?;

        let body = if is_json {
            DownstreamBody::Json(serde_json::from_str(&text)?)
        } else {
            DownstreamBody::Text(text)
        };

        tracing::debug!(status, json = is_json, "Downstream responded");
        Ok(RelayOutcome { status, body })
    }
}

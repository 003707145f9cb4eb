//! OpenTelemetry tracer provider setup.
//!
//! Spans created through `tracing` are bridged into OpenTelemetry by the
//! layer installed in [`crate::observability::logging`], then batched and
//! exported over OTLP/gRPC to the configured collector.

use opentelemetry::global;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::propagation::TraceContextPropagator;
use opentelemetry_sdk::trace::SdkTracerProvider;
use opentelemetry_sdk::Resource;

use crate::config::TelemetryConfig;
use crate::observability::TelemetryError;

/// Instrumentation scope name for spans emitted by this crate.
pub const TRACER_NAME: &str = "trace-relay";

/// Build the tracer provider, or `None` when tracing is disabled.
///
/// Must be called from within a Tokio runtime; the gRPC channel binds to it.
pub fn init_tracer_provider(
    config: &TelemetryConfig,
) -> Result<Option<SdkTracerProvider>, TelemetryError> {
    if !config.enabled {
        return Ok(None);
    }

    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(config.otlp_endpoint.clone())
        .build()?;

    let resource = Resource::builder()
        .with_service_name(config.service_name.clone())
        .build();

    let provider = SdkTracerProvider::builder()
        .with_resource(resource)
        .with_batch_exporter(exporter)
        .build();

    global::set_text_map_propagator(TraceContextPropagator::new());
    global::set_tracer_provider(provider.clone());

    Ok(Some(provider))
}

/// Flush pending spans and stop the exporter.
pub fn shutdown_tracer_provider(provider: SdkTracerProvider) {
    if let Err(e) = provider.shutdown() {
        tracing::warn!(error = %e, "Tracer provider shutdown failed");
    }
}

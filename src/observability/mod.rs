//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handlers and middleware produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//!     → telemetry.rs (spans exported over OTLP)
//!
//! Across process boundaries:
//!     → propagation.rs (W3C traceparent/tracestate in and out)
//! ```

pub mod logging;
pub mod metrics;
pub mod propagation;
pub mod telemetry;

use std::future::Future;
use std::net::AddrParseError;

use opentelemetry_sdk::trace::SdkTracerProvider;
use thiserror::Error;

use crate::config::RelayConfig;

/// Errors raised while installing logging, tracing or metrics.
#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("failed to build OTLP exporter: {0}")]
    Exporter(#[from] opentelemetry_otlp::ExporterBuildError),

    #[error("failed to install tracing subscriber: {0}")]
    Subscriber(#[from] tracing_subscriber::util::TryInitError),

    #[error("failed to install metrics recorder: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),

    #[error("invalid metrics address: {0}")]
    MetricsAddress(#[from] AddrParseError),
}

/// Handle on installed telemetry; flushes spans on [`Telemetry::shutdown`].
pub struct Telemetry {
    provider: Option<SdkTracerProvider>,
}

impl Telemetry {
    /// Whether spans are being exported.
    pub fn tracing_enabled(&self) -> bool {
        self.provider.is_some()
    }

    /// Flush and stop span export.
    pub fn shutdown(self) {
        if let Some(provider) = self.provider {
            telemetry::shutdown_tracer_provider(provider);
        }
    }

    /// Drive `work` to completion, then flush span export whatever its outcome.
    pub async fn flush_after<F: Future>(self, work: F) -> F::Output {
        let output = work.await;
        self.shutdown();
        output
    }
}

/// Install logging, span export and (optionally) the metrics endpoint.
pub fn init(config: &RelayConfig) -> Result<Telemetry, TelemetryError> {
    let provider = telemetry::init_tracer_provider(&config.telemetry)?;
    logging::init_logging(&config.observability, provider.as_ref())?;

    if let Some(addr) = &config.observability.metrics_address {
        metrics::init_metrics(addr.parse()?)?;
    }

    Ok(Telemetry { provider })
}

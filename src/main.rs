//! Traced HTTP Relay
//!
//! # Architecture Overview
//!
//! ```text
//!                  ┌───────────────────────────────────────────────┐
//!                  │                  TRACE RELAY                  │
//!   Inbound        │  ┌────────────┐   ┌──────────────────────┐    │
//!   traceparent ───┼─▶│ request id │──▶│ trace_context (span, │    │
//!                  │  │   layer    │   │  parent from header) │    │
//!                  │  └────────────┘   └──────────┬───────────┘    │
//!                  │                              ▼                │
//!                  │                   ┌──────────────────────┐    │
//!                  │                   │ handlers             │    │
//!                  │                   │  /api/start ─────────┼────┼──▶ Target
//!                  │                   │   (start_request     │    │   (traceparent
//!                  │                   │    span + inject)    │    │    injected)
//!                  │                   │  /api/receive, /,    │    │
//!                  │                   │  /health             │    │
//!                  │                   └──────────────────────┘    │
//!                  │  config · observability (logs, OTLP, metrics) │
//!                  └───────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use trace_relay::config::{load_from, validate_config, ConfigError, RelayConfig};
use trace_relay::observability;
use trace_relay::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "trace-relay")]
#[command(about = "HTTP relay that propagates W3C trace context downstream", long_about = None)]
struct Cli {
    /// Optional TOML config file; environment variables override it.
    #[arg(short, long, env = "RELAY_CONFIG")]
    config: Option<PathBuf>,

    /// Listening port (overrides APP_PORT).
    #[arg(short, long)]
    port: Option<u16>,

    /// Downstream target (overrides TARGET_URL).
    #[arg(short, long)]
    target_url: Option<String>,
}

impl Cli {
    fn apply(self, config: &mut RelayConfig) {
        if let Some(port) = self.port {
            config.service.port = port;
        }
        if let Some(target) = self.target_url {
            config.relay.target_url = Some(target).filter(|t| !t.trim().is_empty());
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = load_from(cli.config.as_deref(), |key| std::env::var(key).ok())?;
    cli.apply(&mut config);
    validate_config(&config).map_err(ConfigError::Validation)?;

    let telemetry = observability::init(&config)?;

    tracing::info!(
        app = %config.service.name,
        port = config.service.port,
        target = config.target_url().unwrap_or("<unset>"),
        tracing_enabled = telemetry.tracing_enabled(),
        otlp_endpoint = %config.telemetry.otlp_endpoint,
        "Starting trace-relay v{}",
        env!("CARGO_PKG_VERSION")
    );

    let served = telemetry
        .flush_after(async {
            let served = serve(config).await;
            if let Err(e) = &served {
                tracing::error!(error = %e, "Server terminated with error");
            }
            served
        })
        .await;

    tracing::info!("Shutdown complete");
    served
}

/// Bind, serve until a shutdown signal, then drain.
async fn serve(config: RelayConfig) -> Result<(), Box<dyn std::error::Error>> {
    let listener = TcpListener::bind((config.service.host.as_str(), config.service.port)).await?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    shutdown.trigger_on_signal();

    let server = HttpServer::new(config)?;
    server.run(listener, server_shutdown).await?;
    Ok(())
}

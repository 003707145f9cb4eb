//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the relay.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the trace relay.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RelayConfig {
    /// Service identity and listener settings.
    pub service: ServiceConfig,

    /// Downstream target settings.
    pub relay: TargetConfig,

    /// Trace export settings.
    pub telemetry: TelemetryConfig,

    /// Inbound request limits.
    pub limits: LimitsConfig,

    /// Logging and metrics settings.
    pub observability: ObservabilityConfig,
}

impl RelayConfig {
    /// Downstream target, if one is configured.
    pub fn target_url(&self) -> Option<&str> {
        self.relay.target_url.as_deref()
    }
}

/// Service identity and listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Display name reported in every response body.
    pub name: String,

    /// Host to bind (e.g., "0.0.0.0").
    pub host: String,

    /// Listening port.
    pub port: u16,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: "trace-relay".to_string(),
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

/// Downstream target configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TargetConfig {
    /// URL that `/api/start` forwards to. `None` means unconfigured.
    pub target_url: Option<String>,

    /// Bound on the whole outbound call in seconds.
    pub timeout_secs: u64,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            target_url: None,
            timeout_secs: 5,
        }
    }
}

/// OpenTelemetry configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Enable span export and trace-context propagation.
    pub enabled: bool,

    /// OTLP/gRPC collector endpoint.
    pub otlp_endpoint: String,

    /// `service.name` resource attribute.
    pub service_name: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            otlp_endpoint: "http://localhost:4317".to_string(),
            service_name: "trace-relay".to_string(),
        }
    }
}

/// Inbound request limits.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Whole-request timeout for inbound requests in seconds.
    pub request_timeout_secs: u64,

    /// Maximum inbound body size in bytes.
    pub max_body_size: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 30,
            max_body_size: 2 * 1024 * 1024, // 2MB
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level used when `RUST_LOG` is not set.
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Prometheus listener address. Metrics exposition is off when unset.
    pub metrics_address: Option<String>,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Text,
            metrics_address: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = RelayConfig::default();
        assert_eq!(config.service.name, "trace-relay");
        assert_eq!(config.service.port, 8000);
        assert_eq!(config.relay.timeout_secs, 5);
        assert!(config.target_url().is_none());
        assert!(config.telemetry.enabled);
        assert_eq!(config.telemetry.otlp_endpoint, "http://localhost:4317");
        assert!(config.observability.metrics_address.is_none());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: RelayConfig = toml::from_str(
            r#"
            [service]
            name = "svc-a"

            [observability]
            log_format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.service.name, "svc-a");
        assert_eq!(config.service.port, 8000);
        assert_eq!(config.observability.log_format, LogFormat::Json);
        assert_eq!(config.limits.max_body_size, 2 * 1024 * 1024);
    }
}

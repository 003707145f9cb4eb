//! Configuration validation.
//!
//! Semantic checks that serde cannot express. Every problem is collected
//! so a misconfigured instance reports them all at once.
//!
//! The relay target is not checked here: an unusable target fails each
//! `/api/start` call with a 500 and leaves the instance serving.

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::RelayConfig;

/// A single semantic problem in a [`RelayConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} must not be empty")]
    Empty { field: &'static str },

    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },

    #[error("invalid URL for {field} ({value}): {reason}")]
    InvalidUrl {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("invalid socket address for {field}: {value}")]
    InvalidAddress { field: &'static str, value: String },
}

/// Validate a configuration, returning every error found.
pub fn validate_config(config: &RelayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.service.name.trim().is_empty() {
        errors.push(ValidationError::Empty { field: "service.name" });
    }
    if config.service.host.trim().is_empty() {
        errors.push(ValidationError::Empty { field: "service.host" });
    }
    if config.relay.timeout_secs == 0 {
        errors.push(ValidationError::Zero { field: "relay.timeout_secs" });
    }
    if config.limits.request_timeout_secs == 0 {
        errors.push(ValidationError::Zero { field: "limits.request_timeout_secs" });
    }
    if config.limits.max_body_size == 0 {
        errors.push(ValidationError::Zero { field: "limits.max_body_size" });
    }

    if config.telemetry.enabled {
        if config.telemetry.service_name.trim().is_empty() {
            errors.push(ValidationError::Empty { field: "telemetry.service_name" });
        }
        if let Err(e) = check_http_url(&config.telemetry.otlp_endpoint) {
            errors.push(ValidationError::InvalidUrl {
                field: "telemetry.otlp_endpoint",
                value: config.telemetry.otlp_endpoint.clone(),
                reason: e,
            });
        }
    }

    if let Some(addr) = &config.observability.metrics_address {
        if addr.parse::<SocketAddr>().is_err() {
            errors.push(ValidationError::InvalidAddress {
                field: "observability.metrics_address",
                value: addr.clone(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_http_url(raw: &str) -> Result<(), String> {
    let url = Url::parse(raw).map_err(|e| e.to_string())?;
    match url.scheme() {
        "http" | "https" => {}
        other => return Err(format!("unsupported scheme '{}'", other)),
    }
    if url.host_str().is_none() {
        return Err("missing host".to_string());
    }
    Ok(())
}

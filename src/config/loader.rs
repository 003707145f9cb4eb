//! Configuration loading from disk and the process environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::{LogFormat, RelayConfig};
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value for {var} ({value:?}): {reason}")]
    Env {
        var: &'static str,
        value: String,
        reason: String,
    },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse a TOML document into a configuration without validating it.
pub fn parse_config(content: &str) -> Result<RelayConfig, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Overlay environment variables onto `config`.
///
/// `lookup` abstracts the environment so tests can supply a map.
pub fn apply_env<F>(config: &mut RelayConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(name) = lookup("APP_NAME") {
        config.service.name = name;
    }
    if let Some(raw) = lookup("APP_PORT") {
        config.service.port = parse_var("APP_PORT", raw)?;
    }
    if let Some(raw) = lookup("TARGET_URL") {
        let trimmed = raw.trim();
        config.relay.target_url = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
    }
    if let Some(raw) = lookup("RELAY_TIMEOUT_SECS") {
        config.relay.timeout_secs = parse_var("RELAY_TIMEOUT_SECS", raw)?;
    }
    if let Some(endpoint) = lookup("OTEL_EXPORTER_OTLP_ENDPOINT") {
        config.telemetry.otlp_endpoint = endpoint;
    }
    if let Some(name) = lookup("OTEL_SERVICE_NAME") {
        config.telemetry.service_name = name;
    }
    if let Some(raw) = lookup("OTEL_SDK_DISABLED") {
        let disabled: bool = parse_var("OTEL_SDK_DISABLED", raw.to_ascii_lowercase())?;
        config.telemetry.enabled = !disabled;
    }
    if let Some(raw) = lookup("LOG_FORMAT") {
        config.observability.log_format = match raw.to_ascii_lowercase().as_str() {
            "json" => LogFormat::Json,
            "text" | "pretty" => LogFormat::Text,
            _ => {
                return Err(ConfigError::Env {
                    var: "LOG_FORMAT",
                    value: raw,
                    reason: "expected 'json' or 'text'".to_string(),
                })
            }
        };
    }
    if let Some(addr) = lookup("METRICS_ADDRESS") {
        config.observability.metrics_address = Some(addr).filter(|a| !a.trim().is_empty());
    }
    Ok(())
}

fn parse_var<T>(var: &'static str, raw: String) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let parsed = raw.trim().parse::<T>();
    parsed.map_err(|e| ConfigError::Env {
        var,
        reason: e.to_string(),
        value: raw,
    })
}

/// Build a configuration from an optional TOML file and the environment,
/// without validating it.
pub fn load_from<F>(path: Option<&Path>, lookup: F) -> Result<RelayConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match path {
        Some(path) => parse_config(&fs::read_to_string(path)?)?,
        None => RelayConfig::default(),
    };
    apply_env(&mut config, lookup)?;
    Ok(config)
}

/// Load from file and environment, then validate.
pub fn load_validated<F>(path: Option<&Path>, lookup: F) -> Result<RelayConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let config = load_from(path, lookup)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

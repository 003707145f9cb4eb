//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! optional config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → environment overlay (APP_NAME, APP_PORT, TARGET_URL, OTEL_*)
//!     → CLI overrides (main.rs)
//!     → validation.rs (semantic checks)
//!     → RelayConfig (validated, immutable)
//!     → shared via Arc to all handlers
//! ```
//!
//! # Design Decisions
//! - Config is read once at startup and never mutated afterwards
//! - All fields have defaults; a missing target URL is a per-request
//!   condition, not a startup failure
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_from, load_validated, ConfigError};
pub use schema::{
    LimitsConfig, LogFormat, ObservabilityConfig, RelayConfig, ServiceConfig, TargetConfig,
    TelemetryConfig,
};
pub use validation::{validate_config, ValidationError};

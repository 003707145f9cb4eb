//! Traced HTTP relay.
//!
//! A small service for exercising distributed-trace propagation across a
//! chain of identical instances. `/api/start` forwards a GET to the
//! configured target inside a client span and injects its W3C trace
//! context; `/api/receive` echoes what it was sent. An inbound
//! `traceparent` becomes the parent of every span opened for that request.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod relay;

pub use config::RelayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use relay::{RelayClient, RelayError};

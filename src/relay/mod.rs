//! Outbound relay subsystem.
//!
//! # Data Flow
//! ```text
//! /api/start handler
//!     → client.rs (open start_request span, inject traceparent, GET target)
//!     → outcome.rs (status + JSON-or-text body)
//!     → error.rs (timeout / connect / request / invalid JSON)
//! ```
//!
//! # Design Decisions
//! - One attempt per call; failures surface as 500, never retried
//! - The outbound timeout bounds the whole exchange, body included

pub mod client;
pub mod error;
pub mod outcome;

pub use client::RelayClient;
pub use error::RelayError;
pub use outcome::{DownstreamBody, RelayOutcome};

//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (x-request-id, trace-id when available)
//!     → middleware/trace_context.rs (extract traceparent, server span)
//!     → handlers.rs (/, /health, /api/start, /api/receive)
//!     → response.rs (JSON bodies)
//!     → Send to client
//! ```

pub mod handlers;
pub mod middleware;
pub mod request;
pub mod response;
pub mod server;

pub use request::{TraceAwareRequestId, X_REQUEST_ID};
pub use server::{AppState, HttpServer};

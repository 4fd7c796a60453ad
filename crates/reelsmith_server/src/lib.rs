//! HTTP server for the Reelsmith content strategy proxy.
//!
//! Exposes each operation as a JSON endpoint, plus health, connectivity
//! and metrics routes.

mod api;
mod config;
mod handler;
mod metrics;
mod server;

pub use api::{ApiState, create_router, operation_path};
pub use config::{AppConfig, DEFAULT_HOST, DEFAULT_PORT, ListenConfig};
pub use handler::{
    PROBE_DEFAULT_PROMPT, PROBE_FAILURE_MESSAGE, PROBE_GET_PROMPT, RequestHandler,
    probe_sampling,
};
pub use metrics::{MetricsSnapshot, OperationSnapshot, RequestMetrics, RequestOutcome};
pub use server::{build_handler, serve, shutdown_signal};

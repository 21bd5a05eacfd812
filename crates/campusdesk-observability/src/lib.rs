//! Campusdesk Observability
//!
//! - Console and rolling-file logging via `tracing`
//! - HTTP request logging middleware for the app shell
//! - Login metrics exported in Prometheus format
//!
//! Metrics can be switched off at runtime with `OBSERVABILITY_ENABLED=false`;
//! the tracking helpers then become no-ops.
//!
//! # Examples
//!
//! ```no_run
//! use campusdesk_observability::{init_tracing, track_login_success};
//!
//! #[tokio::main]
//! async fn main() {
//!     init_tracing("storage/logs");
//!     track_login_success("Student");
//! }
//! ```

pub mod logging;
pub mod metrics;

pub use self::logging::{init_console_logging, init_tracing, logging_middleware};
pub use self::metrics::{
    PrometheusHandle, init_metrics, is_observability_enabled, metrics_app, metrics_middleware,
    track_login_failure, track_login_success, track_logout,
};

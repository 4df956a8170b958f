//! Rollcall Observability Module
//!
//! Provides configurable observability features including:
//! - Console logging through `tracing-subscriber`
//! - Rolling file and JSON logs
//! - Metrics collection via Prometheus
//! - HTTP request/response logging
//!
//! The file logs and metrics are compiled in via the `observability` feature
//! (default). At runtime they can be switched off with the
//! `OBSERVABILITY_ENABLED` environment variable; console logging is always on.
//!
//! # Examples
//!
//! ```no_run
//! use rollcall_observability::init_tracing;
//!
//! #[tokio::main]
//! async fn main() {
//!     init_tracing();
//!     // ... application code ...
//! }
//! ```

use std::sync::OnceLock;

pub mod basic_logging;
#[cfg(feature = "observability")]
pub mod logging;
#[cfg(feature = "observability")]
pub mod metrics;

pub use basic_logging::init_basic_console_logging;

#[cfg(feature = "observability")]
pub use logging::{init_tracing, logging_middleware};
#[cfg(feature = "observability")]
pub use metrics::{
    metrics_middleware, metrics_router, track_notification_recipients,
    track_students_registered, track_student_suspended,
};

static OBSERVABILITY_ENABLED: OnceLock<bool> = OnceLock::new();

/// Check if observability is enabled via the `OBSERVABILITY_ENABLED` env var.
///
/// Always `false` when the `observability` feature is not compiled in.
pub fn is_observability_enabled() -> bool {
    cfg!(feature = "observability")
        && *OBSERVABILITY_ENABLED.get_or_init(|| {
            std::env::var("OBSERVABILITY_ENABLED")
                .map(|v| v.to_lowercase() != "false" && v != "0")
                .unwrap_or(true)
        })
}

// No-op stubs when observability is disabled
#[cfg(not(feature = "observability"))]
pub mod stubs {
    use axum::{Router, extract::Request, middleware::Next, response::Response};

    /// Console logging only when the feature is disabled
    pub fn init_tracing() {
        super::init_basic_console_logging();
    }

    /// Request logging still happens through `tracing` spans in handlers
    pub async fn logging_middleware(req: Request, next: Next) -> Response {
        next.run(req).await
    }

    pub async fn metrics_middleware(req: Request, next: Next) -> Response {
        next.run(req).await
    }

    pub fn metrics_router() -> Option<Router> {
        None
    }

    pub fn track_students_registered(_linked: usize) {}
    pub fn track_student_suspended() {}
    pub fn track_notification_recipients(_count: usize) {}
}

#[cfg(not(feature = "observability"))]
pub use stubs::*;

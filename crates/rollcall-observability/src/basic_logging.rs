use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Builds the filter shared by every console setup.
///
/// `RUST_LOG` wins when set; otherwise `LOG_LEVEL` (default `info`) applies to
/// the application crates and noisy dependencies are held at `warn`.
pub(crate) fn console_filter() -> EnvFilter {
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "rollcall={log_level},rollcall_db={log_level},tower_http=warn,hyper=warn,sqlx=warn,axum::rejection=trace"
        ))
    })
}

/// Initialize console-only logging.
///
/// Used when observability is disabled at compile time or through
/// `OBSERVABILITY_ENABLED=false`. All `tracing` macros still reach stdout in
/// compact format.
pub fn init_basic_console_logging() {
    let console_layer = fmt::layer()
        .compact()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_filter(console_filter());

    // A subscriber may already be installed
    let _ = tracing_subscriber::registry().with(console_layer).try_init();
}

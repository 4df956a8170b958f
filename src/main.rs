use anyhow::Context;
use dotenvy::dotenv;
use rollcall::repositories::Repositories;
use rollcall::router::init_router;
use rollcall::state::AppState;
use rollcall_config::{CorsConfig, DatabaseConfig, ServerConfig};
use rollcall_db::{init_db_pool, run_migrations};
use rollcall_observability::{init_tracing, metrics_router};
use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing();

    let server_config = ServerConfig::from_env()?;
    let database_config = DatabaseConfig::from_env()?;

    let pool = init_db_pool(&database_config).await?;
    if database_config.run_migrations {
        run_migrations(&pool).await?;
    }

    let state = AppState::new(Repositories::postgres(pool), CorsConfig::from_env());
    let mut app = init_router(state);
    if let Some(metrics) = metrics_router() {
        app = app.merge(metrics);
    }

    let addr = server_config.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!(%addr, "Server running");
    info!("Swagger UI available at http://{addr}/swagger-ui");
    info!("Scalar UI available at http://{addr}/scalar");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}

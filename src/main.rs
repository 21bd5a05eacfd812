use anyhow::Context;
use dotenvy::dotenv;
use tokio::net::TcpListener;
use tracing::info;

use campusdesk::router::init_router;
use campusdesk::state::init_app_state;
use campusdesk_config::ShellConfig;
use campusdesk_observability::{init_metrics, init_tracing, metrics_app};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing("storage/logs");

    let shell_config = ShellConfig::from_env();
    let state = init_app_state().context("Failed to initialize app state")?;

    let mut app = init_router(state);
    if let Some(handle) = init_metrics() {
        app = app.merge(metrics_app(handle));
    }

    let listener = TcpListener::bind(shell_config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", shell_config.bind_addr))?;
    info!(addr = %shell_config.bind_addr, "Campusdesk running on http://{}", shell_config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}

//! Serve command - runs the API server with the expiry sweeper

use std::net::SocketAddr;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;

use crate::api::router::create_router;
use crate::config::AppConfig;
use crate::infrastructure::logging;
use crate::infrastructure::matching::ExpirationSweeper;

/// Run the API server
pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().unwrap_or_default();
    logging::init_logging(&config.logging);

    let state = crate::create_app_state(&config);

    let sweeper = ExpirationSweeper::new(
        state.engine.clone(),
        Duration::from_secs(config.matching.sweep_interval_secs),
    );
    let sweeper_handle = sweeper.spawn();

    let app = create_router(state);
    let addr = build_socket_addr(&config)?;
    info!(%addr, team_size = config.matching.team_size, "Starting API server");

    let listener = TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    sweeper_handle.abort();
    info!("API server shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}

fn build_socket_addr(config: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    )))
}

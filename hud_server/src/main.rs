//! HUD server binary.

use std::net::SocketAddr;

use clap::Parser;
use hud_server::config::HudConfig;
use hud_server::routes::{hud_router, HudRouterState};

#[derive(Parser)]
#[command(name = "hud", about = "Developer HUD: build errors and resource sidebar")]
struct Cli {
    /// Server port
    #[arg(short, long, env = "HUD_PORT", default_value = "10350")]
    port: u16,

    /// Host name used in websocket data URLs
    #[arg(long, env = "HUD_HOST", default_value = "localhost")]
    host: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_default();
    if log_format == "json" {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "info".into()),
            )
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "info".into()),
            )
            .init();
    }

    let cli = Cli::parse();

    tracing::info!("Starting HUD server...");

    let config = HudConfig::from_env()?;
    let state = HudRouterState::new(config, &cli.host)?;
    if let Some(room) = state.path_builder.room_id() {
        tracing::info!(room, "Serving shared room view");
    }
    tracing::info!("Resource data URL: {}", state.path_builder.data_url());

    let app = hud_router(state);

    // Initialize metrics
    hud_server::metrics::init_metrics();

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
    tracing::info!("HUD server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received SIGINT, shutting down..."),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down..."),
    }
}

//! MyCloudX Server
//!
//! Share files across the local network: upload, list, download and delete
//! through a small HTTP API guarded by one shared token, with a QR page so a
//! phone can open the server without typing its address.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod auth;
mod config;
mod error;
mod net;
mod qr;
mod routes;
mod state;
mod storage;

use config::Config;
use state::AppState;
use storage::LocalFileStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "mycloudx_server=debug,tower_http=debug".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    tracing::info!("Starting MyCloudX Server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Upload directory: {}", config.storage.upload_dir.display());

    // The upload directory must exist before the first request
    let store = LocalFileStore::open(&config.storage.upload_dir)
        .await
        .with_context(|| {
            format!(
                "Failed to create upload directory {}",
                config.storage.upload_dir.display()
            )
        })?;

    tokio::fs::create_dir_all(&config.storage.static_dir)
        .await
        .with_context(|| {
            format!(
                "Failed to create static directory {}",
                config.storage.static_dir.display()
            )
        })?;

    let local_ip = net::detect_local_ip().await;
    let public_url = net::public_base_url(&config, local_ip);

    let app_state = AppState::new(config.clone(), Arc::new(store), public_url.clone());
    let app = routes::app(app_state);

    let bind = (config.server.host.as_str(), config.server.port);
    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("Failed to bind {}:{}", bind.0, bind.1))?;
    let addr: SocketAddr = listener.local_addr()?;

    tracing::info!("MyCloudX Server listening on {}", addr);
    println!(
        "\nMyCloudX is live at:\n  http://127.0.0.1:{}\n  {} (Wi-Fi access)\n",
        config.server.port, public_url
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
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
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown...");
        },
    }
}

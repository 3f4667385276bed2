use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tracing::{info, warn};

use game_core::WordBank;
use game_server::{
    config::Config, create_routes, game_manager::GameManager, websocket::ConnectionManager,
};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    info!("Starting hangman party server...");

    let config = Config::from_env()?;

    let word_bank = match &config.word_bank_file {
        Some(path) => {
            info!("Loading word bank from {}", path.display());
            WordBank::from_file(path)?
        }
        None => {
            info!("Using the built-in word bank");
            WordBank::default()
        }
    };

    let connection_manager = Arc::new(ConnectionManager::new());
    let game_manager = Arc::new(GameManager::new(
        connection_manager.clone(),
        config.game_settings(),
        word_bank,
    ));

    let routes = create_routes(connection_manager.clone(), game_manager);

    // Drop views that stopped sending heartbeats
    let cleanup_connection_manager = connection_manager.clone();
    let connection_timeout = Duration::from_secs(config.connection_timeout_seconds);
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(30));
        loop {
            interval.tick().await;
            cleanup_connection_manager
                .cleanup_inactive_connections(connection_timeout)
                .await;
        }
    });

    let ip = config
        .host
        .parse::<std::net::IpAddr>()
        .with_context(|| format!("Invalid HOST: {}", config.host))?;

    info!("Server starting on {}:{}", config.host, config.port);

    let (addr, server) = warp::serve(routes)
        .try_bind_with_graceful_shutdown((ip, config.port), async {
            match signal::ctrl_c().await {
                Ok(()) => info!("Received Ctrl+C, shutting down gracefully..."),
                Err(e) => {
                    warn!("Failed to listen for Ctrl+C, running until killed: {}", e);
                    std::future::pending::<()>().await;
                }
            }
        })
        .context("binding server address")?;

    info!(
        "Server started successfully on {}. Press Ctrl+C to stop.",
        addr
    );
    server.await;
    info!("Server shutdown complete.");
    Ok(())
}

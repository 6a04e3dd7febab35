// ABOUTME: Server binary for the Withings body-composition bridge
// ABOUTME: Wires configuration, credential lifecycle, scheduler, and the HTTP server
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Withings Bridge Server Binary
//!
//! Starts the token-rotation and sync scheduler, then serves the read
//! endpoints until shutdown.

use anyhow::Result;
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};
use withings_bridge::{
    config::ServerConfig,
    logging,
    providers::WithingsClient,
    routes::{AppState, BridgeRoutes},
    scheduler,
    sync::{ChangeNotifier, SyncService},
    token_manager::TokenManager,
    token_store::TokenStore,
};

#[derive(Parser)]
#[command(name = "withings-bridge")]
#[command(about = "Withings body-composition sync bridge")]
struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_from_env()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    let config = Arc::new(config);

    info!("Starting Withings bridge");
    info!("{}", config.summary());

    let store = TokenStore::new(&config.token_file);
    let tokens = Arc::new(TokenManager::load(config.withings.clone(), store).await);

    let provider = Arc::new(WithingsClient::new(
        config.withings.clone(),
        config.sync_start_unix,
    ));
    let notifier = ChangeNotifier::new(config.webhook_url.clone());
    let sync = Arc::new(SyncService::new(provider, notifier, config.user_height_cm));

    // The consent URL is logged at boot so a fresh deployment can be
    // authorized without digging through the route table.
    match config.withings.authorization_url() {
        Ok(url) => info!("authorize this bridge at: {url}"),
        Err(e) => warn!("could not build authorization URL: {e}"),
    }

    scheduler::start(Arc::clone(&tokens), Arc::clone(&sync), &config).await;

    let app = BridgeRoutes::router(AppState {
        config: Arc::clone(&config),
        tokens,
        sync,
    });

    let addr = SocketAddr::from(([0, 0, 0, 0], config.http_port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Resolve on Ctrl-C; in-flight rotations and fetches are abandoned, which
/// is safe because all persisted writes are whole-value swaps.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for shutdown signal: {e}");
    }
    info!("shutdown signal received");
}

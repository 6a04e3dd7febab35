// ABOUTME: Periodic drivers for token rotation and measurement sync
// ABOUTME: One synchronous warm-up pass, then two uncoordinated interval loops
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Scheduler
//!
//! Two independent periodic tasks share state only through the token
//! manager's published access token and the sync service's published
//! snapshot, both whole-value swaps. They are deliberately uncoordinated:
//! a sync may run with an access token that a mid-flight rotation is about
//! to replace, which the provider tolerates until the rotation completes.
//!
//! The warm-up pass runs before either timer starts so the first HTTP reads
//! see a populated snapshot whenever the upstream is reachable at boot.
//! Failures in any tick are logged and contained; the loops never exit.

use crate::config::ServerConfig;
use crate::errors::SyncError;
use crate::sync::SyncService;
use crate::token_manager::TokenManager;
use std::sync::Arc;
use tokio::time::{interval_at, Duration, Instant};
use tracing::{info, warn};

/// Run the warm-up pass, then spawn the rotation and sync loops.
pub async fn start(tokens: Arc<TokenManager>, sync: Arc<SyncService>, config: &ServerConfig) {
    if let Err(e) = tokens.rotate().await {
        warn!("initial token rotation failed: {e}");
    }
    run_sync(&tokens, &sync).await;

    spawn_rotation_loop(
        Arc::clone(&tokens),
        config.token_rotation_period,
    );
    spawn_sync_loop(tokens, sync, config.sync_period);

    info!(
        "scheduler started (rotation every {}s, sync every {}s)",
        config.token_rotation_period.as_secs(),
        config.sync_period.as_secs(),
    );
}

fn spawn_rotation_loop(tokens: Arc<TokenManager>, period: Duration) {
    tokio::spawn(async move {
        // The warm-up already rotated; first tick fires one period from now.
        let mut ticks = interval_at(Instant::now() + period, period);
        loop {
            ticks.tick().await;
            if let Err(e) = tokens.rotate().await {
                warn!("token rotation failed: {e}");
            }
        }
    });
}

fn spawn_sync_loop(tokens: Arc<TokenManager>, sync: Arc<SyncService>, period: Duration) {
    tokio::spawn(async move {
        let mut ticks = interval_at(Instant::now() + period, period);
        loop {
            ticks.tick().await;
            run_sync(&tokens, &sync).await;
        }
    });
}

async fn run_sync(tokens: &Arc<TokenManager>, sync: &Arc<SyncService>) {
    let Some(access_token) = tokens.access_token().await else {
        warn!("skipping sync: no access token held yet");
        return;
    };

    match sync.sync(&access_token).await {
        Ok(()) => {}
        Err(SyncError::EmptyHistory) => {
            warn!("sync produced no valid readings; previous snapshot retained");
        }
        Err(e) => warn!("sync failed: {e}"),
    }
}

// ABOUTME: Sync pipeline: fetch, change detection, transform, snapshot publish
// ABOUTME: Owns the snapshot readers consume; replaced wholesale, never mutated
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Sync Service
//!
//! One `sync` run executes fetch → change detection (side-effect: webhook
//! notification) → transform → publish. Every failure leaves the previously
//! published snapshot authoritative:
//!
//! - provider rejection or transport failure: snapshot AND detector state
//!   untouched, retried on the next tick
//! - empty transformed history: snapshot untouched (the provider should
//!   never return zero valid readings for an active account, but an empty
//!   history must not unpublish real data)
//!
//! Readers clone an `Arc` out of the lock, so a reader never observes a
//! partially updated collection and never blocks on upstream calls.

pub mod change_detector;
pub mod transform;

pub use change_detector::{ChangeDetector, ChangeNotifier};

use crate::errors::SyncError;
use crate::models::BodySnapshot;
use crate::providers::BodyCompositionProvider;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};

/// The periodic fetch→transform→publish pipeline plus the published
/// snapshot.
pub struct SyncService {
    provider: Arc<dyn BodyCompositionProvider>,
    detector: Mutex<ChangeDetector>,
    notifier: ChangeNotifier,
    snapshot: RwLock<Arc<BodySnapshot>>,
    user_height_cm: f64,
}

impl SyncService {
    /// Create a service with an empty published snapshot.
    pub fn new(
        provider: Arc<dyn BodyCompositionProvider>,
        notifier: ChangeNotifier,
        user_height_cm: f64,
    ) -> Self {
        Self {
            provider,
            detector: Mutex::new(ChangeDetector::new()),
            notifier,
            snapshot: RwLock::new(Arc::new(BodySnapshot::default())),
            user_height_cm,
        }
    }

    /// The currently published snapshot. Never blocks on upstream work and
    /// never fails; at worst it is stale.
    pub async fn snapshot(&self) -> Arc<BodySnapshot> {
        Arc::clone(&*self.snapshot.read().await)
    }

    /// Run one sync cycle with the given access token.
    ///
    /// # Errors
    ///
    /// Returns a [`SyncError`]; in every error case the previously
    /// published snapshot is left bit-for-bit unchanged.
    pub async fn sync(&self, access_token: &str) -> Result<(), SyncError> {
        let groups = self.provider.fetch_measurements(access_token).await?;

        let changed = self.detector.lock().await.observe(groups.len());
        if changed {
            info!("upstream measurement count changed; notifying subscriber");
            self.notifier.notify();
        }

        let history = transform::transform(&groups, self.user_height_cm);
        if history.is_empty() {
            return Err(SyncError::EmptyHistory);
        }

        let next = Arc::new(BodySnapshot::from_history(history));
        *self.snapshot.write().await = next;

        debug!("published snapshot");
        Ok(())
    }
}

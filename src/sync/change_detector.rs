// ABOUTME: Upstream change detection by measurement-group count comparison
// ABOUTME: Fire-and-forget webhook notification when the count moves
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Change detection and notification.
//!
//! The heuristic compares successive raw-group counts. The very first
//! observation after process start only seeds the baseline and is never
//! reported, so a boot does not produce a false-positive notification.
//!
//! The baseline advances only when the observed count matches it: once a
//! change is detected, every following sync keeps reporting a change until
//! the count returns to the baseline. The webhook is level-triggered, not
//! edge-triggered, and subscribers must treat it accordingly.

use tracing::warn;

/// Group-count comparator with process-lifetime state.
#[derive(Debug, Default)]
pub struct ChangeDetector {
    last_group_count: Option<usize>,
}

impl ChangeDetector {
    /// Create a detector with no baseline yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one observed group count; returns whether upstream data
    /// changed since the baseline.
    pub fn observe(&mut self, group_count: usize) -> bool {
        match self.last_group_count {
            // First observation seeds the baseline without reporting.
            None => {
                self.last_group_count = Some(group_count);
                false
            }
            Some(baseline) if baseline != group_count => true,
            Some(_) => {
                self.last_group_count = Some(group_count);
                false
            }
        }
    }
}

/// Best-effort change notification to an external webhook.
///
/// Delivery is not guaranteed and failures are deliberately swallowed;
/// this is telemetry, not a delivery channel.
pub struct ChangeNotifier {
    client: reqwest::Client,
    webhook_url: Option<String>,
}

impl ChangeNotifier {
    /// Create a notifier; `None` disables notifications entirely.
    #[must_use]
    pub fn new(webhook_url: Option<String>) -> Self {
        Self {
            client: crate::utils::http_client::oauth_client(),
            webhook_url,
        }
    }

    /// Fire one empty POST at the webhook without awaiting the outcome.
    pub fn notify(&self) {
        let Some(url) = self.webhook_url.clone() else {
            return;
        };
        let client = self.client.clone();

        tokio::spawn(async move {
            if let Err(e) = client.post(&url).send().await {
                warn!("change notification to {url} failed: {e}");
            }
        });
    }
}

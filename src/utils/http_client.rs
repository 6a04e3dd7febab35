// ABOUTME: Timeout-bounded reqwest client construction
// ABOUTME: Separate profiles for OAuth exchanges and measurement fetches
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client factories.
//!
//! Every outbound call carries a bounded timeout so a slow rotation or fetch
//! cannot starve the next scheduled tick.

use reqwest::{Client, ClientBuilder};
use std::time::Duration;

fn client_with_timeout(timeout_secs: u64, connect_timeout_secs: u64) -> Client {
    ClientBuilder::new()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(connect_timeout_secs))
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// Client for OAuth token exchanges. Short timeouts: token calls are fast
/// operations and retried on the next rotation tick anyway.
#[must_use]
pub fn oauth_client() -> Client {
    client_with_timeout(15, 5)
}

/// Client for measurement fetches, with room for larger responses.
#[must_use]
pub fn api_client() -> Client {
    client_with_timeout(30, 10)
}

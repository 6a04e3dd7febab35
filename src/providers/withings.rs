// ABOUTME: Withings measurement API client
// ABOUTME: Bearer-authenticated getmeas fetch with the fixed body-composition filter
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Withings provider implementation for body-composition retrieval.
//!
//! Issues a single form-encoded `action=getmeas` POST filtered to the five
//! body-composition measurement types, authenticated with the access token
//! currently held by the token manager.
//!
//! # API Documentation
//! - [Withings Measure API](https://developer.withings.com/api-reference/#tag/measure)

use super::{BodyCompositionProvider, MeasureGroup};
use crate::config::WithingsConfig;
use crate::constants::{api, measures};
use crate::errors::FetchError;
use crate::oauth2_client::ApiEnvelope;
use crate::utils::http_client::api_client;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

/// Withings measurement client.
pub struct WithingsClient {
    client: reqwest::Client,
    config: WithingsConfig,
    sync_start_unix: i64,
}

#[derive(Debug, Deserialize)]
struct MeasureResponseBody {
    #[serde(rename = "measuregrps", default)]
    measure_groups: Vec<MeasureGroup>,
}

impl WithingsClient {
    /// Create a client fetching measurements recorded after
    /// `sync_start_unix`.
    #[must_use]
    pub fn new(config: WithingsConfig, sync_start_unix: i64) -> Self {
        Self {
            client: api_client(),
            config,
            sync_start_unix,
        }
    }
}

#[async_trait]
impl BodyCompositionProvider for WithingsClient {
    async fn fetch_measurements(
        &self,
        access_token: &str,
    ) -> Result<Vec<MeasureGroup>, FetchError> {
        let start_date = self.sync_start_unix.to_string();
        let params = [
            ("action", api::ACTION_GET_MEASURES),
            ("meastypes", measures::TYPE_FILTER),
            ("startdate", start_date.as_str()),
        ];

        let response = self
            .client
            .post(&self.config.measure_url)
            .bearer_auth(access_token)
            .form(&params)
            .send()
            .await?;

        let bytes = response.bytes().await?;
        let envelope: ApiEnvelope<MeasureResponseBody> =
            serde_json::from_slice(&bytes).map_err(|_| FetchError::MalformedResponse)?;

        let body = envelope.into_body().map_err(|status| match status {
            Some(status) => FetchError::ProviderRejected { status },
            None => FetchError::MalformedResponse,
        })?;

        debug!(
            "fetched {} measurement groups from Withings",
            body.measure_groups.len()
        );

        Ok(body.measure_groups)
    }
}

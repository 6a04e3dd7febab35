// ABOUTME: Environment configuration management for the Withings bridge
// ABOUTME: Reads deployment settings from environment variables with validated defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Environment-based configuration
//!
//! The bridge is configured entirely through environment variables. The two
//! Withings application credentials are required; everything else falls back
//! to the defaults in [`crate::constants::defaults`].

use crate::constants::{api, defaults, env_names};
use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Withings application and endpoint settings
#[derive(Debug, Clone)]
pub struct WithingsConfig {
    /// OAuth client id issued by Withings
    pub client_id: String,
    /// OAuth client secret issued by Withings
    pub client_secret: String,
    /// Redirect URI registered with the Withings application
    pub redirect_uri: String,
    /// Token exchange endpoint
    pub token_url: String,
    /// Measurement retrieval endpoint
    pub measure_url: String,
    /// Interactive authorization endpoint
    pub authorize_url: String,
}

impl WithingsConfig {
    /// Build the interactive authorization URL users are redirected to.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured authorization endpoint is not a
    /// valid URL.
    pub fn authorization_url(&self) -> Result<String> {
        let mut url = Url::parse(&self.authorize_url).context("invalid authorize URL")?;

        url.query_pairs_mut()
            .append_pair("response_type", "code")
            .append_pair("client_id", &self.client_id)
            .append_pair("state", defaults::OAUTH_STATE)
            .append_pair("scope", api::OAUTH_SCOPE)
            .append_pair("redirect_uri", &self.redirect_uri);

        Ok(url.to_string())
    }
}

/// Complete server configuration loaded from the environment
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP listen port
    pub http_port: u16,
    /// Withings application settings
    pub withings: WithingsConfig,
    /// Path of the persisted refresh-token file
    pub token_file: PathBuf,
    /// Change-notification webhook; notifications are disabled when unset
    pub webhook_url: Option<String>,
    /// User height in centimeters, used to derive BMI at transform time
    pub user_height_cm: f64,
    /// Earliest measurement date fetched, unix timestamp
    pub sync_start_unix: i64,
    /// How often the refresh/access pair is rotated
    pub token_rotation_period: Duration,
    /// How often the measurement sync pipeline runs
    pub sync_period: Duration,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable (`WITHINGS_CLIENT_ID`,
    /// `WITHINGS_CLIENT_SECRET`) is missing.
    pub fn from_env() -> Result<Self> {
        let client_id = env::var(env_names::CLIENT_ID)
            .with_context(|| format!("{} must be set", env_names::CLIENT_ID))?;
        let client_secret = env::var(env_names::CLIENT_SECRET)
            .with_context(|| format!("{} must be set", env_names::CLIENT_SECRET))?;

        Ok(Self {
            http_port: parse_env(env_names::HTTP_PORT, defaults::HTTP_PORT),
            withings: WithingsConfig {
                client_id,
                client_secret,
                redirect_uri: env::var(env_names::REDIRECT_URI)
                    .unwrap_or_else(|_| defaults::REDIRECT_URI.into()),
                token_url: env::var(env_names::TOKEN_URL)
                    .unwrap_or_else(|_| api::TOKEN_URL.into()),
                measure_url: env::var(env_names::MEASURE_URL)
                    .unwrap_or_else(|_| api::MEASURE_URL.into()),
                authorize_url: api::AUTHORIZE_URL.into(),
            },
            token_file: PathBuf::from(
                env::var(env_names::TOKEN_FILE).unwrap_or_else(|_| defaults::TOKEN_FILE.into()),
            ),
            webhook_url: env::var(env_names::WEBHOOK_URL).ok(),
            user_height_cm: parse_env(env_names::USER_HEIGHT_CM, defaults::USER_HEIGHT_CM),
            sync_start_unix: parse_env(env_names::SYNC_START_UNIX, defaults::SYNC_START_UNIX),
            token_rotation_period: Duration::from_secs(parse_env(
                env_names::TOKEN_ROTATION_SECS,
                defaults::TOKEN_ROTATION_SECS,
            )),
            sync_period: Duration::from_secs(parse_env(env_names::SYNC_SECS, defaults::SYNC_SECS)),
        })
    }

    /// One-line startup summary, safe to log (no secrets).
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "port={} token_file={} rotation={}s sync={}s webhook={}",
            self.http_port,
            self.token_file.display(),
            self.token_rotation_period.as_secs(),
            self.sync_period.as_secs(),
            self.webhook_url.as_deref().unwrap_or("disabled"),
        )
    }
}

/// Parse an environment variable, falling back to the default when unset or
/// unparseable.
fn parse_env<T: std::str::FromStr + Copy>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

// ABOUTME: Credential lifecycle: access-token rotation and the one-time code exchange
// ABOUTME: Persists the refresh token before publishing the paired access token
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Token Manager
//!
//! Owns the single upstream account's credential pair. The refresh token is
//! durable (seeded from [`TokenStore`] at startup); the access token lives
//! only in process memory and is replaced on every successful rotation.
//!
//! Failure policy: a rejected or failed exchange leaves the previously held
//! access token published; stale-but-valid is preferred over empty. A
//! persistence failure after a successful exchange is logged and the
//! in-memory credential still advances for the rest of the process lifetime.

use crate::config::WithingsConfig;
use crate::errors::AuthError;
use crate::oauth2_client::{self, TokenPair};
use crate::token_store::TokenStore;
use crate::utils::http_client::oauth_client;
use tokio::sync::RwLock;
use tracing::{info, warn};

#[derive(Debug, Default)]
struct Credential {
    refresh_token: String,
    access_token: Option<String>,
}

/// Rotates and publishes the upstream credential pair.
pub struct TokenManager {
    config: WithingsConfig,
    store: TokenStore,
    client: reqwest::Client,
    credential: RwLock<Credential>,
}

impl TokenManager {
    /// Create a manager seeded with the refresh token currently persisted
    /// in `store` (possibly empty when the authorization flow has never
    /// run).
    pub async fn load(config: WithingsConfig, store: TokenStore) -> Self {
        let refresh_token = store.load().await;
        if refresh_token.is_empty() {
            warn!(
                "no refresh token found at {}; rotation will fail until the authorization flow runs",
                store.path().display()
            );
        }

        Self {
            config,
            store,
            client: oauth_client(),
            credential: RwLock::new(Credential {
                refresh_token,
                access_token: None,
            }),
        }
    }

    /// The currently published access token, if any rotation or code
    /// exchange has succeeded.
    pub async fn access_token(&self) -> Option<String> {
        self.credential.read().await.access_token.clone()
    }

    /// Exchange the held refresh token for a fresh access/refresh pair.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MissingRefreshToken`] when no refresh token is
    /// held, or the exchange failure otherwise. In every error case the
    /// previously published access token remains in use.
    pub async fn rotate(&self) -> Result<(), AuthError> {
        let refresh_token = self.credential.read().await.refresh_token.clone();
        if refresh_token.is_empty() {
            return Err(AuthError::MissingRefreshToken);
        }

        let pair = oauth2_client::refresh_token(&self.client, &self.config, &refresh_token).await?;
        self.install(pair).await;

        info!("Withings access token rotated");
        Ok(())
    }

    /// Run the one-time interactive authorization-code exchange and adopt
    /// the resulting credential pair.
    ///
    /// # Errors
    ///
    /// Returns the exchange failure; no credential state changes on error.
    pub async fn exchange_authorization_code(&self, code: &str) -> Result<(), AuthError> {
        let pair = oauth2_client::exchange_code(&self.client, &self.config, code).await?;
        self.install(pair).await;

        info!("Withings authorization code exchanged");
        Ok(())
    }

    /// Persist the new refresh token, then publish the pair.
    ///
    /// The store write happens first so disk never holds a refresh token
    /// newer than the access token in memory. If the write fails the
    /// in-memory credential advances anyway.
    async fn install(&self, pair: TokenPair) {
        if let Err(e) = self.store.save(&pair.refresh_token).await {
            warn!("{e}; continuing with the in-memory credential");
        }

        let mut credential = self.credential.write().await;
        credential.refresh_token = pair.refresh_token;
        credential.access_token = Some(pair.access_token);
    }
}

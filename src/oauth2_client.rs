// ABOUTME: OAuth2 token exchange against the Withings token endpoint
// ABOUTME: Form-encoded requesttoken calls for refresh and authorization-code grants
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Withings OAuth2 Client
//!
//! Withings runs both OAuth grants through one endpoint
//! (`action=requesttoken`) and wraps every response in a
//! `{status, body}` envelope where a non-zero `status` signals an error
//! regardless of the HTTP status code. Both failure shapes (non-zero
//! status, unparseable body) leave the caller's credential state
//! untouched.

use crate::config::WithingsConfig;
use crate::constants::api;
use crate::errors::AuthError;
use serde::Deserialize;

/// The `{status, body}` envelope convention shared by all Withings
/// endpoints.
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    /// Provider status; zero is success
    pub status: i32,
    /// Payload, present on success
    pub body: Option<T>,
}

impl<T> ApiEnvelope<T> {
    /// Unwrap the payload of a successful envelope, or report the provider
    /// status that rejected the call.
    ///
    /// # Errors
    ///
    /// Returns the non-zero `status` when the provider rejected the call,
    /// or `None` when a zero-status envelope is missing its body (a
    /// malformed response).
    pub fn into_body(self) -> Result<T, Option<i32>> {
        if self.status != api::STATUS_OK {
            return Err(Some(self.status));
        }
        self.body.ok_or(None)
    }
}

/// A freshly issued access/refresh token pair.
#[derive(Debug, Clone)]
pub struct TokenPair {
    /// Short-lived bearer credential
    pub access_token: String,
    /// Long-lived credential for the next exchange
    pub refresh_token: String,
}

#[derive(Debug, Deserialize)]
struct TokenBody {
    access_token: String,
    refresh_token: String,
}

/// Exchange a refresh token for a new access/refresh pair.
///
/// # Errors
///
/// Returns [`AuthError::ProviderRejected`] on a non-zero envelope status,
/// [`AuthError::MalformedResponse`] when the body cannot be parsed, or
/// [`AuthError::Request`] on transport failure.
pub async fn refresh_token(
    client: &reqwest::Client,
    config: &WithingsConfig,
    refresh_token: &str,
) -> Result<TokenPair, AuthError> {
    let params = [
        ("action", api::ACTION_REQUEST_TOKEN),
        ("client_id", config.client_id.as_str()),
        ("client_secret", config.client_secret.as_str()),
        ("grant_type", "refresh_token"),
        ("refresh_token", refresh_token),
    ];

    request_token(client, config, &params).await
}

/// Exchange a one-time authorization code for the initial token pair.
///
/// # Errors
///
/// Same failure modes as [`refresh_token`].
pub async fn exchange_code(
    client: &reqwest::Client,
    config: &WithingsConfig,
    code: &str,
) -> Result<TokenPair, AuthError> {
    let params = [
        ("action", api::ACTION_REQUEST_TOKEN),
        ("client_id", config.client_id.as_str()),
        ("client_secret", config.client_secret.as_str()),
        ("grant_type", "authorization_code"),
        ("code", code),
        ("redirect_uri", config.redirect_uri.as_str()),
    ];

    request_token(client, config, &params).await
}

async fn request_token(
    client: &reqwest::Client,
    config: &WithingsConfig,
    params: &[(&str, &str)],
) -> Result<TokenPair, AuthError> {
    let response = client
        .post(&config.token_url)
        .form(params)
        .send()
        .await?;

    let bytes = response.bytes().await?;
    let envelope: ApiEnvelope<TokenBody> =
        serde_json::from_slice(&bytes).map_err(|_| AuthError::MalformedResponse)?;

    let body = envelope.into_body().map_err(|status| match status {
        Some(status) => AuthError::ProviderRejected { status },
        None => AuthError::MalformedResponse,
    })?;

    Ok(TokenPair {
        access_token: body.access_token,
        refresh_token: body.refresh_token,
    })
}

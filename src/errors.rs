// ABOUTME: Domain error types for the Withings bridge
// ABOUTME: Auth, fetch, persistence, and sync failures with structured context
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Error Types
//!
//! Every failure in this crate is contained within a single scheduled cycle:
//! a failed rotation leaves the previous access token in use, a failed fetch
//! leaves the previous snapshot published, and a failed persistence write
//! leaves the in-memory credential usable. Nothing here terminates the
//! scheduler or the process.

use std::path::PathBuf;
use thiserror::Error;

/// Failures during OAuth2 token exchange or rotation.
///
/// On any of these the previously held access token is NOT replaced; the
/// next scheduled rotation retries with the same refresh token.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The provider signalled an error through its envelope status field
    #[error("Withings rejected the token request (status {status})")]
    ProviderRejected {
        /// Non-zero status from the `{status, body}` envelope
        status: i32,
    },

    /// The response body could not be parsed as a token envelope; treated
    /// the same as a provider rejection
    #[error("malformed token response from Withings")]
    MalformedResponse,

    /// No refresh token is stored yet; the interactive authorization flow
    /// has to run first
    #[error("no refresh token available; complete the authorization flow first")]
    MissingRefreshToken,

    /// Transport-level failure reaching the token endpoint
    #[error("token endpoint request failed")]
    Request(#[from] reqwest::Error),
}

/// Failures during measurement retrieval.
///
/// The caller must not touch the published snapshot or the change-detector
/// state on any of these; the previous snapshot stays authoritative.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The provider signalled an error through its envelope status field
    #[error("Withings rejected the measurement fetch (status {status})")]
    ProviderRejected {
        /// Non-zero status from the `{status, body}` envelope
        status: i32,
    },

    /// The response body could not be parsed as a measurement envelope
    #[error("malformed measurement response from Withings")]
    MalformedResponse,

    /// No access token has been published yet (rotation has not succeeded
    /// since startup)
    #[error("no access token held; token rotation has not succeeded yet")]
    MissingAccessToken,

    /// Transport-level failure reaching the measurement endpoint
    #[error("measurement request failed")]
    Request(#[from] reqwest::Error),
}

/// Failure persisting the refresh token.
///
/// Logged and non-fatal: the in-memory credential still advances for the
/// current process lifetime.
#[derive(Debug, Error)]
#[error("failed to persist refresh token to {}", .path.display())]
pub struct PersistenceError {
    /// Path of the token file that could not be written
    pub path: PathBuf,
    /// Underlying filesystem error
    #[source]
    pub source: std::io::Error,
}

/// Failures of one sync-pipeline run.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Measurement retrieval failed; snapshot and detector state untouched
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Transformation produced no valid points; the previous snapshot is
    /// left published rather than replaced with an empty one
    #[error("transformed history is empty; keeping previous snapshot")]
    EmptyHistory,
}

// ABOUTME: Main library entry point for the Withings body-composition bridge
// ABOUTME: Wires token rotation, scheduled measurement sync, and the HTTP read cache
//
// SPDX-License-Identifier: MIT OR Apache-2.0

#![deny(unsafe_code)]

//! # Withings Bridge
//!
//! A small sync service that sits between the Withings health-metrics API and
//! local read clients. It rotates a single OAuth2 refresh/access-token pair,
//! periodically pulls body-composition measurements, normalizes them into a
//! weight history, and serves the latest snapshot over HTTP.
//!
//! ## Architecture
//!
//! - **`token_store` / `token_manager`**: durable refresh-token persistence
//!   and in-memory access-token rotation
//! - **`providers`**: the Withings measurement API client
//! - **`sync`**: transformation pipeline, change detection, and the published
//!   snapshot readers consume
//! - **`scheduler`**: the two independent periodic drivers (hourly rotation,
//!   minutely sync)
//! - **`routes`**: axum read endpoints plus the one-time authorization flow

/// Environment-based configuration for the bridge process
pub mod config;

/// Application constants: endpoints, measurement codes, defaults
pub mod constants;

/// Domain error types for auth, fetch, persistence, and sync failures
pub mod errors;

/// Logging configuration and structured tracing setup
pub mod logging;

/// Normalized body-composition data model and published snapshot
pub mod models;

/// OAuth2 token exchange against the Withings token endpoint
pub mod oauth2_client;

/// Measurement providers (Withings API client and the provider seam)
pub mod providers;

/// HTTP routes: snapshot reads, health, and the authorization flow
pub mod routes;

/// Periodic drivers for token rotation and measurement sync
pub mod scheduler;

/// Sync pipeline: fetch, change detection, transform, publish
pub mod sync;

/// Access-token rotation and credential lifecycle
pub mod token_manager;

/// Durable single-value refresh-token persistence
pub mod token_store;

/// Shared utilities (HTTP client construction)
pub mod utils;

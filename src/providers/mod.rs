// ABOUTME: Measurement provider seam and the raw grouped-measurement model
// ABOUTME: WithingsClient is the production implementation behind the trait
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Measurement Providers
//!
//! The sync pipeline talks to the upstream through
//! [`BodyCompositionProvider`], keeping the HTTP specifics inside
//! [`withings::WithingsClient`] and letting tests substitute canned data.

pub mod withings;

pub use withings::WithingsClient;

use crate::errors::FetchError;
use async_trait::async_trait;
use serde::Deserialize;

/// One provider-reported reading event, possibly containing several
/// co-timed measures.
#[derive(Debug, Clone, Deserialize)]
pub struct MeasureGroup {
    /// Reading time, unix seconds
    pub date: i64,
    /// Provider flag; zero marks a normal reading, anything else an
    /// ambiguous or manually corrected one
    pub attrib: i32,
    /// The co-timed measures in this group
    pub measures: Vec<Measure>,
}

/// A single measure inside a group, stored as a scaled integer.
#[derive(Debug, Clone, Deserialize)]
pub struct Measure {
    /// Raw integer value before decimal scaling
    pub value: i64,
    /// Measurement type code (see [`crate::constants::measures`])
    #[serde(rename = "type")]
    pub kind: i32,
    /// Decimal exponent: physical value = `value × 10^unit`
    pub unit: i32,
}

impl Measure {
    /// The physical value after decimal scaling.
    #[must_use]
    pub fn resolved_value(&self) -> f64 {
        self.value as f64 * 10f64.powi(self.unit)
    }
}

/// Source of raw grouped body-composition measurements.
#[async_trait]
pub trait BodyCompositionProvider: Send + Sync {
    /// Fetch all measurement groups since the configured start date.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] on provider rejection, a malformed
    /// response, or transport failure. Callers must not touch any derived
    /// state on error.
    async fn fetch_measurements(&self, access_token: &str)
        -> Result<Vec<MeasureGroup>, FetchError>;
}

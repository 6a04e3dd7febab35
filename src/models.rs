// ABOUTME: Normalized body-composition data model served to read clients
// ABOUTME: One measurement point per accepted reading plus the published snapshot
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain models for the normalized measurement time series.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One normalized body-composition reading.
///
/// All masses are kilograms, fat percentage and hydration follow the scale's
/// reported units after decimal scaling, and `body_mass_index` is derived
/// from weight and the configured user height at transform time (it is never
/// fetched from the provider).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyMeasurement {
    /// When the scale recorded the reading
    #[serde(rename = "date")]
    pub timestamp: DateTime<Utc>,
    /// Weight in kilograms
    pub weight: f64,
    /// Body fat ratio, percent
    pub fat_percentage: f64,
    /// Muscle mass in kilograms
    pub muscle_mass: f64,
    /// Bone mass in kilograms
    pub bone_mass: f64,
    /// Body water in kilograms
    pub hydration: f64,
    /// Derived BMI (kg/m²)
    pub body_mass_index: f64,
}

/// The snapshot read clients consume.
///
/// `current` equals the last element of `history` whenever history is
/// non-empty. The snapshot is replaced wholesale on every successful sync
/// cycle and never mutated in place, so concurrent readers never observe a
/// partially updated collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BodySnapshot {
    /// Most recent accepted reading, if any sync has succeeded yet
    pub current: Option<BodyMeasurement>,
    /// All accepted readings, ascending by timestamp
    pub history: Vec<BodyMeasurement>,
}

impl BodySnapshot {
    /// Build a snapshot from a chronologically sorted history.
    ///
    /// The caller guarantees ascending order; the last element becomes
    /// `current`.
    #[must_use]
    pub fn from_history(history: Vec<BodyMeasurement>) -> Self {
        Self {
            current: history.last().cloned(),
            history,
        }
    }
}

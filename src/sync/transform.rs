// ABOUTME: Transformation of raw grouped measurements into the normalized history
// ABOUTME: Unit scaling, per-type field assignment, BMI derivation, validity filtering
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Measurement transformation.
//!
//! Pure and idempotent: the same raw groups always produce a structurally
//! identical, chronologically ascending history.

use crate::constants::measures;
use crate::models::BodyMeasurement;
use crate::providers::MeasureGroup;
use chrono::DateTime;

/// Convert raw groups into normalized history points.
///
/// Groups whose attribute marks an ambiguous or corrected reading are
/// excluded. The output is sorted ascending by timestamp; callers treat the
/// last element as the current reading.
#[must_use]
pub fn transform(groups: &[MeasureGroup], height_cm: f64) -> Vec<BodyMeasurement> {
    let mut points: Vec<BodyMeasurement> = groups
        .iter()
        .filter(|group| group.attrib == measures::NORMAL_ATTRIBUTE)
        .filter_map(|group| point_from_group(group, height_cm))
        .collect();

    points.sort_by_key(|point| point.timestamp);
    points
}

/// Fold one group's measures into a point.
///
/// A zero resolved weight or fat percentage means the measure was absent
/// from the group; a reading without both is incomplete and dropped.
fn point_from_group(group: &MeasureGroup, height_cm: f64) -> Option<BodyMeasurement> {
    let timestamp = DateTime::from_timestamp(group.date, 0)?;

    let mut weight = 0.0;
    let mut fat_percentage = 0.0;
    let mut muscle_mass = 0.0;
    let mut bone_mass = 0.0;
    let mut hydration = 0.0;

    for measure in &group.measures {
        let value = measure.resolved_value();
        match measure.kind {
            measures::WEIGHT => weight = value,
            measures::FAT_RATIO => fat_percentage = value,
            measures::MUSCLE_MASS => muscle_mass = value,
            measures::HYDRATION => hydration = value,
            measures::BONE_MASS => bone_mass = value,
            _ => {}
        }
    }

    if weight == 0.0 || fat_percentage == 0.0 {
        return None;
    }

    Some(BodyMeasurement {
        timestamp,
        weight,
        fat_percentage,
        muscle_mass,
        bone_mass,
        hydration,
        body_mass_index: body_mass_index(weight, height_cm),
    })
}

/// BMI in kg/m² from a weight in kilograms and a height in centimeters.
fn body_mass_index(weight_kg: f64, height_cm: f64) -> f64 {
    weight_kg / (height_cm * height_cm) * 10_000.0
}

// ABOUTME: Unit tests for upstream change detection
// ABOUTME: Baseline seeding, change reporting, and the level-triggered baseline
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use withings_bridge::sync::ChangeDetector;

#[test]
fn test_first_observation_never_reports() {
    for count in [0, 1, 42, 10_000] {
        let mut detector = ChangeDetector::new();
        assert!(
            !detector.observe(count),
            "first observation of {count} must only seed the baseline"
        );
    }
}

#[test]
fn test_different_count_reports_change() {
    let mut detector = ChangeDetector::new();
    assert!(!detector.observe(10));
    assert!(detector.observe(11));
}

#[test]
fn test_same_count_reports_no_change() {
    let mut detector = ChangeDetector::new();
    assert!(!detector.observe(10));
    assert!(!detector.observe(10));
}

#[test]
fn test_count_decrease_reports_change() {
    let mut detector = ChangeDetector::new();
    assert!(!detector.observe(10));
    assert!(detector.observe(9));
}

#[test]
fn test_baseline_holds_until_counts_realign() {
    // The baseline only advances on the no-change path, so a detected
    // change keeps re-reporting against the original baseline.
    let mut detector = ChangeDetector::new();
    assert!(!detector.observe(10));

    assert!(detector.observe(11));
    assert!(detector.observe(11), "same changed count re-reports");
    assert!(detector.observe(12), "further movement still reports");

    // Returning to the baseline stops the reporting.
    assert!(!detector.observe(10));
}

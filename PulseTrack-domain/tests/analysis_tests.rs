//! End-to-end scenarios for the analysis engine: realistic reading sets run
//! through the full aggregation path.

use std::collections::BTreeSet;

use chrono::{Duration, Utc};
use pulse_track_domain::{
    aggregate_readings, Category, Reading, Severity, TrendDirection,
};
use uuid::Uuid;

/// Build a chronological series of readings, one per day
fn series(values: &[(u16, u16)]) -> Vec<Reading> {
    let start = Utc::now() - Duration::days(values.len() as i64);
    values
        .iter()
        .enumerate()
        .map(|(i, &(systolic, diastolic))| Reading {
            id: Uuid::new_v4(),
            systolic,
            diastolic,
            pulse: Some(72),
            timestamp: start + Duration::days(i as i64),
            notes: None,
            tags: BTreeSet::new(),
        })
        .collect()
}

#[test]
fn test_week_with_crisis_reading() {
    let readings = series(&[(120, 80), (125, 85), (150, 95), (180, 110), (125, 82)]);

    let stats = aggregate_readings(&readings);

    assert_eq!(stats.reading_count, 5);

    // The 180/110 reading is a hypertensive crisis and must be flagged with
    // the medical-standard reason at high severity
    let crisis = stats
        .anomalies
        .iter()
        .find(|a| a.reading.systolic == 180 && a.reading.diastolic == 110)
        .expect("crisis reading should be flagged");
    assert_eq!(crisis.severity, Severity::High);
    assert!(crisis.reason.contains("medical-standard anomaly"));

    // Category counts follow the classification rules: 120/80, 125/85 and
    // 125/82 all sit in stage 1 on diastolic, 150/95 in stage 2, 180/110 in
    // crisis
    assert_eq!(
        stats.category_counts.get(&Category::HypertensionStage1),
        Some(&3)
    );
    assert_eq!(
        stats.category_counts.get(&Category::HypertensionStage2),
        Some(&1)
    );
    assert_eq!(
        stats.category_counts.get(&Category::HypertensiveCrisis),
        Some(&1)
    );
}

#[test]
fn test_steadily_rising_pressure() {
    // Mean blood pressure rises by exactly 5 mmHg per reading
    let readings = series(&[(110, 70), (115, 75), (120, 80), (125, 85), (130, 90)]);

    let stats = aggregate_readings(&readings);
    let trend = stats.trend.clone().expect("five readings should produce a trend");

    assert_eq!(trend.direction, TrendDirection::Increasing);
    assert!(trend.slope > 0.5);
    assert_eq!(stats.trend_summary(), "blood pressure is trending upward");
}

#[test]
fn test_aggregate_twice_yields_identical_results() {
    let readings = series(&[(120, 80), (125, 85), (150, 95), (180, 110), (125, 82)]);

    let first = aggregate_readings(&readings);
    let second = aggregate_readings(&readings);
    assert_eq!(first, second);
}

#[test]
fn test_divisor_asymmetry_between_detector_and_aggregate() {
    // Inherited contract: the anomaly detector scores against the sample
    // standard deviation (n − 1 divisor) while the aggregate reports the
    // population standard deviation (n divisor). For systolic [110, 120, 130]
    // the aggregate must report sqrt(200/3) ~ 8.165, not the sample value 10.
    let readings = series(&[(110, 70), (120, 70), (130, 70)]);

    let stats = aggregate_readings(&readings);
    assert!((stats.std_systolic - (200.0_f64 / 3.0).sqrt()).abs() < 1e-9);
    assert!(stats.std_systolic < 10.0);
}

#[test]
fn test_statistics_serialize_to_json() {
    let readings = series(&[(120, 80), (125, 85), (150, 95)]);

    let stats = aggregate_readings(&readings);
    let json = serde_json::to_string(&stats).expect("statistics should serialize");
    assert!(json.contains("\"reading_count\":3"));
    assert!(json.contains("avg_systolic"));
}

#[test]
fn test_stable_week_is_well_controlled() {
    let readings = series(&[(112, 72), (114, 74), (110, 70), (113, 73), (111, 71)]);

    let stats = aggregate_readings(&readings);
    assert_eq!(stats.health_status(), "well controlled");
    assert!(stats.anomalies.is_empty());

    let trend = stats.trend.expect("trend should be present");
    assert_eq!(trend.direction, TrendDirection::Stable);
}

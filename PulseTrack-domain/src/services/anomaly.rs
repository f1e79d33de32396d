use serde::{Deserialize, Serialize};

use crate::entities::blood_pressure::Reading;

/// Readings below this count produce no anomaly report; the sample statistics
/// are too unreliable to score against.
const MIN_READINGS: usize = 3;

/// How far a reading may sit from the sample mean before it is flagged,
/// expressed in standard deviations per metric
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnomalyConfig {
    /// Z-score threshold for the systolic series
    pub systolic_z_threshold: f64,

    /// Z-score threshold for the diastolic series
    pub diastolic_z_threshold: f64,
}

impl Default for AnomalyConfig {
    fn default() -> Self {
        Self {
            systolic_z_threshold: 1.5,
            diastolic_z_threshold: 1.5,
        }
    }
}

/// Severity of a flagged reading
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Severity {
    Low,
    Medium,
    High,
}

/// A single reading flagged as anomalous, with the evidence that flagged it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyPoint {
    /// The reading that was flagged
    pub reading: Reading,

    /// Severity of the anomaly
    pub severity: Severity,

    /// Z-score of the systolic value against the sample
    pub systolic_z: f64,

    /// Z-score of the diastolic value against the sample
    pub diastolic_z: f64,

    /// Human-readable reason the reading was flagged
    pub reason: String,
}

/// Detect anomalous readings using sample statistics and fixed medical
/// thresholds.
///
/// A reading is flagged when the medical rule fires (crisis or stage-2
/// severity range, or hypotension) or when either z-score exceeds its
/// configured threshold. Returned points preserve the input order.
pub fn detect_anomalies(readings: &[Reading], config: &AnomalyConfig) -> Vec<AnomalyPoint> {
    if readings.len() < MIN_READINGS {
        return Vec::new();
    }

    let systolic_values: Vec<f64> = readings.iter().map(|r| r.systolic as f64).collect();
    let diastolic_values: Vec<f64> = readings.iter().map(|r| r.diastolic as f64).collect();

    let (systolic_mean, systolic_std) = sample_mean_and_std(&systolic_values);
    let (diastolic_mean, diastolic_std) = sample_mean_and_std(&diastolic_values);

    let mut anomalies = Vec::new();

    for reading in readings {
        let systolic_z = z_score(reading.systolic as f64, systolic_mean, systolic_std);
        let diastolic_z = z_score(reading.diastolic as f64, diastolic_mean, diastolic_std);

        let medical = is_medically_anomalous(reading.systolic, reading.diastolic);
        let systolic_outlier = systolic_z > config.systolic_z_threshold;
        let diastolic_outlier = diastolic_z > config.diastolic_z_threshold;

        if !(medical || systolic_outlier || diastolic_outlier) {
            continue;
        }

        let max_z = systolic_z.max(diastolic_z);
        let severity = if medical || max_z >= 3.0 {
            Severity::High
        } else if max_z >= 2.5 {
            Severity::Medium
        } else {
            Severity::Low
        };

        let reason = if medical {
            format!(
                "medical-standard anomaly: {}/{} mmHg",
                reading.systolic, reading.diastolic
            )
        } else if systolic_outlier && diastolic_outlier {
            format!(
                "systolic z-score {:.2} and diastolic z-score {:.2} exceed thresholds",
                systolic_z, diastolic_z
            )
        } else if systolic_outlier {
            format!("systolic z-score {:.2} exceeds threshold", systolic_z)
        } else {
            format!("diastolic z-score {:.2} exceeds threshold", diastolic_z)
        };

        anomalies.push(AnomalyPoint {
            reading: reading.clone(),
            severity,
            systolic_z,
            diastolic_z,
            reason,
        });
    }

    tracing::debug!(
        "flagged {} of {} readings as anomalous",
        anomalies.len(),
        readings.len()
    );

    anomalies
}

/// Fixed medical thresholds, independent of the statistical model: crisis
/// range, stage-2 severity range, or hypotensive range.
fn is_medically_anomalous(systolic: u16, diastolic: u16) -> bool {
    systolic >= 180
        || diastolic >= 110
        || systolic >= 160
        || diastolic >= 100
        || systolic < 90
        || diastolic < 60
}

/// Mean and sample standard deviation (n − 1 divisor) of a series
fn sample_mean_and_std(values: &[f64]) -> (f64, f64) {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values
        .iter()
        .map(|v| (v - mean).powi(2))
        .sum::<f64>()
        / (n - 1.0);
    (mean, variance.sqrt())
}

/// Absolute distance from the mean in standard deviations; defined as 0 for a
/// zero-variance series
fn z_score(value: f64, mean: f64, std: f64) -> f64 {
    if std > 0.0 {
        (value - mean).abs() / std
    } else {
        0.0
    }
}

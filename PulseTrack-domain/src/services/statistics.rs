use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::entities::blood_pressure::{Category, Reading};
use crate::services::anomaly::{detect_anomalies, AnomalyConfig, AnomalyPoint};
use crate::services::classification::categorize_blood_pressure;
use crate::services::trend::{analyze_trend, TrendConfig, TrendResult};

/// Composite analysis result for a set of blood pressure readings
///
/// Constructed once per [`aggregate_readings`] call and never mutated. Two
/// aggregations over the same input produce identical values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BloodPressureStatistics {
    /// Number of readings analyzed
    pub reading_count: usize,

    /// Average systolic reading
    pub avg_systolic: f64,

    /// Average diastolic reading
    pub avg_diastolic: f64,

    /// Average pulse rate over the readings that carry one (if any)
    pub avg_pulse: Option<f64>,

    /// Population standard deviation of the systolic series
    pub std_systolic: f64,

    /// Population standard deviation of the diastolic series
    pub std_diastolic: f64,

    /// Highest recorded systolic reading
    pub max_systolic: u16,

    /// Highest recorded diastolic reading
    pub max_diastolic: u16,

    /// Lowest recorded systolic reading
    pub min_systolic: u16,

    /// Lowest recorded diastolic reading
    pub min_diastolic: u16,

    /// Number of readings falling into each category
    pub category_counts: HashMap<Category, usize>,

    /// Number of readings flagged as anomalous
    pub anomaly_count: usize,

    /// The flagged readings, in input order
    pub anomalies: Vec<AnomalyPoint>,

    /// Fitted trend over the readings (None below 2 readings)
    pub trend: Option<TrendResult>,
}

/// Analyze a set of readings: descriptive statistics, per-category counts,
/// anomaly detection, and trend analysis, merged into one immutable result.
///
/// Readings are taken in the order supplied; the trend is fitted over that
/// order.
pub fn aggregate_readings(readings: &[Reading]) -> BloodPressureStatistics {
    if readings.is_empty() {
        return BloodPressureStatistics {
            reading_count: 0,
            avg_systolic: 0.0,
            avg_diastolic: 0.0,
            avg_pulse: None,
            std_systolic: 0.0,
            std_diastolic: 0.0,
            max_systolic: 0,
            max_diastolic: 0,
            min_systolic: 0,
            min_diastolic: 0,
            category_counts: HashMap::new(),
            anomaly_count: 0,
            anomalies: Vec::new(),
            trend: None,
        };
    }

    let mut systolic_sum: f64 = 0.0;
    let mut diastolic_sum: f64 = 0.0;
    let mut pulse_sum: f64 = 0.0;
    let mut pulse_count: usize = 0;

    let mut max_systolic: u16 = 0;
    let mut max_diastolic: u16 = 0;
    let mut min_systolic: u16 = u16::MAX;
    let mut min_diastolic: u16 = u16::MAX;

    let mut category_counts: HashMap<Category, usize> = HashMap::new();

    for reading in readings {
        systolic_sum += reading.systolic as f64;
        diastolic_sum += reading.diastolic as f64;

        if let Some(pulse) = reading.pulse {
            pulse_sum += pulse as f64;
            pulse_count += 1;
        }

        max_systolic = max_systolic.max(reading.systolic);
        max_diastolic = max_diastolic.max(reading.diastolic);
        min_systolic = min_systolic.min(reading.systolic);
        min_diastolic = min_diastolic.min(reading.diastolic);

        let category = categorize_blood_pressure(reading.systolic, reading.diastolic);
        *category_counts.entry(category).or_insert(0) += 1;
    }

    let n = readings.len() as f64;
    let avg_systolic = systolic_sum / n;
    let avg_diastolic = diastolic_sum / n;
    let avg_pulse = if pulse_count > 0 {
        Some(pulse_sum / pulse_count as f64)
    } else {
        None
    };

    let std_systolic = population_std(
        readings.iter().map(|r| r.systolic as f64),
        avg_systolic,
        n,
    );
    let std_diastolic = population_std(
        readings.iter().map(|r| r.diastolic as f64),
        avg_diastolic,
        n,
    );

    let anomalies = detect_anomalies(readings, &AnomalyConfig::default());
    let trend = if readings.len() >= 2 {
        Some(analyze_trend(readings, &TrendConfig::default()))
    } else {
        None
    };

    tracing::debug!(
        "aggregated {} readings: {} anomalies, trend {:?}",
        readings.len(),
        anomalies.len(),
        trend.as_ref().map(|t| t.direction)
    );

    BloodPressureStatistics {
        reading_count: readings.len(),
        avg_systolic,
        avg_diastolic,
        avg_pulse,
        std_systolic,
        std_diastolic,
        max_systolic,
        max_diastolic,
        min_systolic,
        min_diastolic,
        anomaly_count: anomalies.len(),
        category_counts,
        anomalies,
        trend,
    }
}

/// Population standard deviation (n divisor). The anomaly detector uses the
/// sample formula instead; that asymmetry is an inherited behavioral contract,
/// see the divisor tests before changing either.
fn population_std(values: impl Iterator<Item = f64>, mean: f64, n: f64) -> f64 {
    let sum_sq: f64 = values.map(|v| (v - mean).powi(2)).sum();
    (sum_sq / n).sqrt()
}

impl BloodPressureStatistics {
    /// Share of readings per category, as percentages of the reading count
    pub fn category_distribution(&self) -> HashMap<Category, f64> {
        if self.reading_count == 0 {
            return HashMap::new();
        }

        self.category_counts
            .iter()
            .map(|(category, count)| {
                (*category, *count as f64 / self.reading_count as f64 * 100.0)
            })
            .collect()
    }

    /// Health-status label derived from the normal-category share and the
    /// anomaly share
    pub fn health_status(&self) -> &'static str {
        let normal_pct = self.percentage_of(self.normal_count());
        let anomaly_pct = self.percentage_of(self.anomaly_count);

        if normal_pct >= 80.0 {
            "well controlled"
        } else if normal_pct >= 60.0 {
            "mostly normal, monitor"
        } else if anomaly_pct >= 30.0 {
            "frequent anomalies, seek care"
        } else {
            "high variability, monitor closely"
        }
    }

    /// Trend description pass-through
    pub fn trend_summary(&self) -> String {
        match &self.trend {
            Some(trend) => trend.description.clone(),
            None => "no trend data".to_string(),
        }
    }

    fn normal_count(&self) -> usize {
        self.category_counts
            .get(&Category::Normal)
            .copied()
            .unwrap_or(0)
    }

    fn percentage_of(&self, count: usize) -> f64 {
        if self.reading_count == 0 {
            return 0.0;
        }
        count as f64 / self.reading_count as f64 * 100.0
    }
}

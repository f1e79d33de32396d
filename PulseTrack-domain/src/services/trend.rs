use serde::{Deserialize, Serialize};

use crate::entities::blood_pressure::Reading;

/// Sample sizes at or above this count no longer discount the confidence score
const CONFIDENCE_SATURATION: f64 = 10.0;

/// Tunable parameters for trend analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendConfig {
    /// Minimum absolute slope (mmHg per reading) before a trend counts as
    /// increasing or decreasing
    pub slope_threshold: f64,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self { slope_threshold: 0.5 }
    }
}

/// Direction of the fitted blood pressure trend
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    Stable,
}

/// Result of fitting a line to the mean blood pressure over reading order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendResult {
    /// Direction of the trend relative to the slope threshold
    pub direction: TrendDirection,

    /// Slope of the fitted line, in mmHg per reading
    pub slope: f64,

    /// Intercept of the fitted line
    pub intercept: f64,

    /// Coefficient of determination of the fit (0-1)
    pub r_squared: f64,

    /// Confidence in the trend (0-1), combining fit quality with a
    /// sample-size discount
    pub confidence: f64,

    /// Human-readable summary of the trend
    pub description: String,
}

/// Fit an ordinary least-squares line to the readings' mean blood pressure.
///
/// The independent variable is the reading's position in the supplied list,
/// not its timestamp; callers wanting a chronological trend must pass the
/// readings pre-sorted by time. The slope is therefore in mmHg per reading,
/// not mmHg per unit time.
pub fn analyze_trend(readings: &[Reading], config: &TrendConfig) -> TrendResult {
    if readings.len() < 2 {
        return TrendResult {
            direction: TrendDirection::Stable,
            slope: 0.0,
            intercept: 0.0,
            r_squared: 0.0,
            confidence: 0.0,
            description: "insufficient data for trend analysis".to_string(),
        };
    }

    let n = readings.len() as f64;
    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    let mut sum_xy = 0.0;
    let mut sum_xx = 0.0;

    for (index, reading) in readings.iter().enumerate() {
        let x = index as f64;
        let y = reading.mean_pressure();
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_xx += x * x;
    }

    let slope = (n * sum_xy - sum_x * sum_y) / (n * sum_xx - sum_x * sum_x);
    let intercept = (sum_y - slope * sum_x) / n;

    let mean_y = sum_y / n;
    let mut ss_total = 0.0;
    let mut ss_residual = 0.0;
    for (index, reading) in readings.iter().enumerate() {
        let y = reading.mean_pressure();
        let predicted = slope * index as f64 + intercept;
        ss_total += (y - mean_y).powi(2);
        ss_residual += (y - predicted).powi(2);
    }

    let r_squared = if ss_total > 0.0 {
        1.0 - ss_residual / ss_total
    } else {
        0.0
    };

    let direction = if slope > config.slope_threshold {
        TrendDirection::Increasing
    } else if slope < -config.slope_threshold {
        TrendDirection::Decreasing
    } else {
        TrendDirection::Stable
    };

    let confidence = (r_squared * (n / CONFIDENCE_SATURATION).min(1.0)).clamp(0.0, 1.0);

    let description = match direction {
        TrendDirection::Increasing => "blood pressure is trending upward",
        TrendDirection::Decreasing => "blood pressure is trending downward",
        TrendDirection::Stable => "blood pressure is stable",
    }
    .to_string();

    TrendResult {
        direction,
        slope,
        intercept,
        r_squared,
        confidence,
        description,
    }
}

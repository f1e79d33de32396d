// PulseTrack Domain
// This crate contains the blood pressure analysis engine for the PulseTrack application

// Services that implement the analysis logic
pub mod services;

// Domain entities
pub mod entities;

// Re-export common types for easier imports
pub use entities::blood_pressure::{Category, CreateReadingRequest, Reading, ReadingValidationError};
pub use services::anomaly::{detect_anomalies, AnomalyConfig, AnomalyPoint, Severity};
pub use services::classification::categorize_blood_pressure;
pub use services::statistics::{aggregate_readings, BloodPressureStatistics};
pub use services::trend::{analyze_trend, TrendConfig, TrendDirection, TrendResult};

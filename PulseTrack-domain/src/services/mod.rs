// Domain services
// This module contains the analysis logic implementations.

pub mod anomaly;
pub mod classification;
pub mod statistics;
pub mod trend;

// Re-export the main entry points
pub use classification::categorize_blood_pressure;
pub use statistics::aggregate_readings;

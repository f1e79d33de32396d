// Domain entities and value objects
pub mod blood_pressure;

// Re-export common types for easier imports
pub use blood_pressure::{Category, CreateReadingRequest, Reading, ReadingValidationError};

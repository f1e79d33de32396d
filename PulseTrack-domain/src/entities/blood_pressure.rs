use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;
use validator::Validate;

/// Domain model for a blood pressure reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Unique identifier for the reading
    pub id: Uuid,

    /// Systolic blood pressure in mmHg (the higher number)
    pub systolic: u16,

    /// Diastolic blood pressure in mmHg (the lower number)
    pub diastolic: u16,

    /// Optional pulse rate in beats per minute
    pub pulse: Option<u16>,

    /// When the reading was taken
    pub timestamp: DateTime<Utc>,

    /// Optional notes about the reading
    pub notes: Option<String>,

    /// Free-form tags attached to the reading (e.g., "morning", "after exercise")
    pub tags: BTreeSet<String>,
}

impl Reading {
    /// Mean arterial proxy used by the trend analyzer: the midpoint of the
    /// systolic and diastolic values.
    pub fn mean_pressure(&self) -> f64 {
        (self.systolic as f64 + self.diastolic as f64) / 2.0
    }
}

/// Request payload for creating a new blood pressure reading
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateReadingRequest {
    /// Systolic blood pressure (the higher number)
    #[validate(range(min = 40, max = 300, message = "Systolic must be between 40 and 300"))]
    pub systolic: u16,

    /// Diastolic blood pressure (the lower number)
    #[validate(range(min = 20, max = 200, message = "Diastolic must be between 20 and 200"))]
    pub diastolic: u16,

    /// Optional pulse rate in beats per minute
    #[validate(range(min = 20, max = 250, message = "Pulse must be between 20 and 250"))]
    pub pulse: Option<u16>,

    /// When the reading was taken
    pub timestamp: DateTime<Utc>,

    /// Optional notes about the reading
    #[validate(length(max = 1000, message = "Notes cannot exceed 1000 characters"))]
    pub notes: Option<String>,

    /// Free-form tags attached to the reading
    #[serde(default)]
    pub tags: BTreeSet<String>,
}

/// Errors raised while constructing a reading from a create request
#[derive(Debug, Error)]
pub enum ReadingValidationError {
    /// One or more fields failed range/length validation
    #[error("Validation error: {0}")]
    InvalidField(String),

    /// Systolic pressure must be strictly greater than diastolic pressure
    #[error("Systolic pressure must be greater than diastolic pressure")]
    SystolicNotAboveDiastolic,
}

impl CreateReadingRequest {
    /// Validate the request and build an immutable [`Reading`] with a fresh id.
    ///
    /// The analysis engine itself never validates; every reading it receives
    /// is assumed to have passed through this constructor (or an equivalent
    /// upstream check).
    pub fn into_reading(self) -> Result<Reading, ReadingValidationError> {
        if let Err(validation_errors) = self.validate() {
            // Flatten validator's per-field errors into one message
            let error_message = validation_errors
                .field_errors()
                .iter()
                .map(|(field, errors)| {
                    let error_msgs: Vec<String> = errors
                        .iter()
                        .map(|err| {
                            if let Some(msg) = &err.message {
                                msg.to_string()
                            } else {
                                format!("Invalid {}", field)
                            }
                        })
                        .collect();
                    format!("{}: {}", field, error_msgs.join(", "))
                })
                .collect::<Vec<String>>()
                .join("; ");

            return Err(ReadingValidationError::InvalidField(error_message));
        }

        if self.systolic <= self.diastolic {
            return Err(ReadingValidationError::SystolicNotAboveDiastolic);
        }

        Ok(Reading {
            id: Uuid::new_v4(),
            systolic: self.systolic,
            diastolic: self.diastolic,
            pulse: self.pulse,
            timestamp: self.timestamp,
            notes: self.notes,
            tags: self.tags,
        })
    }
}

/// Blood pressure category based on measurements
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Category {
    /// Normal blood pressure (systolic < 120 and diastolic < 80)
    Normal,

    /// Elevated blood pressure (systolic 120-129 and diastolic < 80)
    Elevated,

    /// Stage 1 Hypertension (systolic 130-139 or diastolic 80-89)
    HypertensionStage1,

    /// Stage 2 Hypertension (systolic ≥ 140 or diastolic ≥ 90)
    HypertensionStage2,

    /// Hypertensive crisis (systolic ≥ 180 or diastolic ≥ 110)
    HypertensiveCrisis,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Category::Normal => "Normal",
            Category::Elevated => "Elevated",
            Category::HypertensionStage1 => "Hypertension Stage 1",
            Category::HypertensionStage2 => "Hypertension Stage 2",
            Category::HypertensiveCrisis => "Hypertensive Crisis",
        };
        write!(f, "{}", label)
    }
}

//! Patient dosing profile
//!
//! The clinician-configured parameters the evaluator needs besides the
//! glucose reading itself.  Values can be persisted through a
//! [`ConfigPort`](crate::app::ports::ConfigPort) and replaced at runtime.

use serde::{Deserialize, Serialize};

use crate::dosing::{self, DoseDecision};
use crate::error::{ConfigError, DosingError};

/// Accepted clinician setpoint range (mg/dL).
pub const TARGET_RANGE_MG_DL: core::ops::RangeInclusive<f64> = 70.0..=250.0;
/// Accepted sensitivity factor range (mg/dL per unit).
pub const SENSITIVITY_RANGE: core::ops::RangeInclusive<f64> = 1.0..=200.0;

/// Per-patient dosing parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DosingProfile {
    /// Glucose setpoint in mg/dL
    pub target_glucose_mg_dl: f64,
    /// Glucose drop per unit of insulin (mg/dL/U)
    pub sensitivity_factor: f64,
}

impl Default for DosingProfile {
    fn default() -> Self {
        Self {
            target_glucose_mg_dl: 100.0,
            sensitivity_factor: 35.0,
        }
    }
}

impl DosingProfile {
    pub fn new(target_glucose_mg_dl: f64, sensitivity_factor: f64) -> Self {
        Self {
            target_glucose_mg_dl,
            sensitivity_factor,
        }
    }

    /// Range-check every field.  Invalid values are rejected, never clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // `contains` is false for NaN, so non-finite values are rejected too.
        if !TARGET_RANGE_MG_DL.contains(&self.target_glucose_mg_dl) {
            return Err(ConfigError::ValidationFailed(
                "target_glucose_mg_dl must be 70.0–250.0",
            ));
        }
        if !SENSITIVITY_RANGE.contains(&self.sensitivity_factor) {
            return Err(ConfigError::ValidationFailed(
                "sensitivity_factor must be 1.0–200.0",
            ));
        }
        Ok(())
    }

    /// Evaluate a glucose reading against this profile.
    pub fn evaluate(&self, current_glucose: f64) -> Result<DoseDecision, DosingError> {
        dosing::evaluate(
            current_glucose,
            self.target_glucose_mg_dl,
            self.sensitivity_factor,
        )
    }
}

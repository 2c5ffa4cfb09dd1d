//! Dosing safety evaluator.
//!
//! Maps one glucose reading, the clinician's target and the patient's
//! sensitivity factor to a [`DoseDecision`].  The evaluation is a pure
//! function: no I/O, no state carried between calls, no retries.
//!
//! ## Decision order
//!
//! 1. **Glucose validation.**  Negative or non-finite readings are sensor or
//!    configuration faults, not clinical states ->
//!    [`DosingError::InvalidGlucoseReading`].
//! 2. **Hypoglycemia interlock.**  `current <= target` always yields
//!    `SAFE / 0.0 / DENIED`.  Nothing after this point can run for an
//!    at-or-below-target reading, including sensitivity validation.
//! 3. **Sensitivity validation.**  `sensitivity <= 0` or non-finite ->
//!    [`DosingError::InvalidSensitivity`].
//! 4. **Correction.**  `round((current - target) / sensitivity, 2)`.  A
//!    correction that rounds to `0.00` has no deliverable dose and resolves
//!    to `SAFE / DENIED` like the interlock.  A correction that overflows
//!    `f64` (an astronomically large excess or a subnormal factor) ->
//!    [`DosingError::DoseNotRepresentable`].
//!
//! ```
//! use nfcbolus::dosing::{evaluate, ClinicalState, EffectorAuthorization};
//!
//! let d = evaluate(210.0, 100.0, 35.0).unwrap();
//! assert_eq!(d.clinical_state(), ClinicalState::HyperglycemicAlert);
//! assert_eq!(d.dose_units(), 3.14);
//! assert_eq!(d.effector_authorization(), EffectorAuthorization::Authorized);
//! ```

pub mod units;

use core::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{DosingError, GlucoseField};
use units::round_dose;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// One evaluation request.  Built by the caller per reading and discarded
/// afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DoseRequest {
    /// Measured glucose concentration (mg/dL).
    pub current_glucose: f64,
    /// Clinician-configured setpoint (mg/dL).
    pub target_glucose: f64,
    /// Glucose drop per unit of insulin (mg/dL/U).
    pub sensitivity_factor: f64,
}

impl DoseRequest {
    pub fn new(current_glucose: f64, target_glucose: f64, sensitivity_factor: f64) -> Self {
        Self {
            current_glucose,
            target_glucose,
            sensitivity_factor,
        }
    }

    /// Evaluate this request.  See [`evaluate`].
    pub fn evaluate(&self) -> Result<DoseDecision, DosingError> {
        evaluate(
            self.current_glucose,
            self.target_glucose,
            self.sensitivity_factor,
        )
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Clinical classification of a reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClinicalState {
    /// At or below target; nothing to correct.
    Safe,
    /// Above target; a correction dose is required.
    HyperglycemicAlert,
}

impl fmt::Display for ClinicalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Safe => write!(f, "SAFE: levels in range or low"),
            Self::HyperglycemicAlert => write!(f, "ALERT: hyperglycemia detected"),
        }
    }
}

/// The single bit that gates the NFC activation pulse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EffectorAuthorization {
    Denied,
    Authorized,
}

impl fmt::Display for EffectorAuthorization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Denied => write!(f, "DENIED (hypoglycemia risk)"),
            Self::Authorized => write!(f, "AUTHORIZED (emitting NFC pulse)"),
        }
    }
}

/// Result of one evaluation.
///
/// Fields are private and there is no `Deserialize` impl: the only way to
/// obtain a decision is through [`evaluate`], which guarantees
/// `Authorized <=> HyperglycemicAlert <=> dose_units > 0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DoseDecision {
    clinical_state: ClinicalState,
    dose_units: f64,
    effector_authorization: EffectorAuthorization,
}

impl DoseDecision {
    /// The interlock outcome: no dose, no pulse.
    pub const fn safe() -> Self {
        Self {
            clinical_state: ClinicalState::Safe,
            dose_units: 0.0,
            effector_authorization: EffectorAuthorization::Denied,
        }
    }

    /// Correction outcome.  Falls back to [`safe`](Self::safe) unless the
    /// rounded dose is strictly positive.
    fn correction(dose_units: f64) -> Self {
        if dose_units > 0.0 {
            Self {
                clinical_state: ClinicalState::HyperglycemicAlert,
                dose_units,
                effector_authorization: EffectorAuthorization::Authorized,
            }
        } else {
            Self::safe()
        }
    }

    pub fn clinical_state(&self) -> ClinicalState {
        self.clinical_state
    }

    /// Insulin units to release, rounded to two decimals.  `0.0` when denied.
    pub fn dose_units(&self) -> f64 {
        self.dose_units
    }

    pub fn effector_authorization(&self) -> EffectorAuthorization {
        self.effector_authorization
    }

    /// Whether the hardware pulse may be emitted.
    pub fn is_authorized(&self) -> bool {
        self.effector_authorization == EffectorAuthorization::Authorized
    }
}

impl fmt::Display for DoseDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | dose={:.2} U | effector={}",
            self.clinical_state, self.dose_units, self.effector_authorization
        )
    }
}

// ---------------------------------------------------------------------------
// Evaluator
// ---------------------------------------------------------------------------

/// Decide whether a correction pulse is safe and compute its dose.
///
/// Glucose values are mg/dL, `sensitivity_factor` is mg/dL per unit.
/// Errors never carry a decision, so they can never authorize a pulse.
pub fn evaluate(
    current_glucose: f64,
    target_glucose: f64,
    sensitivity_factor: f64,
) -> Result<DoseDecision, DosingError> {
    check_glucose(current_glucose, GlucoseField::Current)?;
    check_glucose(target_glucose, GlucoseField::Target)?;

    // Hypoglycemia interlock. Must stay ahead of every other check below.
    if current_glucose <= target_glucose {
        debug!(
            "interlock: glucose {current_glucose} <= target {target_glucose}, pulse denied"
        );
        return Ok(DoseDecision::safe());
    }

    if !sensitivity_factor.is_finite() || sensitivity_factor <= 0.0 {
        return Err(DosingError::InvalidSensitivity);
    }

    let excess = current_glucose - target_glucose;
    let dose_units = round_dose(excess / sensitivity_factor);
    if !dose_units.is_finite() {
        debug!("correction overflow: excess={excess} mg/dL sensitivity={sensitivity_factor}");
        return Err(DosingError::DoseNotRepresentable);
    }
    let decision = DoseDecision::correction(dose_units);
    debug!(
        "correction: excess={excess} mg/dL sensitivity={sensitivity_factor} -> {} U ({:?})",
        decision.dose_units, decision.effector_authorization
    );
    Ok(decision)
}

fn check_glucose(value: f64, field: GlucoseField) -> Result<(), DosingError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(DosingError::InvalidGlucoseReading(field))
    }
}

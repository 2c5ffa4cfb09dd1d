//! Outbound application events.
//!
//! The [`DosingService`](super::service::DosingService) emits these through
//! the [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them: log, update the patient display,
//! forward to a clinician dashboard.

use crate::dosing::DoseDecision;
use crate::error::{DosingError, EffectorError, SensorError};

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// A reading was evaluated (authorized or not).
    Evaluated {
        glucose_mg_dl: f64,
        decision: DoseDecision,
    },

    /// The evaluator refused the input; no pulse.
    EvaluationRejected {
        glucose_mg_dl: f64,
        error: DosingError,
    },

    /// The sensor could not produce a reading; nothing was evaluated.
    SensorFault(SensorError),

    /// An authorized pulse was delivered.
    PulseEmitted { dose_units: f64 },

    /// An authorized pulse could not be delivered.  Not retried.
    EffectorFault {
        dose_units: f64,
        error: EffectorError,
    },

    /// The active dosing profile was replaced.
    ProfileUpdated {
        target_glucose_mg_dl: f64,
        sensitivity_factor: f64,
    },
}

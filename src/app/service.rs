//! Application service: the hexagonal core.
//!
//! [`DosingService`] owns the active [`DosingProfile`] and runs one dosing
//! cycle per call.  All I/O flows through port traits passed in at the call
//! site, making the whole cycle testable with mock adapters.
//!
//! ```text
//!  GlucosePort ──▶ ┌────────────────────────┐ ──▶ EventSink
//!                  │     DosingService      │
//! EffectorPort ◀── │ validate · interlock · │
//!                  │       correction       │
//!                  └────────────────────────┘
//! ```
//!
//! The service keeps no history between cycles.  A failed cycle is
//! reported and returned; retrying is the caller's decision.

use log::{info, warn};

use crate::config::DosingProfile;
use crate::dosing::DoseDecision;
use crate::error::{ConfigError, Result};

use super::events::AppEvent;
use super::ports::{ConfigPort, EffectorPort, EventSink, GlucosePort};

/// Orchestrates sensor read → evaluation → pulse gating.
#[derive(Debug, Clone)]
pub struct DosingService {
    profile: DosingProfile,
}

impl DosingService {
    /// Construct the service from a profile.  The profile is validated
    /// first; an invalid one is rejected.
    pub fn new(profile: DosingProfile) -> core::result::Result<Self, ConfigError> {
        profile.validate()?;
        Ok(Self { profile })
    }

    /// Construct the service from whatever profile the store holds.
    pub fn from_config(store: &impl ConfigPort) -> core::result::Result<Self, ConfigError> {
        Self::new(store.load()?)
    }

    // ── Per-cycle orchestration ───────────────────────────────

    /// Run one full dosing cycle: read sensor → evaluate → report → pulse.
    ///
    /// The effector is called at most once, and only for an authorized
    /// decision.  Every error path returns before the effector is touched,
    /// except an effector failure itself, which is reported and not retried.
    pub fn run_cycle(
        &self,
        sensor: &mut impl GlucosePort,
        effector: &mut impl EffectorPort,
        sink: &mut impl EventSink,
    ) -> Result<DoseDecision> {
        // 1. Read sensor via GlucosePort
        let glucose = match sensor.read_glucose() {
            Ok(g) => g,
            Err(e) => {
                warn!("Sensor read failed: {e}");
                sink.emit(&AppEvent::SensorFault(e));
                return Err(e.into());
            }
        };

        // 2. Evaluate (pure)
        let decision = match self.profile.evaluate(glucose) {
            Ok(d) => d,
            Err(e) => {
                warn!("Evaluation rejected for glucose={glucose}: {e}");
                sink.emit(&AppEvent::EvaluationRejected {
                    glucose_mg_dl: glucose,
                    error: e,
                });
                return Err(e.into());
            }
        };
        sink.emit(&AppEvent::Evaluated {
            glucose_mg_dl: glucose,
            decision,
        });

        // 3. Gate the effector on the authorization bit alone
        if decision.is_authorized() {
            let dose_units = decision.dose_units();
            if let Err(e) = effector.emit_pulse(dose_units) {
                warn!("Pulse for {dose_units:.2} U not delivered: {e}");
                sink.emit(&AppEvent::EffectorFault {
                    dose_units,
                    error: e,
                });
                return Err(e.into());
            }
            info!("Pulse emitted: {dose_units:.2} U");
            sink.emit(&AppEvent::PulseEmitted { dose_units });
        }

        Ok(decision)
    }

    /// Evaluate a caller-supplied reading against the active profile without
    /// touching any port.
    pub fn evaluate_reading(&self, glucose_mg_dl: f64) -> Result<DoseDecision> {
        Ok(self.profile.evaluate(glucose_mg_dl)?)
    }

    // ── Profile management ────────────────────────────────────

    /// Replace the active profile after validation.  On rejection the
    /// previous profile stays active.
    pub fn update_profile(
        &mut self,
        profile: DosingProfile,
        sink: &mut impl EventSink,
    ) -> core::result::Result<(), ConfigError> {
        if let Err(e) = profile.validate() {
            warn!("Profile update rejected: {e}");
            return Err(e);
        }
        self.profile = profile;
        info!(
            "Profile updated: target={} mg/dL sensitivity={} mg/dL/U",
            profile.target_glucose_mg_dl, profile.sensitivity_factor
        );
        sink.emit(&AppEvent::ProfileUpdated {
            target_glucose_mg_dl: profile.target_glucose_mg_dl,
            sensitivity_factor: profile.sensitivity_factor,
        });
        Ok(())
    }

    /// Validate and persist the active profile.
    pub fn save_profile(&self, store: &mut impl ConfigPort) -> core::result::Result<(), ConfigError> {
        store.save(&self.profile)
    }

    /// The active profile.
    pub fn profile(&self) -> &DosingProfile {
        &self.profile
    }
}

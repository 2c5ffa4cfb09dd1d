//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to the
//! `log` facade.  Decisions are rendered as the same JSON record the display
//! collaborator receives, so the log line and the screen never disagree.

use log::{error, info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`].
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Evaluated {
                glucose_mg_dl,
                decision,
            } => match serde_json::to_string(decision) {
                Ok(json) => info!("DECISION | glucose={glucose_mg_dl:.1}mg/dL | {json}"),
                Err(e) => warn!("DECISION | glucose={glucose_mg_dl:.1}mg/dL | {decision} (json: {e})"),
            },
            AppEvent::EvaluationRejected {
                glucose_mg_dl,
                error: e,
            } => {
                warn!("REJECT | glucose={glucose_mg_dl} | {e} | effector=DENIED");
            }
            AppEvent::SensorFault(e) => {
                warn!("SENSOR | {e} | effector=DENIED");
            }
            AppEvent::PulseEmitted { dose_units } => {
                info!("PULSE | dose={dose_units:.2}U | delivered");
            }
            AppEvent::EffectorFault {
                dose_units,
                error: e,
            } => {
                error!("PULSE | dose={dose_units:.2}U | NOT delivered: {e}");
            }
            AppEvent::ProfileUpdated {
                target_glucose_mg_dl,
                sensitivity_factor,
            } => {
                info!(
                    "PROFILE | target={target_glucose_mg_dl:.1}mg/dL | sensitivity={sensitivity_factor:.1}mg/dL/U"
                );
            }
        }
    }
}

//! Mock adapters for integration tests.
//!
//! Records every effector call and every emitted event so tests can assert
//! on the full history without real NFC hardware.

use nfcbolus::app::events::AppEvent;
use nfcbolus::app::ports::{EffectorPort, EventSink, GlucosePort};
use nfcbolus::error::{EffectorError, SensorError};
use std::collections::VecDeque;

// ── MockSensor ────────────────────────────────────────────────

/// Replays a fixed queue of readings; an empty queue reads as a failure.
pub struct MockSensor {
    readings: VecDeque<Result<f64, SensorError>>,
}

impl MockSensor {
    pub fn new(readings: impl IntoIterator<Item = Result<f64, SensorError>>) -> Self {
        Self {
            readings: readings.into_iter().collect(),
        }
    }

    pub fn reading(glucose: f64) -> Self {
        Self::new([Ok(glucose)])
    }
}

impl GlucosePort for MockSensor {
    fn read_glucose(&mut self) -> Result<f64, SensorError> {
        self.readings
            .pop_front()
            .unwrap_or(Err(SensorError::ReadFailed))
    }
}

// ── MockEffector ──────────────────────────────────────────────

pub struct MockEffector {
    pub pulses: Vec<f64>,
    /// When set, every pulse attempt is recorded and then fails.
    pub fail_with: Option<EffectorError>,
    pub attempts: usize,
}

#[allow(dead_code)]
impl MockEffector {
    pub fn new() -> Self {
        Self {
            pulses: Vec::new(),
            fail_with: None,
            attempts: 0,
        }
    }

    pub fn failing(error: EffectorError) -> Self {
        Self {
            fail_with: Some(error),
            ..Self::new()
        }
    }
}

impl Default for MockEffector {
    fn default() -> Self {
        Self::new()
    }
}

impl EffectorPort for MockEffector {
    fn emit_pulse(&mut self, dose_units: f64) -> Result<(), EffectorError> {
        self.attempts += 1;
        match self.fail_with {
            Some(e) => Err(e),
            None => {
                self.pulses.push(dose_units);
                Ok(())
            }
        }
    }
}

// ── RecordingSink ─────────────────────────────────────────────

pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

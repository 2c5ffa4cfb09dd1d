//! Integration tests for the GlucosePort → DosingService → EffectorPort
//! cycle.
//!
//! These run on the host and verify that the pulse is gated on the
//! authorization bit alone, and that every failure path fails closed.

use crate::mock_hw::{MockEffector, MockSensor, RecordingSink};

use nfcbolus::app::events::AppEvent;
use nfcbolus::app::service::DosingService;
use nfcbolus::config::DosingProfile;
use nfcbolus::error::{DosingError, EffectorError, Error, GlucoseField, SensorError};
use nfcbolus::{ClinicalState, EffectorAuthorization};

fn make_app() -> (DosingService, MockEffector, RecordingSink) {
    let app = DosingService::new(DosingProfile::default()).unwrap();
    (app, MockEffector::new(), RecordingSink::new())
}

// ── Authorized path ───────────────────────────────────────────

#[test]
fn hyperglycemic_reading_emits_exactly_one_pulse() {
    let (app, mut fx, mut sink) = make_app();
    let mut sensor = MockSensor::reading(210.0);

    let d = app.run_cycle(&mut sensor, &mut fx, &mut sink).unwrap();

    assert_eq!(d.clinical_state(), ClinicalState::HyperglycemicAlert);
    assert_eq!(fx.pulses, vec![3.14]);
    assert_eq!(
        sink.events,
        vec![
            AppEvent::Evaluated {
                glucose_mg_dl: 210.0,
                decision: d,
            },
            AppEvent::PulseEmitted { dose_units: 3.14 },
        ]
    );
}

// ── Interlock path ────────────────────────────────────────────

#[test]
fn in_range_reading_never_touches_effector() {
    let (app, mut fx, mut sink) = make_app();

    for glucose in [95.0, 100.0, 40.0] {
        let mut sensor = MockSensor::reading(glucose);
        let d = app.run_cycle(&mut sensor, &mut fx, &mut sink).unwrap();
        assert_eq!(d.effector_authorization(), EffectorAuthorization::Denied);
        assert_eq!(d.dose_units(), 0.0);
    }

    assert_eq!(fx.attempts, 0, "effector must not be called when denied");
    assert!(
        sink.events
            .iter()
            .all(|e| matches!(e, AppEvent::Evaluated { .. })),
        "denied cycles only report the decision"
    );
}

// ── Failure paths ─────────────────────────────────────────────

#[test]
fn sensor_failure_fails_closed() {
    let (app, mut fx, mut sink) = make_app();
    let mut sensor = MockSensor::new([Err(SensorError::WarmingUp)]);

    let err = app.run_cycle(&mut sensor, &mut fx, &mut sink).unwrap_err();

    assert_eq!(err, Error::Sensor(SensorError::WarmingUp));
    assert_eq!(fx.attempts, 0);
    assert_eq!(sink.events, vec![AppEvent::SensorFault(SensorError::WarmingUp)]);
}

#[test]
fn invalid_reading_fails_closed() {
    let (app, mut fx, mut sink) = make_app();

    for bad in [f64::NAN, f64::INFINITY, -12.0] {
        let mut sensor = MockSensor::reading(bad);
        let err = app.run_cycle(&mut sensor, &mut fx, &mut sink).unwrap_err();
        assert_eq!(
            err,
            Error::Dosing(DosingError::InvalidGlucoseReading(GlucoseField::Current))
        );
    }

    assert_eq!(fx.attempts, 0);
    assert_eq!(sink.events.len(), 3);
    assert!(
        sink.events
            .iter()
            .all(|e| matches!(e, AppEvent::EvaluationRejected { .. }))
    );
}

#[test]
fn effector_failure_is_reported_and_not_retried() {
    let app = DosingService::new(DosingProfile::default()).unwrap();
    let mut fx = MockEffector::failing(EffectorError::NotInRange);
    let mut sink = RecordingSink::new();
    let mut sensor = MockSensor::reading(210.0);

    let err = app.run_cycle(&mut sensor, &mut fx, &mut sink).unwrap_err();

    assert_eq!(err, Error::Effector(EffectorError::NotInRange));
    assert_eq!(fx.attempts, 1, "a failed pulse must not be retried");
    assert!(fx.pulses.is_empty());
    assert!(matches!(
        sink.events.last(),
        Some(AppEvent::EffectorFault {
            error: EffectorError::NotInRange,
            ..
        })
    ));
}

// ── Statelessness ─────────────────────────────────────────────

#[test]
fn cycles_are_independent() {
    let (app, mut fx, mut sink) = make_app();
    let mut sensor = MockSensor::new([Ok(210.0), Ok(95.0), Ok(210.0)]);

    let first = app.run_cycle(&mut sensor, &mut fx, &mut sink).unwrap();
    let second = app.run_cycle(&mut sensor, &mut fx, &mut sink).unwrap();
    let third = app.run_cycle(&mut sensor, &mut fx, &mut sink).unwrap();

    assert!(first.is_authorized());
    assert!(!second.is_authorized());
    assert_eq!(first, third, "same input must give the same decision");
    assert_eq!(fx.pulses, vec![3.14, 3.14]);
}

// ── Profile updates ───────────────────────────────────────────

#[test]
fn updated_profile_applies_to_next_cycle() {
    let (mut app, mut fx, mut sink) = make_app();

    app.update_profile(DosingProfile::new(120.0, 45.0), &mut sink)
        .unwrap();
    let mut sensor = MockSensor::reading(210.0);
    let d = app.run_cycle(&mut sensor, &mut fx, &mut sink).unwrap();

    // (210 - 120) / 45 = 2.0
    assert_eq!(d.dose_units(), 2.0);
    assert_eq!(
        sink.events.first(),
        Some(&AppEvent::ProfileUpdated {
            target_glucose_mg_dl: 120.0,
            sensitivity_factor: 45.0,
        })
    );
}

#[test]
fn invalid_profile_update_emits_nothing() {
    let (mut app, _fx, mut sink) = make_app();

    assert!(
        app.update_profile(DosingProfile::new(100.0, 0.0), &mut sink)
            .is_err()
    );
    assert!(sink.events.is_empty());
    assert_eq!(*app.profile(), DosingProfile::default());
}

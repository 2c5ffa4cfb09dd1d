//! Fuzz target: `dosing::evaluate`
//!
//! Drives arbitrary bit patterns (NaN, infinities, subnormals, negative
//! zero) into the evaluator and asserts that it never panics and that any
//! decision it returns keeps the three output fields consistent.
//!
//! cargo fuzz run fuzz_evaluate

#![no_main]

use libfuzzer_sys::fuzz_target;
use nfcbolus::{ClinicalState, EffectorAuthorization, evaluate};

fn f64_at(data: &[u8], idx: usize) -> f64 {
    let mut buf = [0u8; 8];
    if let Some(chunk) = data.get(idx * 8..idx * 8 + 8) {
        buf.copy_from_slice(chunk);
    }
    f64::from_le_bytes(buf)
}

fuzz_target!(|data: &[u8]| {
    let current = f64_at(data, 0);
    let target = f64_at(data, 1);
    let sensitivity = f64_at(data, 2);

    if let Ok(d) = evaluate(current, target, sensitivity) {
        let authorized = d.effector_authorization() == EffectorAuthorization::Authorized;
        let alert = d.clinical_state() == ClinicalState::HyperglycemicAlert;
        assert_eq!(authorized, alert, "state/authorization mismatch: {d:?}");
        assert_eq!(authorized, d.dose_units() > 0.0, "dose/authorization mismatch: {d:?}");
        assert!(d.dose_units().is_finite(), "non-finite dose: {d:?}");

        // Interlock: never authorized at or below target.
        if current <= target {
            assert!(!authorized, "authorized at or below target: {d:?}");
        }
    }
});

//! Application core: the dosing cycle wired through port traits.
//!
//! The service reads a glucose value, runs the evaluator, reports the
//! decision and gates the NFC pulse.  All interaction with hardware happens
//! through **port traits** defined in [`ports`], keeping this layer fully
//! testable without real peripherals.

pub mod events;
pub mod ports;
pub mod service;

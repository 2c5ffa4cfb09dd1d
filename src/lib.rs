//! NFC bolus decision core.
//!
//! Decides whether a glucose reading justifies an NFC activation pulse for
//! in-situ insulin release and computes the dose.  The evaluator in
//! [`dosing`] is pure; everything that touches the outside world goes
//! through the port traits in [`app::ports`].

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod dosing;
pub mod error;

pub use dosing::{
    ClinicalState, DoseDecision, DoseRequest, EffectorAuthorization, evaluate,
};
pub use error::{DosingError, Error, Result};

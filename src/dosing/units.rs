//! Dose quantisation.
//!
//! Doses are reported in insulin units with two decimal places, rounded
//! **half away from zero** (`0.125 -> 0.13`).  Binary floating point cannot
//! represent most two-decimal values exactly (`1.005 * 100.0` is
//! `100.49999999999999`), so the scaled value is pushed away from zero by
//! [`NUDGE_ULPS`] units in the last place before the half-way decision.
//! The nudge tracks the magnitude of the value, so it only ever covers
//! representation error: a raw dose that is genuinely below a half-way
//! point (`0.004_999_999_995`) still rounds down.

/// Decimal places kept in a reported dose.
pub const DOSE_DECIMALS: i32 = 2;

/// Relative widening applied to the scaled value, in multiples of
/// `f64::EPSILON`.  Covers the error of one division plus one scaling.
const NUDGE_ULPS: f64 = 4.0;

/// Round a raw dose to [`DOSE_DECIMALS`] places, half away from zero.
pub fn round_dose(raw_units: f64) -> f64 {
    let factor = 10f64.powi(DOSE_DECIMALS);
    let scaled = raw_units * factor;
    let nudged = scaled * (1.0 + NUDGE_ULPS * f64::EPSILON);
    let nudged = if nudged.is_finite() { nudged } else { scaled };
    nudged.round() / factor
}

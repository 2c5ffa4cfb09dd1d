//! Unified error types for the dosing core.
//!
//! A single [`Error`] enum that every subsystem converts into, so the
//! service layer handles failures uniformly.  All variants are `Copy` and
//! carry no heap data; every one of them means "no pulse".

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible operation in the crate funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The evaluator refused the input.
    Dosing(DosingError),
    /// The glucose sensor could not produce a reading.
    Sensor(SensorError),
    /// The hardware transport failed to deliver an authorized pulse.
    Effector(EffectorError),
    /// Profile configuration is invalid or could not be loaded.
    Config(ConfigError),
    /// The key-value backend failed.
    Storage(StorageError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dosing(e) => write!(f, "dosing: {e}"),
            Self::Sensor(e) => write!(f, "sensor: {e}"),
            Self::Effector(e) => write!(f, "effector: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Storage(e) => write!(f, "storage: {e}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Dosing errors
// ---------------------------------------------------------------------------

/// Validation failures detected by the evaluator itself.
///
/// Every variant fails closed: the caller gets no [`DoseDecision`] at all,
/// so there is nothing that could be mistaken for an authorization.
///
/// [`DoseDecision`]: crate::dosing::DoseDecision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DosingError {
    /// Sensitivity factor is zero, negative or non-finite.
    InvalidSensitivity,
    /// Current or target glucose is negative or non-finite.
    InvalidGlucoseReading(GlucoseField),
    /// Inputs passed validation but the correction overflows `f64`.
    DoseNotRepresentable,
}

/// Which glucose input failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlucoseField {
    Current,
    Target,
}

impl fmt::Display for GlucoseField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Current => write!(f, "current glucose"),
            Self::Target => write!(f, "target glucose"),
        }
    }
}

impl fmt::Display for DosingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSensitivity => write!(f, "sensitivity factor must be finite and > 0"),
            Self::InvalidGlucoseReading(field) => {
                write!(f, "{field} must be finite and non-negative")
            }
            Self::DoseNotRepresentable => write!(f, "correction dose is not representable"),
        }
    }
}

impl std::error::Error for DosingError {}

impl From<DosingError> for Error {
    fn from(e: DosingError) -> Self {
        Self::Dosing(e)
    }
}

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// The NFC read of the passive sensor failed or timed out.
    ReadFailed,
    /// The sensor answered but has no valid reading yet.
    WarmingUp,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReadFailed => write!(f, "sensor read failed"),
            Self::WarmingUp => write!(f, "sensor warming up"),
        }
    }
}

impl From<SensorError> for Error {
    fn from(e: SensorError) -> Self {
        Self::Sensor(e)
    }
}

// ---------------------------------------------------------------------------
// Effector errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectorError {
    /// No NFC field / device out of range.
    NotInRange,
    /// The pulse was sent but the effector did not acknowledge it.
    NoAcknowledge,
}

impl fmt::Display for EffectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotInRange => write!(f, "effector not in range"),
            Self::NoAcknowledge => write!(f, "effector did not acknowledge pulse"),
        }
    }
}

impl From<EffectorError> for Error {
    fn from(e: EffectorError) -> Self {
        Self::Effector(e)
    }
}

// ---------------------------------------------------------------------------
// Config / storage errors
// ---------------------------------------------------------------------------

/// Errors from [`ConfigPort`](crate::app::ports::ConfigPort) operations and
/// profile validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Stored profile failed to decode or failed validation after decoding.
    Corrupted,
    /// A profile field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
    /// Underlying storage failed.
    Storage(StorageError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Corrupted => write!(f, "profile corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {msg}"),
            Self::Storage(e) => write!(f, "{e}"),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<StorageError> for ConfigError {
    fn from(e: StorageError) -> Self {
        Self::Storage(e)
    }
}

/// Errors from [`StoragePort`](crate::app::ports::StoragePort) operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageError {
    /// Requested key does not exist.
    NotFound,
    /// Storage is full.
    Full,
    /// Generic I/O error.
    IoError,
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "key not found"),
            Self::Full => write!(f, "storage full"),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}

impl From<StorageError> for Error {
    fn from(e: StorageError) -> Self {
        Self::Storage(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;

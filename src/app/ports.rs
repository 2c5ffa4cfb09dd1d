//! Port traits: the hexagonal boundary between the dosing core and the
//! outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ DosingService (domain)
//! ```
//!
//! The sensor reader, the NFC transport, the patient display and profile
//! storage are all external collaborators.  They implement these traits;
//! the [`DosingService`](super::service::DosingService) consumes them via
//! generics, so the domain core never touches hardware directly.
//!
//! ## Safety notes
//!
//! - **EffectorPort** is only ever called with an authorized decision.
//!   Implementations must not retry a failed pulse on their own.
//! - **ConfigPort** implementations MUST validate before persisting.

use crate::config::DosingProfile;
use crate::error::{ConfigError, EffectorError, SensorError, StorageError};

// ───────────────────────────────────────────────────────────────
// Glucose port (driven adapter: sensor → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this to obtain the current reading.
pub trait GlucosePort {
    /// Current glucose concentration in mg/dL.
    fn read_glucose(&mut self) -> Result<f64, SensorError>;
}

// ───────────────────────────────────────────────────────────────
// Effector port (driven adapter: domain → NFC transport)
// ───────────────────────────────────────────────────────────────

/// Write-side port: emits the NFC activation pulse.
pub trait EffectorPort {
    /// Trigger enzymatic release of `dose_units` of insulin.
    fn emit_pulse(&mut self, dose_units: f64) -> Result<(), EffectorError>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → display / logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go (log, patient
/// display, clinician dashboard).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Configuration port (driven adapter: domain ↔ persistent profile)
// ───────────────────────────────────────────────────────────────

/// Loads and persists the dosing profile.
///
/// # Validation
///
/// Implementations MUST validate before persisting and after loading.
/// Invalid ranges are rejected with [`ConfigError::ValidationFailed`], not
/// silently clamped.  A zero sensitivity factor slipping into storage
/// would make every future correction undefined.
pub trait ConfigPort {
    /// Load the profile.  Returns [`DosingProfile::default()`] if nothing
    /// has been stored yet.
    fn load(&self) -> Result<DosingProfile, ConfigError>;

    /// Validate and persist the profile.
    fn save(&mut self, profile: &DosingProfile) -> Result<(), ConfigError>;
}

// ───────────────────────────────────────────────────────────────
// Storage port (driven adapter: domain ↔ key-value store)
// ───────────────────────────────────────────────────────────────

/// Namespaced key-value storage backing the [`ConfigPort`] adapter.
pub trait StoragePort {
    /// Read a value.  Returns the number of bytes written to `buf`.
    fn read(&self, namespace: &str, key: &str, buf: &mut [u8]) -> Result<usize, StorageError>;

    /// Write a value atomically.
    fn write(&mut self, namespace: &str, key: &str, data: &[u8]) -> Result<(), StorageError>;

    /// Delete a key.  Returns `Ok(())` even if the key didn't exist.
    fn delete(&mut self, namespace: &str, key: &str) -> Result<(), StorageError>;

    /// Check whether a key exists without reading it.
    fn exists(&self, namespace: &str, key: &str) -> bool;
}

//! Profile persistence adapter.
//!
//! [`ProfileStore`] implements [`ConfigPort`] on top of any [`StoragePort`],
//! encoding the [`DosingProfile`] with postcard.  [`MemoryStorage`] is the
//! in-process backend used on hosts without a dedicated key-value store.
//!
//! - Validation: the profile is range-checked before every write and after
//!   every read.  A blob that decodes but fails validation is reported as
//!   [`ConfigError::Corrupted`], never used.  So is a blob with trailing
//!   bytes or one too large for the read buffer.
//! - Namespace isolation: each subsystem uses its own namespace prefix.

use std::collections::HashMap;

use log::{info, warn};

use crate::app::ports::{ConfigPort, StoragePort};
use crate::config::DosingProfile;
use crate::error::{ConfigError, StorageError};

const PROFILE_NAMESPACE: &str = "dosing";
const PROFILE_KEY: &str = "profile";

/// Upper bound on an encoded profile (two `f64` fields encode to 16 bytes).
const MAX_BLOB_SIZE: usize = 64;

/// [`ConfigPort`] backed by a [`StoragePort`].
pub struct ProfileStore<S: StoragePort> {
    storage: S,
}

impl<S: StoragePort> ProfileStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Remove the stored profile; the next load yields the default.
    pub fn reset(&mut self) -> Result<(), ConfigError> {
        self.storage.delete(PROFILE_NAMESPACE, PROFILE_KEY)?;
        info!("ProfileStore: stored profile erased");
        Ok(())
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }
}

impl<S: StoragePort> ConfigPort for ProfileStore<S> {
    fn load(&self) -> Result<DosingProfile, ConfigError> {
        let mut buf = [0u8; MAX_BLOB_SIZE];
        let len = match self.storage.read(PROFILE_NAMESPACE, PROFILE_KEY, &mut buf) {
            Ok(len) => len,
            Err(StorageError::NotFound) => {
                info!("ProfileStore: no stored profile, using defaults");
                return Ok(DosingProfile::default());
            }
            Err(e) => return Err(e.into()),
        };

        // A full buffer means the backend may have cut the blob short.
        if len >= MAX_BLOB_SIZE {
            warn!("ProfileStore: stored profile exceeds {MAX_BLOB_SIZE} bytes");
            return Err(ConfigError::Corrupted);
        }
        let (profile, rest): (DosingProfile, _) =
            postcard::take_from_bytes(&buf[..len]).map_err(|_| ConfigError::Corrupted)?;
        if !rest.is_empty() {
            warn!("ProfileStore: {} trailing bytes after stored profile", rest.len());
            return Err(ConfigError::Corrupted);
        }
        if let Err(e) = profile.validate() {
            warn!("ProfileStore: stored profile failed validation: {e}");
            return Err(ConfigError::Corrupted);
        }
        info!("ProfileStore: loaded profile from store");
        Ok(profile)
    }

    fn save(&mut self, profile: &DosingProfile) -> Result<(), ConfigError> {
        profile.validate()?;
        let bytes = postcard::to_allocvec(profile).map_err(|_| ConfigError::Corrupted)?;
        self.storage.write(PROFILE_NAMESPACE, PROFILE_KEY, &bytes)?;
        info!("ProfileStore: profile saved ({} bytes)", bytes.len());
        Ok(())
    }
}

// ───────────────────────────────────────────────────────────────
// In-memory backend
// ───────────────────────────────────────────────────────────────

/// `HashMap`-backed [`StoragePort`].
#[derive(Debug, Default)]
pub struct MemoryStorage {
    store: HashMap<String, Vec<u8>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn composite_key(namespace: &str, key: &str) -> String {
        format!("{namespace}::{key}")
    }
}

impl StoragePort for MemoryStorage {
    fn read(&self, namespace: &str, key: &str, buf: &mut [u8]) -> Result<usize, StorageError> {
        match self.store.get(&Self::composite_key(namespace, key)) {
            Some(data) => {
                let len = data.len().min(buf.len());
                buf[..len].copy_from_slice(&data[..len]);
                Ok(len)
            }
            None => Err(StorageError::NotFound),
        }
    }

    fn write(&mut self, namespace: &str, key: &str, data: &[u8]) -> Result<(), StorageError> {
        self.store
            .insert(Self::composite_key(namespace, key), data.to_vec());
        Ok(())
    }

    fn delete(&mut self, namespace: &str, key: &str) -> Result<(), StorageError> {
        self.store.remove(&Self::composite_key(namespace, key));
        Ok(())
    }

    fn exists(&self, namespace: &str, key: &str) -> bool {
        self.store.contains_key(&Self::composite_key(namespace, key))
    }
}

use std::fs;
use std::path::PathBuf;

use thiserror::Error;
use tracing::warn;

use super::model::{Preference, StoredPreference};

#[derive(Debug, Error)]
pub enum PreferenceStoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Persistence boundary for the single stored preference record.
///
/// `load` performs schema migration: legacy payloads (single `role` field)
/// come back already upgraded to the `roles`/`primary_role` shape.
pub trait PreferenceStore {
    fn load(&self) -> Result<Option<Preference>, PreferenceStoreError>;
    fn save(&mut self, preference: &Preference) -> Result<(), PreferenceStoreError>;
    fn clear(&mut self) -> Result<(), PreferenceStoreError>;
}

#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    stored: Option<String>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with a raw serialized payload, as a browser would have
    /// left it. Useful for exercising migration from older schemas.
    pub fn with_payload(payload: impl Into<String>) -> Self {
        MemoryPreferenceStore {
            stored: Some(payload.into()),
        }
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn load(&self) -> Result<Option<Preference>, PreferenceStoreError> {
        match &self.stored {
            Some(payload) => {
                let raw: StoredPreference = serde_json::from_str(payload)?;
                Ok(Some(raw.into_preference()))
            }
            None => Ok(None),
        }
    }

    fn save(&mut self, preference: &Preference) -> Result<(), PreferenceStoreError> {
        self.stored = Some(serde_json::to_string(preference)?);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), PreferenceStoreError> {
        self.stored = None;
        Ok(())
    }
}

/// File-backed store keeping one serialized preference record at a fixed path.
#[derive(Debug)]
pub struct JsonFilePreferenceStore {
    path: PathBuf,
}

impl JsonFilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFilePreferenceStore { path: path.into() }
    }
}

impl PreferenceStore for JsonFilePreferenceStore {
    fn load(&self) -> Result<Option<Preference>, PreferenceStoreError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let payload = fs::read_to_string(&self.path)?;
        let raw: StoredPreference = serde_json::from_str(&payload)?;
        Ok(Some(raw.into_preference()))
    }

    fn save(&mut self, preference: &Preference) -> Result<(), PreferenceStoreError> {
        let payload = serde_json::to_vec_pretty(preference)?;

        // Write-then-rename keeps the stored record all-or-nothing.
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, payload)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), PreferenceStoreError> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

/// Owns the in-memory preference record and keeps it in sync with a store.
///
/// Store failures are logged and swallowed: a failed read falls back to the
/// defaults, a failed write leaves the in-memory state authoritative.
#[derive(Debug)]
pub struct PreferenceManager<S: PreferenceStore> {
    store: S,
    current: Preference,
}

impl<S: PreferenceStore> PreferenceManager<S> {
    pub fn open(store: S) -> Self {
        let current = match store.load() {
            Ok(Some(preference)) => preference,
            Ok(None) => Preference::default(),
            Err(err) => {
                warn!(error = %err, "failed to load stored preference, using defaults");
                Preference::default()
            }
        };
        PreferenceManager { store, current }
    }

    pub fn current(&self) -> &Preference {
        &self.current
    }

    /// Apply a mutation to the profile; persists only when it reports a change.
    pub fn update(&mut self, mutation: impl FnOnce(&mut Preference) -> bool) -> bool {
        let changed = mutation(&mut self.current);
        if changed {
            if let Err(err) = self.store.save(&self.current) {
                warn!(error = %err, "failed to persist preference change");
            }
        }
        changed
    }

    /// Restore defaults and drop the persisted record.
    pub fn reset(&mut self) {
        self.current.reset();
        if let Err(err) = self.store.clear() {
            warn!(error = %err, "failed to clear persisted preference");
        }
    }
}

//! Persistent state store.
//!
//! The whole `AppState` is serialized as one JSON blob under a fixed key of a
//! small key/value store. Loading never fails from the caller's point of
//! view: a missing or unreadable blob yields the all-defaults state, and a
//! blob with missing fields has each field defaulted on its own. Saving
//! swallows write failures; the in-memory state stays authoritative.

use crate::types::AppState;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Namespace key the state blob lives under
pub const STORAGE_KEY: &str = "python_mastery_os_v1";

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize state: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Storage rejected write for key {0}")]
    Rejected(String),
}

/// String-valued key/value storage the state blob is written to
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// One file per key under a directory, each write atomic
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)?;
        atomic_write(&self.path_for(key), value)
    }
}

/// Writes to a temporary file in the target's directory, then renames it
/// over the target so readers never observe a partial blob.
fn atomic_write(target: &Path, content: &str) -> Result<(), StoreError> {
    let parent = target.parent().unwrap_or_else(|| Path::new("."));
    let mut temp_file = NamedTempFile::new_in(parent)?;
    temp_file.write_all(content.as_bytes())?;
    temp_file.flush()?;
    temp_file
        .persist(target)
        .map_err(|e| StoreError::Io(e.error))?;
    Ok(())
}

/// In-process storage; contents vanish with the process
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.entries.insert(key.to_string(), value.to_string());
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefaultReason {
    Missing,
    Unreadable(String),
    Corrupt(String),
}

/// Result of a load before the fallback is collapsed away
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Loaded(AppState),
    Defaulted(DefaultReason),
}

impl LoadOutcome {
    pub fn into_state(self) -> AppState {
        match self {
            LoadOutcome::Loaded(state) => state,
            LoadOutcome::Defaulted(_) => AppState::default(),
        }
    }

    pub fn is_defaulted(&self) -> bool {
        matches!(self, LoadOutcome::Defaulted(_))
    }
}

/// Load/save contract for the state blob on top of a `KeyValueStore`
#[derive(Debug)]
pub struct StateStore<S: KeyValueStore> {
    backend: S,
    key: String,
}

impl<S: KeyValueStore> StateStore<S> {
    pub fn new(backend: S) -> Self {
        Self::with_key(backend, STORAGE_KEY)
    }

    pub fn with_key(backend: S, key: &str) -> Self {
        Self {
            backend,
            key: key.to_string(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut S {
        &mut self.backend
    }

    pub fn load_outcome(&self) -> LoadOutcome {
        let raw = match self.backend.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return LoadOutcome::Defaulted(DefaultReason::Missing),
            Err(e) => return LoadOutcome::Defaulted(DefaultReason::Unreadable(e.to_string())),
        };

        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(fields)) => {
                let mut state = state_from_fields(&fields);
                if state.weekly_planner.week_number == 0 {
                    state.weekly_planner.week_number = 1;
                }
                LoadOutcome::Loaded(state)
            }
            Ok(_) => LoadOutcome::Defaulted(DefaultReason::Corrupt(
                "top-level value is not an object".to_string(),
            )),
            Err(e) => LoadOutcome::Defaulted(DefaultReason::Corrupt(e.to_string())),
        }
    }

    /// Stored state, or all-defaults when there is none usable
    pub fn load(&self) -> AppState {
        let outcome = self.load_outcome();
        match &outcome {
            LoadOutcome::Loaded(_) => log::debug!("Loaded state from key {}", self.key),
            LoadOutcome::Defaulted(DefaultReason::Missing) => {
                log::debug!("No saved state under key {}, using defaults", self.key)
            }
            LoadOutcome::Defaulted(reason) => {
                log::warn!("Discarding saved state under key {}: {:?}", self.key, reason)
            }
        }
        outcome.into_state()
    }

    pub fn try_save(&mut self, state: &AppState) -> Result<(), StoreError> {
        let blob = serde_json::to_string(state)?;
        self.backend.set(&self.key, &blob)
    }

    /// Writes the full snapshot; a failed write is logged and dropped
    pub fn save(&mut self, state: &AppState) {
        if let Err(e) = self.try_save(state) {
            log::warn!("Failed to save state under key {}: {}", self.key, e);
        }
    }
}

/// Each top-level field is read on its own; a null or mistyped field falls
/// back to its default without taking the rest of the blob with it.
fn state_from_fields(fields: &Map<String, Value>) -> AppState {
    AppState {
        checked: field(fields, "checked"),
        custom_notes: field(fields, "customNotes"),
        custom_links: field(fields, "customLinks"),
        weekly_planner: field(fields, "weeklyPlanner"),
        ui: field(fields, "ui"),
    }
}

fn field<T: DeserializeOwned + Default>(fields: &Map<String, Value>, name: &str) -> T {
    match fields.get(name) {
        None | Some(Value::Null) => T::default(),
        Some(value) => T::deserialize(value).unwrap_or_else(|e| {
            log::warn!("Defaulting unreadable state field {}: {}", name, e);
            T::default()
        }),
    }
}

//! Persistence of the progression record and the celebration marker
//!
//! `KeyValueStore` is the raw slot interface (get/set/remove by name).
//! `Storage` layers the two named slots the terminal uses on top of it.

use crate::core::error::{Result, TerminalError};
use crate::state::progression::ProgressionState;
use ahash::AHashMap;
use std::path::{Path, PathBuf};

/// Slot holding the serialized `ProgressionState`
pub const STATE_KEY: &str = "operator-terminal-state";
/// Slot holding the "celebration already shown" marker
pub const CELEBRATION_KEY: &str = "operator-terminal-celebration-shown";

/// Named-slot storage backend
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// In-memory backend, used by tests and as the degraded session store
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    slots: AHashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.slots.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.slots.remove(key);
        Ok(())
    }
}

/// One file per slot inside a directory
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

    fn slot_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.slot_path(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(std::fs::read_to_string(path)?))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.slot_path(key), value)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        match std::fs::remove_file(self.slot_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Progression and celebration slots over a backend
#[derive(Debug, Clone)]
pub struct Storage<K: KeyValueStore> {
    backend: K,
}

impl<K: KeyValueStore> Storage<K> {
    pub fn new(backend: K) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &K {
        &self.backend
    }

    /// Load the progression record
    ///
    /// A missing slot yields the empty record. A corrupt slot is logged and
    /// also yields the empty record; only backend read failures are errors.
    pub fn load_state(&self) -> Result<ProgressionState> {
        let Some(raw) = self.backend.get(STATE_KEY)? else {
            return Ok(ProgressionState::default());
        };
        match serde_json::from_str(&raw) {
            Ok(state) => Ok(state),
            Err(e) => {
                tracing::warn!("Discarding corrupt progression record: {}", e);
                Ok(ProgressionState::default())
            }
        }
    }

    pub fn save_state(&mut self, state: &ProgressionState) -> Result<()> {
        let json = serde_json::to_string(state)?;
        self.backend.set(STATE_KEY, &json)
    }

    pub fn clear_state(&mut self) -> Result<()> {
        self.backend.remove(STATE_KEY)
    }

    pub fn celebration_shown(&self) -> Result<bool> {
        Ok(self
            .backend
            .get(CELEBRATION_KEY)?
            .is_some_and(|v| v.trim() == "true"))
    }

    pub fn mark_celebration_shown(&mut self) -> Result<()> {
        self.backend.set(CELEBRATION_KEY, "true")
    }

    pub fn clear_celebration_flag(&mut self) -> Result<()> {
        self.backend.remove(CELEBRATION_KEY)
    }
}

/// Backend that fails every call, for exercising the degraded path
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableStore;

impl KeyValueStore for UnavailableStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Err(TerminalError::Persistence(format!("slot {} unavailable", key)))
    }

    fn set(&mut self, key: &str, _value: &str) -> Result<()> {
        Err(TerminalError::Persistence(format!("slot {} unavailable", key)))
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        Err(TerminalError::Persistence(format!("slot {} unavailable", key)))
    }
}

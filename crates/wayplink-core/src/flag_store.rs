//! Durable flag persistence.
//!
//! Backs the first-launch gate: a boolean per key, persisted per app
//! install. The write must be durable before the deferred lookup's network
//! call starts, so the trait is synchronous.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError, RwLock};

/// Durable key-value boolean persistence scoped to the app install.
pub trait FlagStore: Send + Sync {
    /// Read a flag; unset keys read as `false`.
    fn get(&self, key: &str) -> bool;
    /// Durably write a flag.
    fn set(&self, key: &str, value: bool);
    /// Remove a flag.
    fn clear(&self, key: &str);
}

/// Directory name for Wayplink data under the user's home directory.
const DATA_DIR: &str = ".wayplink";
/// Filename for the persisted flag map.
const FLAGS_FILE: &str = "flags.json";

/// File-backed flag store.
///
/// Persists a JSON object of `key: bool` entries. Writes go through a
/// temp-file + rename so a crash mid-write leaves the previous state intact.
/// A missing or unreadable file reads as all-false.
pub struct FileFlagStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl FileFlagStore {
    /// Store backed by an explicit file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), write_lock: Mutex::new(()) }
    }

    /// Store in the per-user data directory (`~/.wayplink/flags.json`),
    /// creating the directory if necessary.
    pub fn in_user_data_dir() -> Option<Self> {
        let home = dirs::home_dir()?;
        let data_dir = home.join(DATA_DIR);
        if !data_dir.exists() {
            if let Err(e) = fs::create_dir_all(&data_dir) {
                tracing::warn!("failed to create flag store directory: {}", e);
                return None;
            }
        }
        Some(Self::new(data_dir.join(FLAGS_FILE)))
    }

    fn load(&self) -> HashMap<String, bool> {
        let Ok(content) = fs::read_to_string(&self.path) else {
            return HashMap::new();
        };
        match serde_json::from_str(&content) {
            Ok(flags) => flags,
            Err(e) => {
                tracing::warn!("flag file unreadable, treating as empty: {}", e);
                HashMap::new()
            },
        }
    }

    fn save(&self, flags: &HashMap<String, bool>) {
        let content = match serde_json::to_string_pretty(flags) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!("failed to serialize flags: {}", e);
                return;
            },
        };
        // Atomic write
        let temp_path = self.path.with_extension("json.tmp");
        if let Err(e) =
            fs::write(&temp_path, content).and_then(|()| fs::rename(&temp_path, &self.path))
        {
            tracing::warn!("failed to persist flags to {}: {}", self.path.display(), e);
        }
    }
}

impl FlagStore for FileFlagStore {
    fn get(&self, key: &str) -> bool {
        self.load().get(key).copied().unwrap_or(false)
    }

    fn set(&self, key: &str, value: bool) {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut flags = self.load();
        flags.insert(key.to_string(), value);
        self.save(&flags);
    }

    fn clear(&self, key: &str) {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut flags = self.load();
        if flags.remove(key).is_some() {
            self.save(&flags);
        }
    }
}

/// In-memory flag store for tests and hosts with their own persistence.
#[derive(Default)]
pub struct MemoryFlagStore {
    flags: RwLock<HashMap<String, bool>>,
}

impl MemoryFlagStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FlagStore for MemoryFlagStore {
    fn get(&self, key: &str) -> bool {
        self.flags
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .copied()
            .unwrap_or(false)
    }

    fn set(&self, key: &str, value: bool) {
        self.flags
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value);
    }

    fn clear(&self, key: &str) {
        self.flags.write().unwrap_or_else(PoisonError::into_inner).remove(key);
    }
}

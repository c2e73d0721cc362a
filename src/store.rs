//! Flat key-value persistence.
//!
//! The game keeps everything it persists (leaderboard rows, best streak,
//! tutorial flag) as string-keyed integers and strings. Writes are
//! last-write-wins with no transactions; `flush` makes them durable.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::error::Result;

pub const LEADERBOARD_COUNT_KEY: &str = "LeaderboardCount";
pub const BEST_STREAK_KEY: &str = "BestStreak";
pub const TUTORIAL_DONE_KEY: &str = "hasCompletedTutorial";

pub fn player_name_key(index: usize) -> String {
    format!("PlayerName_{}", index)
}

pub fn player_streak_key(index: usize) -> String {
    format!("PlayerStreak_{}", index)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredValue {
    Int(i64),
    Str(String),
}

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<&StoredValue>;
    fn set(&mut self, key: &str, value: StoredValue);
    fn delete_key(&mut self, key: &str);
    /// Persist pending writes.
    fn flush(&mut self) -> Result<()>;

    fn has_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Missing keys and non-integer values both read as `None`.
    fn get_int(&self, key: &str) -> Option<i64> {
        match self.get(key) {
            Some(StoredValue::Int(v)) => Some(*v),
            _ => None,
        }
    }

    fn get_int_or(&self, key: &str, default: i64) -> i64 {
        self.get_int(key).unwrap_or(default)
    }

    fn set_int(&mut self, key: &str, value: i64) {
        self.set(key, StoredValue::Int(value));
    }

    fn get_string(&self, key: &str) -> Option<String> {
        match self.get(key) {
            Some(StoredValue::Str(s)) => Some(s.clone()),
            _ => None,
        }
    }

    fn set_string(&mut self, key: &str, value: &str) {
        self.set(key, StoredValue::Str(value.to_string()));
    }
}

/// Volatile store for tests and throwaway sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, StoredValue>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<&StoredValue> {
        self.values.get(key)
    }

    fn set(&mut self, key: &str, value: StoredValue) {
        self.values.insert(key.to_string(), value);
    }

    fn delete_key(&mut self, key: &str) {
        self.values.remove(key);
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Store backed by one JSON object on disk.
///
/// A missing file opens as empty. A corrupt file is logged and also opens as
/// empty; the next flush overwrites it. Flushes write a sibling temp file
/// and rename it over the target.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    values: BTreeMap<String, StoredValue>,
    dirty: bool,
}

impl JsonFileStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let values = if path.exists() {
            let text = fs::read_to_string(&path)?;
            match serde_json::from_str::<BTreeMap<String, StoredValue>>(&text) {
                Ok(values) => {
                    log::info!("Loaded {} keys from {}", values.len(), path.display());
                    values
                }
                Err(e) => {
                    log::warn!("Store file {} is corrupt ({}); starting fresh", path.display(), e);
                    BTreeMap::new()
                }
            }
        } else {
            log::info!("No store at {}, starting fresh", path.display());
            BTreeMap::new()
        };
        Ok(JsonFileStore { path, values, dirty: false })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<&StoredValue> {
        self.values.get(key)
    }

    fn set(&mut self, key: &str, value: StoredValue) {
        self.values.insert(key.to_string(), value);
        self.dirty = true;
    }

    fn delete_key(&mut self, key: &str) {
        if self.values.remove(key).is_some() {
            self.dirty = true;
        }
    }

    fn flush(&mut self) -> Result<()> {
        if !self.dirty && self.path.exists() {
            return Ok(());
        }
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.values)?;
        let tmp = self.tmp_path();
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        self.dirty = false;
        log::debug!("Store flushed to {} ({} keys)", self.path.display(), self.values.len());
        Ok(())
    }
}

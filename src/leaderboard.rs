//! Challenge leaderboard
//!
//! Top 10 streaks, persisted as flat indexed keys (`PlayerName_i`,
//! `PlayerStreak_i`, `LeaderboardCount`).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{NameError, Result};
use crate::store::{
    player_name_key, player_streak_key, KeyValueStore, LEADERBOARD_COUNT_KEY,
};

/// Maximum number of entries to keep
pub const MAX_ENTRIES: usize = 10;
/// Longest accepted player name, in characters
pub const MAX_NAME_LEN: usize = 10;
/// Upper bound on rows read back from a store, whatever `LeaderboardCount` says.
pub const MAX_STORED_ROWS: usize = 1000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub streak: u32,
}

impl fmt::Display for LeaderboardEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - Streak: {}", self.name, self.streak)
    }
}

/// Trim and check a player name.
pub fn validate_name(name: &str) -> std::result::Result<String, NameError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(NameError::Empty);
    }
    let len = name.chars().count();
    if len > MAX_NAME_LEN {
        return Err(NameError::TooLong { len, max: MAX_NAME_LEN });
    }
    Ok(name.to_string())
}

/// Entries sorted by streak, highest first. Ties keep submission order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Leaderboard {
    pub entries: Vec<LeaderboardEntry>,
    /// Rows present in the store when loaded; stale rows past the new
    /// length are deleted on save.
    #[serde(skip)]
    stored_count: usize,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the stored rows, sort and keep the top 10. Never reads past
    /// [`MAX_STORED_ROWS`], whatever the stored count claims.
    pub fn load(store: &impl KeyValueStore) -> Self {
        let declared = store.get_int_or(LEADERBOARD_COUNT_KEY, 0).max(0) as usize;
        if declared > MAX_STORED_ROWS {
            log::warn!(
                "LeaderboardCount {} exceeds {}; reading only the first {} rows",
                declared, MAX_STORED_ROWS, MAX_STORED_ROWS
            );
        }
        let count = declared.min(MAX_STORED_ROWS);
        let mut entries: Vec<LeaderboardEntry> = (0..count)
            .map(|i| LeaderboardEntry {
                name: store
                    .get_string(&player_name_key(i))
                    .unwrap_or_else(|| "Unknown".to_string()),
                streak: store.get_int_or(&player_streak_key(i), 0).max(0) as u32,
            })
            .collect();
        // stable: equal streaks keep their stored order
        entries.sort_by(|a, b| b.streak.cmp(&a.streak));
        entries.truncate(MAX_ENTRIES);
        log::info!("Loaded {} leaderboard entries ({} stored)", entries.len(), count);
        Leaderboard { entries, stored_count: count }
    }

    /// Write the kept rows back, drop stale ones, and flush.
    pub fn save(&mut self, store: &mut impl KeyValueStore) -> Result<()> {
        for (i, entry) in self.entries.iter().enumerate() {
            store.set_string(&player_name_key(i), &entry.name);
            store.set_int(&player_streak_key(i), entry.streak as i64);
        }
        for i in self.entries.len()..self.stored_count {
            store.delete_key(&player_name_key(i));
            store.delete_key(&player_streak_key(i));
        }
        store.set_int(LEADERBOARD_COUNT_KEY, self.entries.len() as i64);
        store.flush()?;
        self.stored_count = self.entries.len();
        log::info!("Leaderboard saved ({} entries)", self.entries.len());
        Ok(())
    }

    /// Whether a streak would make the table.
    pub fn qualifies(&self, streak: u32) -> bool {
        if self.entries.len() < MAX_ENTRIES {
            return true;
        }
        self.entries.last().map(|e| streak > e.streak).unwrap_or(true)
    }

    /// Insert a named streak. Returns the 1-based rank, or `None` when it
    /// falls outside the top 10. Invalid names change nothing.
    pub fn submit(&mut self, name: &str, streak: u32) -> std::result::Result<Option<usize>, NameError> {
        let name = validate_name(name)?;
        if !self.qualifies(streak) {
            return Ok(None);
        }
        let entry = LeaderboardEntry { name, streak };
        let pos = self.entries.iter().position(|e| streak > e.streak);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };
        self.entries.truncate(MAX_ENTRIES);
        Ok(Some(rank))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top_streak(&self) -> Option<u32> {
        self.entries.first().map(|e| e.streak)
    }

    /// Display lines, one per slot, blank for unused slots.
    pub fn lines(&self) -> Vec<String> {
        (0..MAX_ENTRIES)
            .map(|i| self.entries.get(i).map(|e| e.to_string()).unwrap_or_default())
            .collect()
    }
}

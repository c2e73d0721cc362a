//! Game settings
//!
//! Loaded from an optional JSON file; every field falls back to its default.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::quiz_engine::distractors::MAX_ATTEMPTS;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Seconds the correct answer stays on screen in practice modes
    pub reveal_delay_secs: f32,
    /// Same, for the multiplication challenge
    pub challenge_reveal_delay_secs: f32,
    /// Challenge clock (1000 s shows as 16:40)
    pub challenge_time_budget_secs: f32,
    /// Random draws allowed per distractor search
    pub max_distractor_attempts: u32,
    /// Start practice modes with easy mode on
    pub easy_mode: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            reveal_delay_secs: 3.0,
            challenge_reveal_delay_secs: 2.0,
            challenge_time_budget_secs: 1000.0,
            max_distractor_attempts: MAX_ATTEMPTS,
            easy_mode: false,
        }
    }
}

impl Settings {
    /// Read settings from `path`. A missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("No settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&text)?;
        settings.validate()?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        let delays = [
            ("reveal_delay_secs", self.reveal_delay_secs),
            ("challenge_reveal_delay_secs", self.challenge_reveal_delay_secs),
        ];
        for (field, value) in delays {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(field, "must be a non-negative number of seconds"));
            }
        }
        if !self.challenge_time_budget_secs.is_finite() || self.challenge_time_budget_secs <= 0.0 {
            return Err(invalid("challenge_time_budget_secs", "must be positive"));
        }
        if self.max_distractor_attempts == 0 {
            return Err(invalid("max_distractor_attempts", "must be at least 1"));
        }
        Ok(())
    }
}

fn invalid(field: &str, reason: &str) -> Error {
    Error::InvalidConfig { field: field.to_string(), reason: reason.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_classic_game() {
        let s = Settings::default();
        assert_eq!(s.reveal_delay_secs, 3.0);
        assert_eq!(s.challenge_reveal_delay_secs, 2.0);
        assert_eq!(s.challenge_time_budget_secs, 1000.0);
        assert_eq!(s.max_distractor_attempts, 100);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{ "easy_mode": true, "reveal_delay_secs": 1.5 }"#).unwrap();
        let s = Settings::load(&path).unwrap();
        assert!(s.easy_mode);
        assert_eq!(s.reveal_delay_secs, 1.5);
        assert_eq!(s.challenge_time_budget_secs, 1000.0);
    }

    #[test]
    fn missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let s = Settings::load(dir.path().join("nope.json")).unwrap();
        assert_eq!(s, Settings::default());
    }

    #[test]
    fn zero_budget_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{ "challenge_time_budget_secs": 0 }"#).unwrap();
        match Settings::load(&path) {
            Err(Error::InvalidConfig { field, .. }) => assert_eq!(field, "challenge_time_budget_secs"),
            other => panic!("expected InvalidConfig, got {other:?}"),
        }
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let s = Settings { easy_mode: true, max_distractor_attempts: 20, ..Settings::default() };
        s.save(&path).unwrap();
        assert_eq!(Settings::load(&path).unwrap(), s);
    }
}

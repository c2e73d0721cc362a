//! Crate error types.

use thiserror::Error;

/// Why a leaderboard name was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    #[error("player name is empty")]
    Empty,

    #[error("player name is {len} characters; the limit is {max}")]
    TooLong { len: usize, max: usize },
}

#[derive(Debug, Error)]
pub enum Error {
    /// Reading or writing a store or settings file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A store or settings file is not valid JSON for its type.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid player name: {0}")]
    InvalidName(#[from] NameError),

    /// A settings field has an unusable value.
    #[error("Invalid configuration value for '{field}': {reason}")]
    InvalidConfig { field: String, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;

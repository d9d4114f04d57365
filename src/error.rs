// src/error.rs
use std::io;
use thiserror::Error;

/// A request that produced no response. Never escapes the collector;
/// non-200 statuses are ordinary responses, not errors.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        FetchError::Transport(e.to_string())
    }
}

/// Failure to append a table. The only error that fails a run.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("sqlite: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("invalid table name: {0:?}")]
    InvalidTableName(String),

    #[error("unknown connection alias: {0:?}")]
    UnknownConnection(String),

    #[error("io: {0}")]
    Io(#[from] io::Error),
}

impl StoreError {
    /// Bad names and aliases fail the same way on every attempt.
    pub fn is_transient(&self) -> bool {
        matches!(self, StoreError::Sqlite(_) | StoreError::Io(_))
    }
}

#[derive(Error, Debug)]
pub enum RunError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("HTTP client setup: {0}")]
    Client(#[from] FetchError),

    #[error("another run holds the lock at {0}")]
    Locked(String),

    #[error("lock file {path}: {source}")]
    Lock {
        path: String,
        #[source]
        source: io::Error,
    },
}

impl RunError {
    /// Only storage hiccups are worth another scrape.
    pub fn is_retryable(&self) -> bool {
        match self {
            RunError::Store(e) => e.is_transient(),
            _ => false,
        }
    }
}

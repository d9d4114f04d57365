// src/config/options.rs
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use rusqlite::Connection;

use super::consts::*;
use crate::error::StoreError;

/// Everything the collector needs for one run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CollectOptions {
    /// Search URL without the page parameter, e.g. `https://host/s?k=mathematics`.
    pub base_url: String,
    pub target_count: usize,
    /// Hard ceiling on pages requested in one run.
    pub max_pages: u32,
    /// Stop after this many consecutive 200 pages that yield nothing.
    pub empty_page_limit: u32,
    pub pause: Duration,
}

impl Default for CollectOptions {
    fn default() -> Self {
        Self {
            base_url: s!(BASE_URL),
            target_count: DEFAULT_TARGET_COUNT,
            max_pages: DEFAULT_MAX_PAGES,
            empty_page_limit: DEFAULT_EMPTY_PAGE_LIMIT,
            pause: Duration::from_millis(REQUEST_PAUSE_MS),
        }
    }
}

impl CollectOptions {
    pub fn with_target(target_count: usize) -> Self {
        Self { target_count, ..Self::default() }
    }

    /// `{base}&page={n}`, or `?page=` when the base has no query yet.
    pub fn page_url(&self, page: u32) -> String {
        let sep = if self.base_url.contains('?') { '&' } else { '?' };
        format!("{}{}page={}", self.base_url, sep, page)
    }
}

/// Fixed-delay retry around a whole run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt; total attempts = retries + 1.
    pub retries: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retries: DEFAULT_RETRIES,
            delay: Duration::from_secs(DEFAULT_RETRY_DELAY_SECS),
        }
    }
}

impl RetryPolicy {
    pub fn none() -> Self {
        Self { retries: 0, delay: Duration::ZERO }
    }

    pub fn max_attempts(&self) -> u32 {
        self.retries.saturating_add(1)
    }
}

/// Named connection aliases resolved to SQLite database paths.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConnectionRegistry {
    aliases: HashMap<String, PathBuf>,
}

impl Default for ConnectionRegistry {
    fn default() -> Self {
        let mut aliases = HashMap::new();
        aliases.insert(
            s!(DEFAULT_CONN_ALIAS),
            PathBuf::from(STORE_DIR).join(DEFAULT_DB_FILE),
        );
        Self { aliases }
    }
}

impl ConnectionRegistry {
    pub fn empty() -> Self {
        Self { aliases: HashMap::new() }
    }

    /// Register or replace an alias.
    pub fn insert(&mut self, alias: &str, path: impl Into<PathBuf>) {
        self.aliases.insert(s!(alias), path.into());
    }

    /// Parse `alias=path` (as given on the command line) and register it.
    pub fn insert_spec(&mut self, spec: &str) -> Result<(), String> {
        let (alias, path) = spec
            .split_once('=')
            .ok_or_else(|| format!("expected ALIAS=PATH, got {:?}", spec))?;
        let alias = alias.trim();
        let path = path.trim();
        if alias.is_empty() || path.is_empty() {
            return Err(format!("expected ALIAS=PATH, got {:?}", spec));
        }
        self.insert(alias, path);
        Ok(())
    }

    pub fn resolve(&self, alias: &str) -> Result<&Path, StoreError> {
        self.aliases
            .get(alias)
            .map(PathBuf::as_path)
            .ok_or_else(|| StoreError::UnknownConnection(s!(alias)))
    }

    /// Open a fresh connection for `alias`. `:memory:` is passed through.
    pub fn open(&self, alias: &str) -> Result<Connection, StoreError> {
        let path = self.resolve(alias)?;
        if path.as_os_str() == ":memory:" {
            return Ok(Connection::open_in_memory()?);
        }
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        Ok(Connection::open(path)?)
    }
}

/// One run, fully described. Passed explicitly to the runner.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunOptions {
    pub collect: CollectOptions,
    pub table: String,
    pub conn_alias: String,
    pub connections: ConnectionRegistry,
    pub retry: RetryPolicy,
    /// Also write the run's table here as CSV.
    pub csv_out: Option<PathBuf>,
    /// Lock file guarding against overlapping runs; `None` disables it.
    pub lock_path: Option<PathBuf>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            collect: CollectOptions::default(),
            table: s!(DEFAULT_TABLE),
            conn_alias: s!(DEFAULT_CONN_ALIAS),
            connections: ConnectionRegistry::default(),
            retry: RetryPolicy::default(),
            csv_out: None,
            lock_path: Some(PathBuf::from(STORE_DIR).join(LOCK_FILE)),
        }
    }
}

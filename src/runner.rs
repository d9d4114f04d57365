// src/runner.rs
//
// Explicit composition of one run: collect -> normalize -> store, with the
// retry policy wrapped around the whole thing. Scheduling is left to
// whatever invokes the binary.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::thread;

use crate::{
    config::options::{RetryPolicy, RunOptions},
    core::net::{HttpSource, PageSource},
    csv,
    error::RunError,
    normalize::normalize,
    progress::Progress,
    scrape::{collect_from, StopReason},
    store::store_into,
};

/// What one successful run did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunSummary {
    /// Records returned by the collector, duplicates included.
    pub collected: usize,
    /// Rows appended (after dedup).
    pub stored: usize,
    pub pages: u32,
    pub stop: StopReason,
    /// Attempts used, 1-based.
    pub attempts: u32,
    pub csv_written: Option<PathBuf>,
}

/// Exclusive marker for "a run is in progress". Removed on drop.
#[derive(Debug)]
pub struct RunLock {
    path: PathBuf,
}

impl RunLock {
    pub fn acquire(path: &Path) -> Result<Self, RunError> {
        let lock_err = |source: io::Error| RunError::Lock { path: path.display().to_string(), source };
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(lock_err)?;
            }
        }
        match OpenOptions::new().write(true).create_new(true).open(path) {
            Ok(mut f) => {
                let _ = writeln!(f, "{}", std::process::id());
                Ok(Self { path: path.to_path_buf() })
            }
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                Err(RunError::Locked(path.display().to_string()))
            }
            Err(e) => Err(lock_err(e)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for RunLock {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.path) {
            logw!("could not remove lock {}: {e}", self.path.display());
        }
    }
}

/// Call `attempt` until it succeeds, the error is not retryable, or the
/// policy runs out. Sleeps `policy.delay` between attempts.
pub fn run_with_retry<T, F>(policy: &RetryPolicy, mut attempt: F) -> Result<T, RunError>
where
    F: FnMut(u32) -> Result<T, RunError>,
{
    let max = policy.max_attempts();
    let mut n = 1;
    loop {
        match attempt(n) {
            Ok(v) => return Ok(v),
            Err(e) if !e.is_retryable() || n >= max => {
                loge!("attempt {n}/{max} failed: {e}");
                return Err(e);
            }
            Err(e) => {
                logw!("attempt {n}/{max} failed: {e}; retrying in {:?}", policy.delay);
                if !policy.delay.is_zero() {
                    thread::sleep(policy.delay);
                }
                n += 1;
            }
        }
    }
}

/// One attempt: collect from `source`, dedup, optionally export CSV, append.
/// The connection is opened fresh from the alias each time.
pub fn run_once<S: PageSource + ?Sized>(
    opts: &RunOptions,
    source: &mut S,
    progress: Option<&mut dyn Progress>,
) -> Result<RunSummary, RunError> {
    let outcome = collect_from(source, &opts.collect, progress);
    let collected = outcome.records.len();
    logf!(
        "collected {collected}/{} records over {} pages ({:?})",
        opts.collect.target_count, outcome.pages, outcome.stop
    );

    let table = normalize(outcome.records);
    logf!("{} unique titles", table.len());

    let csv_written = match &opts.csv_out {
        Some(path) => match csv::write_table(path, &table, ',') {
            Ok(()) => Some(path.clone()),
            Err(e) => {
                logw!("CSV export to {} failed: {e}", path.display());
                None
            }
        },
        None => None,
    };

    let mut conn = opts.connections.open(&opts.conn_alias)?;
    let stored = store_into(&table, &mut conn, &opts.table)?;

    Ok(RunSummary {
        collected,
        stored,
        pages: outcome.pages,
        stop: outcome.stop,
        attempts: 1,
        csv_written,
    })
}

/// A full run against `source`, under the lock and the retry policy.
pub fn run_with_source<S: PageSource + ?Sized>(
    opts: &RunOptions,
    source: &mut S,
    mut progress: Option<&mut dyn Progress>,
) -> Result<RunSummary, RunError> {
    let _lock = match &opts.lock_path {
        Some(p) => Some(RunLock::acquire(p)?),
        None => None,
    };

    run_with_retry(&opts.retry, |n| {
        logf!("run attempt {n}");
        let progress = progress.as_mut().map(|p| &mut **p as &mut dyn Progress);
        run_once(opts, source, progress).map(|s| RunSummary { attempts: n, ..s })
    })
}

/// A full run over HTTP.
pub fn run(opts: &RunOptions, progress: Option<&mut dyn Progress>) -> Result<RunSummary, RunError> {
    let mut source = HttpSource::new()?;
    run_with_source(opts, &mut source, progress)
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::time::Duration;

    use super::*;
    use crate::error::StoreError;

    fn tmp(name: &str) -> PathBuf {
        let mut p = std::env::temp_dir();
        p.push(format!("math_books_runner_{}_{}", name, std::process::id()));
        let _ = fs::remove_file(&p);
        p
    }

    fn fast(retries: u32) -> RetryPolicy {
        RetryPolicy { retries, delay: Duration::ZERO }
    }

    fn store_err() -> RunError {
        StoreError::Io(io::Error::new(io::ErrorKind::Other, "disk full")).into()
    }

    #[test]
    fn retry_stops_on_first_success() {
        let calls = Cell::new(0);
        let out = run_with_retry(&fast(2), |n| {
            calls.set(n);
            if n < 2 { Err(store_err()) } else { Ok(n) }
        });
        assert_eq!(out.unwrap(), 2);
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn retry_gives_up_after_policy() {
        let calls = Cell::new(0);
        let out: Result<(), _> = run_with_retry(&fast(2), |_| {
            calls.set(calls.get() + 1);
            Err(store_err())
        });
        assert!(matches!(out, Err(RunError::Store(_))));
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn lock_contention_is_not_retried() {
        let calls = Cell::new(0);
        let out: Result<(), _> = run_with_retry(&fast(5), |_| {
            calls.set(calls.get() + 1);
            Err(RunError::Locked(s!("x")))
        });
        assert!(matches!(out, Err(RunError::Locked(_))));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn lock_is_exclusive_and_released_on_drop() {
        let p = tmp("lock");
        let first = RunLock::acquire(&p).unwrap();
        assert!(matches!(RunLock::acquire(&p), Err(RunError::Locked(_))));
        drop(first);
        assert!(!p.exists());
        let again = RunLock::acquire(&p).unwrap();
        assert_eq!(again.path(), p.as_path());
    }

    #[test]
    fn unwritable_lock_path_is_a_lock_error() {
        // parent "directory" is a plain file
        let blocker = tmp("lock_blocker");
        fs::write(&blocker, "x").unwrap();
        let out = RunLock::acquire(&blocker.join("run.lock"));
        assert!(matches!(out, Err(RunError::Lock { .. })));
        let _ = fs::remove_file(&blocker);
    }

    #[test]
    fn bad_configuration_is_not_retried() {
        let calls = Cell::new(0);
        let out: Result<(), _> = run_with_retry(&fast(2), |_| {
            calls.set(calls.get() + 1);
            Err(StoreError::InvalidTableName(s!("x y")).into())
        });
        assert!(matches!(out, Err(RunError::Store(StoreError::InvalidTableName(_)))));
        assert_eq!(calls.get(), 1);
    }
}

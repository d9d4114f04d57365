// src/cli.rs
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::{eyre, Result, WrapErr};

use crate::config::consts::*;
use crate::config::options::{CollectOptions, ConnectionRegistry, RetryPolicy, RunOptions};
use crate::core::net::HttpSource;
use crate::progress::Progress;
use crate::{csv, normalize::normalize, runner, scrape};

#[derive(Debug, Parser)]
#[command(name = "math_books", version, about = "Scrape book listings, dedup by title, append to SQLite")]
pub struct Args {
    /// Number of listings to collect.
    #[arg(short = 'n', long, default_value_t = DEFAULT_TARGET_COUNT)]
    pub count: usize,

    /// Search URL without the page parameter.
    #[arg(long, default_value = BASE_URL)]
    pub base_url: String,

    /// Stop after this many pages even if the target is not met.
    #[arg(long, default_value_t = DEFAULT_MAX_PAGES)]
    pub max_pages: u32,

    /// Stop after this many consecutive pages with no listings.
    #[arg(long, default_value_t = DEFAULT_EMPTY_PAGE_LIMIT)]
    pub empty_page_limit: u32,

    /// Pause between page requests, in milliseconds.
    #[arg(long, default_value_t = REQUEST_PAUSE_MS)]
    pub pause_ms: u64,

    /// Destination table.
    #[arg(long, default_value = DEFAULT_TABLE)]
    pub table: String,

    /// Connection alias to store through.
    #[arg(long = "conn", default_value = DEFAULT_CONN_ALIAS)]
    pub conn_alias: String,

    /// Register a connection alias: ALIAS=PATH (repeatable, `:memory:` allowed).
    #[arg(long = "connection", value_name = "ALIAS=PATH")]
    pub connections: Vec<String>,

    /// Retries of the whole run after a storage failure.
    #[arg(long, default_value_t = DEFAULT_RETRIES)]
    pub retries: u32,

    /// Delay between retries, in seconds.
    #[arg(long, default_value_t = DEFAULT_RETRY_DELAY_SECS)]
    pub retry_delay: u64,

    /// Also write the run's table to this CSV file.
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Collect and dedup only; print CSV to stdout instead of storing.
    #[arg(long)]
    pub dry_run: bool,

    /// Skip the single-run lock file.
    #[arg(long)]
    pub no_lock: bool,

    /// Default log level (RUST_LOG overrides).
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Args {
    pub fn to_run_options(&self) -> Result<RunOptions> {
        let mut connections = ConnectionRegistry::default();
        for spec in &self.connections {
            connections.insert_spec(spec).map_err(|e| eyre!(e))?;
        }

        let defaults = RunOptions::default();
        Ok(RunOptions {
            collect: CollectOptions {
                base_url: self.base_url.clone(),
                target_count: self.count,
                max_pages: self.max_pages,
                empty_page_limit: self.empty_page_limit,
                pause: Duration::from_millis(self.pause_ms),
            },
            table: self.table.clone(),
            conn_alias: self.conn_alias.clone(),
            connections,
            retry: RetryPolicy {
                retries: self.retries,
                delay: Duration::from_secs(self.retry_delay),
            },
            csv_out: self.csv.clone(),
            lock_path: if self.no_lock { None } else { defaults.lock_path },
        })
    }
}

/// Progress lines on stderr.
struct StderrProgress;

impl Progress for StderrProgress {
    fn begin(&mut self, target: usize) {
        eprintln!("Collecting up to {target} listings…");
    }
    fn page_done(&mut self, page: u32, kept: usize, total: usize) {
        eprintln!("  page {page}: +{kept} ({total} so far)");
    }
    fn log(&mut self, msg: &str) {
        eprintln!("{msg}");
    }
    fn finish(&mut self, total: usize) {
        eprintln!("Collected {total}");
    }
}

pub fn run() -> Result<()> {
    run_with(Args::parse())
}

pub fn run_with(args: Args) -> Result<()> {
    crate::log::init(&args.log_level, Some(PathBuf::from(STORE_DIR).join(LOG_FILE).as_path()));
    let opts = args.to_run_options()?;
    let mut progress = StderrProgress;

    if args.dry_run {
        let mut source = HttpSource::new().wrap_err("building HTTP client")?;
        let outcome = scrape::collect_from(&mut source, &opts.collect, Some(&mut progress));
        let table = normalize(outcome.records);
        print!("{}", csv::table_to_string(&table, ',', true));
        return Ok(());
    }

    let summary = runner::run(&opts, Some(&mut progress)).wrap_err("run failed")?;
    println!(
        "Stored {} rows in {} ({} collected, {} pages, attempt {})",
        summary.stored, opts.table, summary.collected, summary.pages, summary.attempts
    );
    if let Some(p) = summary.csv_written {
        println!("Wrote {}", p.display());
    }
    Ok(())
}

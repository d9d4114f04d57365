// src/config/consts.rs

// Net config
pub const BASE_URL: &str = "https://www.amazon.com/s?k=mathematics";
pub const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/112.0.0.0 Safari/537.36";
pub const ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8,application/signed-exchange;v=b3;q=0.7";
pub const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";
pub const REQUEST_TIMEOUT_SECS: u64 = 15;
pub const REQUEST_PAUSE_MS: u64 = 250; // be polite

// Collect
pub const DEFAULT_TARGET_COUNT: usize = 50;
pub const DEFAULT_MAX_PAGES: u32 = 20;
pub const DEFAULT_EMPTY_PAGE_LIMIT: u32 = 3;

// Sink
pub const DEFAULT_TABLE: &str = "math_books";
pub const DEFAULT_CONN_ALIAS: &str = "math_books_conn";
pub const DEFAULT_DB_FILE: &str = "math_books.db";

// Local state (db, log, lock)
pub const STORE_DIR: &str = ".store";
pub const LOG_FILE: &str = "debug.log";
pub const LOCK_FILE: &str = "run.lock";

// Retry (applies to a whole run)
pub const DEFAULT_RETRIES: u32 = 2;
pub const DEFAULT_RETRY_DELAY_SECS: u64 = 5 * 60;

// src/scrape/collect.rs
use std::thread;

use crate::{
    config::options::CollectOptions,
    core::{html, net::{HttpSource, PageSource}},
    data::ListingRecord,
    progress::Progress,
};

/// Why the page loop ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StopReason {
    TargetReached,
    /// Non-200 status or no response. Partial results stand.
    FetchFailed(String),
    PageLimit,
    /// Too many consecutive pages with nothing extractable.
    EmptyPages,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CollectOutcome {
    pub records: Vec<ListingRecord>,
    /// Pages requested, including a failed last one.
    pub pages: u32,
    pub stop: StopReason,
}

/// Collect up to `target_count` listings from the default search over HTTP.
/// Never fails: fetch problems end collection with whatever was gathered.
pub fn collect(target_count: usize) -> Vec<ListingRecord> {
    let opts = CollectOptions::with_target(target_count);
    match HttpSource::new() {
        Ok(mut source) => collect_from(&mut source, &opts, None).records,
        Err(e) => {
            loge!("HTTP client setup failed: {e}");
            Vec::new()
        }
    }
}

/// The page loop, over any source.
pub fn collect_from<S: PageSource + ?Sized>(
    source: &mut S,
    opts: &CollectOptions,
    mut progress: Option<&mut dyn Progress>,
) -> CollectOutcome {
    let target = opts.target_count;
    if let Some(p) = progress.as_deref_mut() {
        p.begin(target);
    }

    let mut records: Vec<ListingRecord> = Vec::new();
    let mut page: u32 = 1;
    let mut empty_streak: u32 = 0;

    let stop = loop {
        if records.len() >= target {
            break StopReason::TargetReached;
        }
        if page > opts.max_pages {
            logw!("page limit {} reached with {}/{} records", opts.max_pages, records.len(), target);
            break StopReason::PageLimit;
        }
        if page > 1 && !opts.pause.is_zero() {
            thread::sleep(opts.pause);
        }

        let url = opts.page_url(page);
        logd!("GET {url}");

        let resp = match source.get(&url) {
            Ok(r) if r.is_success() => r,
            Ok(r) => {
                logw!("Failed to retrieve page {page}: HTTP {}", r.status);
                break StopReason::FetchFailed(format!("HTTP {}", r.status));
            }
            Err(e) => {
                logw!("Failed to retrieve page {page}: {e}");
                break StopReason::FetchFailed(e.to_string());
            }
        };

        let extract = html::extract_listings(&resp.body);
        let kept = extract.records.len();
        logf!(
            "page {page}: {} containers, {kept} complete, {} skipped",
            extract.containers,
            extract.skipped()
        );
        records.extend(extract.records);

        if let Some(p) = progress.as_deref_mut() {
            p.page_done(page, kept, records.len());
        }

        if kept == 0 {
            empty_streak += 1;
            if empty_streak >= opts.empty_page_limit {
                logw!("{empty_streak} consecutive pages without listings, stopping");
                page += 1;
                break StopReason::EmptyPages;
            }
        } else {
            empty_streak = 0;
        }
        page += 1;
    };

    records.truncate(target);
    if let Some(p) = progress.as_deref_mut() {
        if let Some(msg) = early_stop_message(&stop, records.len(), target) {
            p.log(&msg);
        }
        p.finish(records.len());
    }

    let pages = match stop {
        StopReason::FetchFailed(_) => page,
        _ => page - 1,
    };
    CollectOutcome { records, pages, stop }
}

fn early_stop_message(stop: &StopReason, got: usize, target: usize) -> Option<String> {
    let why = match stop {
        StopReason::TargetReached => return None,
        StopReason::FetchFailed(e) => format!("page fetch failed ({e})"),
        StopReason::PageLimit => s!("page limit reached"),
        StopReason::EmptyPages => s!("too many empty pages"),
    };
    Some(format!("Stopped early: {why}; {got}/{target} listings"))
}

// src/scrape/mod.rs
mod collect;

pub use collect::{collect, collect_from, CollectOutcome, StopReason};

// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod config;
pub mod core;
pub mod error;

pub mod data;
pub mod progress;
pub mod scrape;
pub mod normalize;
pub mod store;
pub mod csv;
pub mod runner;

#[cfg(feature = "cli")]
pub mod cli;

pub use data::{ListingRecord, ListingTable, SCHEMA};
pub use normalize::normalize;
pub use scrape::collect;
pub use store::store;

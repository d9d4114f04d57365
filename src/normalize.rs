// src/normalize.rs
use std::collections::HashSet;

use crate::data::{ListingRecord, ListingTable};

/// Drop records whose title was already seen; first occurrence wins.
/// Input order is kept. Empty input gives an empty table with the schema.
pub fn normalize(records: Vec<ListingRecord>) -> ListingTable {
    let mut seen: HashSet<String> = HashSet::with_capacity(records.len());
    let mut unique = Vec::with_capacity(records.len());

    for rec in records {
        if seen.contains(&rec.title) {
            logd!("duplicate title dropped: {}", rec.title);
            continue;
        }
        seen.insert(rec.title.clone());
        unique.push(rec);
    }

    ListingTable::from_unique(unique)
}

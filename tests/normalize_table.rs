// tests/normalize_table.rs
use std::collections::HashSet;

use math_books::{normalize, ListingRecord, ListingTable, SCHEMA};

fn rec(title: &str, tag: usize) -> ListingRecord {
    ListingRecord::new(title, &format!("author {tag}"), "9.", "4.0 out of 5 stars").unwrap()
}

/// Deterministic mix of titles with repeats (small LCG, no extra deps).
fn sample(n: usize, seed: u64) -> Vec<ListingRecord> {
    let mut x = seed;
    (0..n)
        .map(|i| {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            rec(&format!("Title {}", (x >> 33) % 13), i)
        })
        .collect()
}

#[test]
fn duplicate_titles_keep_first() {
    let t = normalize(vec![rec("A", 0), rec("B", 1), rec("A", 2)]);
    let got: Vec<_> = t.iter().map(|r| (r.title.as_str(), r.author.as_str())).collect();
    assert_eq!(got, [("A", "author 0"), ("B", "author 1")]);
}

#[test]
fn stable_dedup_over_many_inputs() {
    for seed in 1..20u64 {
        let input = sample(60, seed);
        let t = normalize(input.clone());

        let titles: HashSet<_> = t.iter().map(|r| r.title.clone()).collect();
        assert_eq!(titles.len(), t.len(), "seed {seed}");

        // every kept row is the first record with that title
        for row in &t {
            let first = input.iter().find(|r| r.title == row.title).unwrap();
            assert_eq!(row, first, "seed {seed}");
        }

        // relative order of first occurrences is preserved
        let mut seen = HashSet::new();
        let expected: Vec<_> = input.iter().filter(|r| seen.insert(r.title.clone())).cloned().collect();
        assert_eq!(t.rows(), expected.as_slice(), "seed {seed}");
    }
}

#[test]
fn normalize_is_idempotent() {
    for seed in 1..10u64 {
        let once = normalize(sample(40, seed));
        let twice = normalize(once.clone().into_records());
        assert_eq!(once, twice);
    }
}

#[test]
fn schema_does_not_depend_on_data() {
    let empty = normalize(Vec::new());
    let full = normalize(sample(10, 7));
    assert_eq!(empty.columns(), &SCHEMA);
    assert_eq!(full.columns(), &SCHEMA);
    assert_eq!(empty, ListingTable::empty());
}

#[test]
fn whitespace_variants_are_trimmed_before_compare() {
    let a = ListingRecord::new("  Number Theory", "x", "1.", "5").unwrap();
    let b = ListingRecord::new("Number Theory \n", "y", "2.", "4").unwrap();
    let t = normalize(vec![a, b]);
    assert_eq!(t.len(), 1);
    assert_eq!(t.rows()[0].author, "x");
}

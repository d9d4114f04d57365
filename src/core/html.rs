// src/core/html.rs
//
// Results-page extraction. Containers and fields are located by class markers:
//
//   container  div.s-result-item
//   title      span.a-text-normal
//   author     a.a-size-base
//   price      span.a-price-whole
//   rating     span.a-icon-alt
//
// Each field is the first match inside its container, document order.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use crate::data::ListingRecord;

fn sel(css: &str) -> Selector {
    Selector::parse(css).expect("static selector")
}

static CONTAINER: LazyLock<Selector> = LazyLock::new(|| sel("div.s-result-item"));
static TITLE: LazyLock<Selector> = LazyLock::new(|| sel("span.a-text-normal"));
static AUTHOR: LazyLock<Selector> = LazyLock::new(|| sel("a.a-size-base"));
static PRICE: LazyLock<Selector> = LazyLock::new(|| sel("span.a-price-whole"));
static RATING: LazyLock<Selector> = LazyLock::new(|| sel("span.a-icon-alt"));

/// What one page yielded.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct PageExtract {
    /// Containers seen, complete or not.
    pub containers: usize,
    /// Complete records, document order.
    pub records: Vec<ListingRecord>,
}

impl PageExtract {
    pub fn skipped(&self) -> usize {
        self.containers - self.records.len()
    }
}

/// Parse a results page and pull every complete listing out of it.
pub fn extract_listings(doc: &str) -> PageExtract {
    let html = Html::parse_document(doc);
    let mut out = PageExtract::default();

    for container in html.select(&CONTAINER) {
        out.containers += 1;
        match extract_container(container) {
            Some(rec) => out.records.push(rec),
            None => logd!("container {} incomplete, skipped", out.containers),
        }
    }
    out
}

fn extract_container(el: ElementRef<'_>) -> Option<ListingRecord> {
    ListingRecord::from_parts(
        first_text(el, &TITLE),
        first_text(el, &AUTHOR),
        first_text(el, &PRICE),
        first_text(el, &RATING),
    )
}

/// All descendant text of the first match, untrimmed.
fn first_text(el: ElementRef<'_>, sel: &Selector) -> Option<String> {
    el.select(sel).next().map(|m| m.text().collect::<String>())
}

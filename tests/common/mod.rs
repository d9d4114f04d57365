// tests/common/mod.rs
#![allow(dead_code)]

use std::collections::VecDeque;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use math_books::config::options::CollectOptions;
use math_books::core::net::{PageResponse, PageSource};
use math_books::error::FetchError;

pub fn tmp_dir(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("math_books_it_{}_{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&p);
    fs::create_dir_all(&p).unwrap();
    p
}

/// One result container; `None` leaves that field out of the markup.
pub struct Item<'a> {
    pub title: Option<&'a str>,
    pub author: Option<&'a str>,
    pub price: Option<&'a str>,
    pub rating: Option<&'a str>,
}

impl<'a> Item<'a> {
    pub fn full(title: &'a str) -> Self {
        Self {
            title: Some(title),
            author: Some("A. Author"),
            price: Some("19."),
            rating: Some("4.5 out of 5 stars"),
        }
    }

    pub fn without_rating(title: &'a str) -> Self {
        Self { rating: None, ..Self::full(title) }
    }

    fn html(&self) -> String {
        let mut s = String::from(r#"<div class="s-result-item s-asin">"#);
        if let Some(t) = self.title {
            s.push_str(&format!(r#"<h2><a><span class="a-size-medium a-text-normal">  {t}  </span></a></h2>"#));
        }
        if let Some(a) = self.author {
            s.push_str(&format!(r#"<div>by <a class="a-size-base a-link-normal">{a}</a></div>"#));
        }
        if let Some(p) = self.price {
            s.push_str(&format!(r#"<span class="a-price"><span class="a-price-whole">{p}</span></span>"#));
        }
        if let Some(r) = self.rating {
            s.push_str(&format!(r#"<i class="a-icon"><span class="a-icon-alt">{r}</span></i>"#));
        }
        s.push_str("</div>");
        s
    }
}

pub fn results_page(items: &[Item<'_>]) -> String {
    let body: String = items.iter().map(Item::html).collect();
    format!("<!doctype html><html><head><title>Results</title></head><body><div class=\"s-main-slot\">{body}</div></body></html>")
}

/// Paginated fake: serves `pages` in order, then `tail_status` forever.
pub struct FakeSite {
    pages: VecDeque<PageResponse>,
    tail_status: u16,
    pub requested: Vec<String>,
}

impl FakeSite {
    pub fn new(pages: Vec<String>, tail_status: u16) -> Self {
        Self {
            pages: pages.into_iter().map(PageResponse::ok).collect(),
            tail_status,
            requested: Vec::new(),
        }
    }
}

impl PageSource for FakeSite {
    fn get(&mut self, url: &str) -> Result<PageResponse, FetchError> {
        self.requested.push(url.to_string());
        Ok(self.pages.pop_front().unwrap_or(PageResponse {
            status: self.tail_status,
            body: String::from("<html>Service Unavailable</html>"),
        }))
    }
}

pub fn collect_opts(target: usize) -> CollectOptions {
    CollectOptions {
        base_url: String::from("http://fake.test/s?k=mathematics"),
        target_count: target,
        pause: Duration::ZERO,
        ..CollectOptions::default()
    }
}

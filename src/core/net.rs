// src/core/net.rs
//
// Blocking HTTP GET for results pages. One request in flight at a time.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};

use crate::config::consts;
use crate::error::FetchError;

/// A fetched page: status code and decoded body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageResponse {
    pub status: u16,
    pub body: String,
}

impl PageResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self { status: 200, body: body.into() }
    }

    /// Exactly 200; other 2xx codes do not count.
    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}

/// Where the collector gets its pages from.
pub trait PageSource {
    /// GET one URL. Non-200 statuses come back as `Ok` with that status;
    /// `Err` is for requests that produced no response at all.
    fn get(&mut self, url: &str) -> Result<PageResponse, FetchError>;
}

/// Production source: reqwest with a browser-like header set.
pub struct HttpSource {
    client: Client,
}

impl HttpSource {
    pub fn new() -> Result<Self, FetchError> {
        Self::with_timeout(Duration::from_secs(consts::REQUEST_TIMEOUT_SECS))
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .default_headers(browser_headers())
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

impl PageSource for HttpSource {
    fn get(&mut self, url: &str) -> Result<PageResponse, FetchError> {
        let resp = self.client.get(url).send()?;
        let status = resp.status().as_u16();
        let body = resp.text()?;
        Ok(PageResponse { status, body })
    }
}

/// The target rejects clients that don't look like a browser.
pub fn browser_headers() -> HeaderMap {
    let mut h = HeaderMap::new();
    h.insert(USER_AGENT, HeaderValue::from_static(consts::USER_AGENT));
    h.insert(ACCEPT, HeaderValue::from_static(consts::ACCEPT));
    h.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(consts::ACCEPT_LANGUAGE));
    h
}

//! Page fetching with an optional in-memory cache.
//!
//! The extraction core never performs I/O itself; it receives parsed
//! documents from a [`PageFetcher`].
//!
//! # Architecture
//!
//! - [`PageFetcher`]: core trait returning a page body for a URL
//! - [`HttpFetcher`]: `reqwest`-backed implementation
//! - [`CachedFetcher`]: decorator memoising bodies per URL for a fixed TTL
//!
//! Every fetch is a single attempt. There is no retry or backoff.

use crate::error::{BridgeError, Result};
use crate::utils::truncate_for_log;
use scraper::Html;
use std::collections::HashMap;
use std::fmt;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0";

/// Source of page bodies.
pub trait PageFetcher {
    /// Fetch the body at `url`, failing with [`BridgeError::Fetch`].
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// Fetch a page and parse it into a document tree.
#[instrument(level = "info", skip(fetcher))]
pub async fn fetch_document<F: PageFetcher>(fetcher: &F, url: &str) -> Result<Html> {
    let body = fetcher.fetch(url).await?;
    debug!(
        bytes = body.len(),
        preview = %truncate_for_log(&body, 120),
        "Parsing document"
    );
    Ok(Html::parse_document(&body))
}

/// Plain HTTP fetcher.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| BridgeError::Config(format!("http client: {e}")))?;
        Ok(Self { client })
    }
}

impl PageFetcher for HttpFetcher {
    #[instrument(level = "info", skip(self))]
    async fn fetch(&self, url: &str) -> Result<String> {
        let t0 = Instant::now();
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| BridgeError::fetch(url, e))?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "Non-success HTTP status");
            return Err(BridgeError::fetch(url, format!("HTTP {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| BridgeError::fetch(url, e))?;
        info!(
            bytes = body.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Fetched page"
        );
        Ok(body)
    }
}

/// Decorator that keeps successful bodies for `ttl`.
///
/// Failures are never cached.
pub struct CachedFetcher<T> {
    inner: T,
    ttl: Duration,
    entries: Mutex<HashMap<String, (Instant, String)>>,
}

impl<T> CachedFetcher<T> {
    pub fn new(inner: T, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    fn lookup(&self, url: &str) -> Option<String> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries
            .get(url)
            .filter(|(stored_at, _)| stored_at.elapsed() < self.ttl)
            .map(|(_, body)| body.clone())
    }

    fn store(&self, url: &str, body: &str) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.insert(url.to_string(), (Instant::now(), body.to_string()));
    }
}

impl<T> fmt::Debug for CachedFetcher<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CachedFetcher")
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl<T: PageFetcher> PageFetcher for CachedFetcher<T> {
    async fn fetch(&self, url: &str) -> Result<String> {
        if let Some(body) = self.lookup(url) {
            debug!(%url, "Cache hit");
            return Ok(body);
        }
        let body = self.inner.fetch(url).await?;
        self.store(url, &body);
        Ok(body)
    }
}

//! Search suggestions: HTTP source, cache-or-fetch lookup, and the keystroke debouncer.
//!
//! ### Flow
//!
//! 1. Keystrokes enter a [`SuggestionDebouncer`]; only the last query of a quiet window is looked up.
//! 2. [`SuggestionFetcher::lookup`] answers from the cache on an exact-string hit.
//! 3. On a miss the [`SuggestionSource`] is called once and the result is cached under the raw query.
//!
//! Failures are logged and reported as empty suggestions. There is no retry.

pub mod debounce;

pub use debounce::{Origin, SuggestionDebouncer, Suggestions};

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, LazyLock};
use std::time::Duration;

use async_trait::async_trait;
use mytube_core::{AppConfig, SuggestionStore};
use regex::Regex;
use serde::Serialize;

/// Outermost JSON array in a possibly JSONP-padded body.
static JSON_ARRAY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)\[.*\]").expect("valid regex"));

/// Errors from a suggestion source.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SuggestError {
    #[error("request timeout")]
    Timeout,

    #[error("network error: {0}")]
    Network(String),

    #[error("HTTP error: {status}")]
    HttpError { status: u16 },

    #[error("parse error: {0}")]
    Parse(String),

    /// Source declined the request (used by simulated sources).
    #[error("unavailable: {0}")]
    Unavailable(String),
}

impl From<reqwest::Error> for SuggestError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() { SuggestError::Timeout } else { SuggestError::Network(err.to_string()) }
    }
}

impl From<SuggestError> for mytube_core::Error {
    fn from(err: SuggestError) -> Self {
        match err {
            SuggestError::Timeout => mytube_core::Error::FetchTimeout(err.to_string()),
            _ => mytube_core::Error::HttpError(err.to_string()),
        }
    }
}

/// Anything that can produce suggestions for a query.
#[async_trait]
pub trait SuggestionSource: Send + Sync {
    async fn suggest(&self, query: &str) -> Result<Vec<String>, SuggestError>;
}

/// HTTP suggestion client for the public completion endpoint.
#[derive(Debug, Clone)]
pub struct SuggestClient {
    http: reqwest::Client,
    endpoint: url::Url,
}

impl SuggestClient {
    pub fn new(endpoint: &str, timeout: Duration, user_agent: &str) -> Result<Self, SuggestError> {
        let endpoint = url::Url::parse(endpoint).map_err(|e| SuggestError::Parse(format!("invalid endpoint: {e}")))?;
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| SuggestError::Network(e.to_string()))?;

        Ok(Self { http, endpoint })
    }

    pub fn from_app(config: &AppConfig) -> Result<Self, SuggestError> {
        Self::new(&config.suggest_url, config.timeout(), &config.user_agent)
    }

    /// Request URL for a query.
    pub fn request_url(&self, query: &str) -> url::Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("client", "firefox")
            .append_pair("ds", "yt")
            .append_pair("q", query);
        url
    }
}

#[async_trait]
impl SuggestionSource for SuggestClient {
    async fn suggest(&self, query: &str) -> Result<Vec<String>, SuggestError> {
        let response = self.http.get(self.request_url(query)).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SuggestError::HttpError { status: status.as_u16() });
        }

        let body = response.text().await?;
        parse_suggestions(&body)
    }
}

/// Parse `[query, [s1, s2, ...], ...]`, optionally wrapped in JSONP padding.
///
/// Entries may be plain strings or arrays whose first element is the string.
pub fn parse_suggestions(body: &str) -> Result<Vec<String>, SuggestError> {
    let array = JSON_ARRAY
        .find(body)
        .ok_or_else(|| SuggestError::Parse("no JSON array in response".into()))?;

    let data: serde_json::Value =
        serde_json::from_str(array.as_str()).map_err(|e| SuggestError::Parse(e.to_string()))?;

    let Some(entries) = data.get(1).and_then(|v| v.as_array()) else {
        return Ok(Vec::new());
    };

    Ok(entries
        .iter()
        .filter_map(|entry| match entry {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Array(parts) => parts.first().and_then(|p| p.as_str()).map(str::to_string),
            _ => None,
        })
        .collect())
}

/// Result of a cache-or-fetch lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// Blank query; nothing to suggest.
    Cleared,
    Cached(Vec<String>),
    Fetched(Vec<String>),
}

impl Lookup {
    pub fn items(&self) -> &[String] {
        match self {
            Lookup::Cleared => &[],
            Lookup::Cached(items) | Lookup::Fetched(items) => items,
        }
    }

    pub fn into_items(self) -> Vec<String> {
        match self {
            Lookup::Cleared => Vec::new(),
            Lookup::Cached(items) | Lookup::Fetched(items) => items,
        }
    }
}

#[derive(Debug, Default)]
struct FetchCounters {
    hits: AtomicU64,
    misses: AtomicU64,
    network_calls: AtomicU64,
    failures: AtomicU64,
}

/// Point-in-time copy of a fetcher's counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FetchStats {
    pub hits: u64,
    pub misses: u64,
    pub network_calls: u64,
    pub failures: u64,
}

impl FetchStats {
    /// Share of cache lookups answered from the cache, as a rounded percentage.
    pub fn hit_rate(&self) -> u32 {
        let total = self.hits + self.misses;
        if total == 0 {
            return 0;
        }
        (self.hits as f64 / total as f64 * 100.0).round() as u32
    }
}

/// Cache-first suggestion lookup over a source and a store.
#[derive(Clone)]
pub struct SuggestionFetcher {
    source: Arc<dyn SuggestionSource>,
    cache: Arc<dyn SuggestionStore>,
    counters: Arc<FetchCounters>,
}

impl std::fmt::Debug for SuggestionFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SuggestionFetcher").field("stats", &self.stats()).finish_non_exhaustive()
    }
}

impl SuggestionFetcher {
    pub fn new(source: Arc<dyn SuggestionSource>, cache: Arc<dyn SuggestionStore>) -> Self {
        Self { source, cache, counters: Arc::default() }
    }

    /// Exact-match cache lookup, counted as a hit or a miss.
    pub fn cached(&self, query: &str) -> Option<Vec<String>> {
        let found = self.cache.lookup(query);
        let counter = if found.is_some() { &self.counters.hits } else { &self.counters.misses };
        counter.fetch_add(1, Ordering::Relaxed);
        found
    }

    /// Call the source and cache the result under the raw query.
    pub async fn fetch_and_store(&self, query: &str) -> Result<Vec<String>, SuggestError> {
        self.counters.network_calls.fetch_add(1, Ordering::Relaxed);

        match self.source.suggest(query).await {
            Ok(items) => {
                tracing::debug!(query, count = items.len(), "suggestions fetched");
                self.cache.store(query, items.clone());
                Ok(items)
            }
            Err(e) => {
                self.counters.failures.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(query, error = %e, "suggestion fetch failed");
                Err(e)
            }
        }
    }

    /// Answer from the cache, otherwise fetch once and cache.
    pub async fn lookup(&self, query: &str) -> Result<Lookup, SuggestError> {
        if query.trim().is_empty() {
            return Ok(Lookup::Cleared);
        }

        if let Some(items) = self.cached(query) {
            return Ok(Lookup::Cached(items));
        }

        self.fetch_and_store(query).await.map(Lookup::Fetched)
    }

    pub fn stats(&self) -> FetchStats {
        FetchStats {
            hits: self.counters.hits.load(Ordering::Relaxed),
            misses: self.counters.misses.load(Ordering::Relaxed),
            network_calls: self.counters.network_calls.load(Ordering::Relaxed),
            failures: self.counters.failures.load(Ordering::Relaxed),
        }
    }
}

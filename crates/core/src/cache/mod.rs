//! In-memory cache for search suggestions.
//!
//! Suggestions are keyed by the raw query string exactly as typed. Entries
//! never expire and are never evicted; the cache lives for the session.
//!
//! Two stores implement [`SuggestionStore`]: the application [`Store`](crate::Store),
//! which keeps the cache inside `AppState`, and [`SharedSuggestionCache`] for
//! callers that do not carry the whole application state.

pub mod suggestions;

pub use suggestions::{SharedSuggestionCache, SuggestionCache};

/// Read/write access to a suggestion cache.
pub trait SuggestionStore: Send + Sync {
    /// Cached suggestions for an exact query string.
    fn lookup(&self, query: &str) -> Option<Vec<String>>;

    /// Store suggestions under an exact query string, replacing any previous entry.
    fn store(&self, query: &str, items: Vec<String>);
}

//! Suggestion cache keyed by raw query string.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use serde::{Deserialize, Serialize};

use super::SuggestionStore;

/// Mapping from raw query string to the ordered suggestions fetched for it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SuggestionCache {
    entries: HashMap<String, Vec<String>>,
}

impl SuggestionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Exact-match lookup. `"rea"` and `"rea "` are different keys.
    pub fn get(&self, query: &str) -> Option<&[String]> {
        self.entries.get(query).map(Vec::as_slice)
    }

    /// Insert or overwrite the entry for `query`.
    pub fn insert(&mut self, query: impl Into<String>, items: Vec<String>) {
        self.entries.insert(query.into(), items);
    }

    /// Merge another batch of entries; incoming entries win.
    pub fn extend(&mut self, entries: impl IntoIterator<Item = (String, Vec<String>)>) {
        self.entries.extend(entries);
    }

    pub fn contains(&self, query: &str) -> bool {
        self.entries.contains_key(query)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A [`SuggestionCache`] shared across tasks.
#[derive(Debug, Clone, Default)]
pub struct SharedSuggestionCache {
    inner: Arc<RwLock<SuggestionCache>>,
}

impl SharedSuggestionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy of the current cache contents.
    pub fn snapshot(&self) -> SuggestionCache {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl SuggestionStore for SharedSuggestionCache {
    fn lookup(&self, query: &str) -> Option<Vec<String>> {
        let cache = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        cache.get(query).map(<[String]>::to_vec)
    }

    fn store(&self, query: &str, items: Vec<String>) {
        let mut cache = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        cache.insert(query, items);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_exact_match_only() {
        let mut cache = SuggestionCache::new();
        cache.insert("rea", items(&["react", "real madrid"]));

        assert_eq!(cache.get("rea").unwrap(), items(&["react", "real madrid"]).as_slice());
        assert!(cache.get("rea ").is_none());
        assert!(cache.get("Rea").is_none());
    }

    #[test]
    fn test_insert_overwrites() {
        let mut cache = SuggestionCache::new();
        cache.insert("rust", items(&["rust lang"]));
        cache.insert("rust", items(&["rust game", "rust lang"]));

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("rust").unwrap().len(), 2);
    }

    #[test]
    fn test_extend_merges() {
        let mut cache = SuggestionCache::new();
        cache.insert("a", items(&["a1"]));
        cache.extend([("a".to_string(), items(&["a2"])), ("b".to_string(), items(&["b1"]))]);

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get("a").unwrap(), items(&["a2"]).as_slice());
    }

    #[test]
    fn test_shared_cache_roundtrip() {
        let shared = SharedSuggestionCache::new();
        assert!(shared.lookup("lofi").is_none());

        let clone = shared.clone();
        clone.store("lofi", items(&["lofi hip hop"]));

        assert_eq!(shared.lookup("lofi"), Some(items(&["lofi hip hop"])));
        assert_eq!(shared.len(), 1);
        assert!(shared.snapshot().contains("lofi"));
    }

    #[test]
    fn test_serializes_as_plain_map() {
        let mut cache = SuggestionCache::new();
        cache.insert("cat", items(&["cat videos"]));

        let json = serde_json::to_value(&cache).unwrap();
        assert_eq!(json, serde_json::json!({ "cat": ["cat videos"] }));
    }
}

//! Session-scoped caching of search results.
//!
//! Search results are cached per trimmed search term so repeating a search
//! within a session skips the remote call. The backing store is a plain
//! string-keyed, string-valued [`SessionStore`]; entries are overwritten
//! on refetch and live as long as the store does. Payloads are serialized
//! JSON seed arrays and are opaque to the store.

use std::collections::HashMap;

use serde_json::Value;
use tracing::{debug, trace};

/// A string-keyed, string-valued store scoped to the current session.
///
/// Hosts can supply their own implementation to persist results elsewhere;
/// [`MemoryStore`] is the default.
pub trait SessionStore {
    /// Look up a value.
    fn get(&self, key: &str) -> Option<String>;
    /// Insert or overwrite a value.
    fn set(&mut self, key: &str, value: String);
    /// Membership test.
    fn has(&self, key: &str) -> bool;
    /// Drop a value, if present.
    fn remove(&mut self, key: &str);
}

/// In-memory session store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_string(), value);
    }

    fn has(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

/// Cache of search-term → seed-array results.
pub struct SearchCache {
    store: Box<dyn SessionStore + Send>,
    enabled: bool,
}

impl SearchCache {
    /// Create a memory-backed cache.
    ///
    /// A disabled cache never stores and never hits.
    pub fn new(enabled: bool) -> Self {
        Self::with_store(Box::new(MemoryStore::new()), enabled)
    }

    /// Create a cache over a custom store.
    pub fn with_store(store: Box<dyn SessionStore + Send>, enabled: bool) -> Self {
        Self { store, enabled }
    }

    /// Whether caching is enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Look up the seeds cached for a term.
    ///
    /// The term is trimmed before lookup. `None` means "not cached". An
    /// entry that no longer parses as a JSON array is dropped from the
    /// store and treated as a miss.
    pub fn get(&mut self, term: &str) -> Option<Vec<Value>> {
        if !self.enabled {
            return None;
        }
        let key = term.trim();
        let payload = self.store.get(key)?;

        match serde_json::from_str::<Value>(&payload) {
            Ok(Value::Array(seeds)) => {
                trace!(term = key, count = seeds.len(), "search cache hit");
                Some(seeds)
            }
            _ => {
                debug!(term = key, "dropping corrupt cache entry");
                self.store.remove(key);
                None
            }
        }
    }

    /// Cache the seeds for a term, overwriting any previous entry.
    pub fn put(&mut self, term: &str, seeds: &[Value]) {
        if !self.enabled {
            return;
        }
        let key = term.trim();
        if key.is_empty() {
            return;
        }
        let payload = match serde_json::to_string(seeds) {
            Ok(payload) => payload,
            Err(e) => {
                debug!(term = key, error = %e, "failed to serialize search result");
                return;
            }
        };
        trace!(term = key, count = seeds.len(), "search result cached");
        self.store.set(key, payload);
    }

    /// Whether a term has a cached entry.
    pub fn has(&self, term: &str) -> bool {
        self.enabled && self.store.has(term.trim())
    }
}

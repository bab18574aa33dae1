use dashmap::DashMap;
use serde_json::Value;

/// CacheTag
///
/// The closed set of invalidation tags the endpoint layer can bind a cached
/// response to. One tag per upstream resource family; a mutation to a family
/// invalidates every cached read registered under its tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheTag {
    Courses,
    Modules,
    Videos,
    Stats,
    Users,
}

struct CachedEntry {
    value: Value,
    tags: Vec<CacheTag>,
}

/// TagCache
///
/// A request/response cache with invalidation-by-tag as its public contract.
/// It is an explicit object owned by the application state and passed by
/// dependency injection. It is deliberately not a module-level singleton, so tests
/// (and any future second upstream) get their own isolated instance.
///
/// Entries are keyed by the upstream request path and never expire on their
/// own; the only eviction mechanism is tag invalidation. The backing map is
/// a `DashMap`, so all operations are safe under concurrent request handling.
#[derive(Default)]
pub struct TagCache {
    entries: DashMap<String, CachedEntry>,
}

impl TagCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached response body for `key`, if present.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.entries.get(key).map(|entry| entry.value.clone())
    }

    /// Stores a response body under `key`, registered against `tags`.
    /// Re-inserting an existing key replaces both the value and its tags.
    pub fn insert(&self, key: impl Into<String>, value: Value, tags: &[CacheTag]) {
        self.entries.insert(
            key.into(),
            CachedEntry {
                value,
                tags: tags.to_vec(),
            },
        );
    }

    /// Drops every entry registered under `tag` and returns how many were
    /// evicted. Invalidating a tag with no entries is a no-op, which makes
    /// invalidation idempotent.
    pub fn invalidate(&self, tag: CacheTag) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.tags.contains(&tag));
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

//! Time-to-live cache shared by concurrent lookups.
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

/// Cached value with its absolute expiry.
#[derive(Clone, Debug)]
struct CacheEntry<V> {
    /// Stored value.
    value: V,
    /// Instant after which the entry is treated as absent.
    expires_at: Instant,
}

/// What: String-keyed cache whose entries expire after a fixed TTL.
///
/// Details:
/// - Expiry is checked on read; expired entries are never swept.
/// - A read/write lock serializes access (many readers, few writers).
#[derive(Debug)]
pub struct TtlCache<V> {
    /// Lifetime of every entry.
    ttl: Duration,
    /// Entries by key.
    entries: RwLock<HashMap<String, CacheEntry<V>>>,
}

impl<V: Clone> TtlCache<V> {
    /// Create an empty cache.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Entry lifetime.
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// What: Look up a live entry.
    ///
    /// Output:
    /// - `Some(value)` when present and not yet expired; `None` otherwise
    pub fn get(&self, key: &str) -> Option<V> {
        self.get_at(key, Instant::now())
    }

    /// Look up `key` as of `now`.
    pub fn get_at(&self, key: &str, now: Instant) -> Option<V> {
        let entries = self.entries.read().ok()?;
        entries
            .get(key)
            .filter(|e| now < e.expires_at)
            .map(|e| e.value.clone())
    }

    /// Store `value` under `key`, replacing any previous entry.
    pub fn insert(&self, key: impl Into<String>, value: V) {
        self.insert_at(key, value, Instant::now());
    }

    /// Store `value` as if inserted at `now`.
    pub fn insert_at(&self, key: impl Into<String>, value: V, now: Instant) {
        if let Ok(mut entries) = self.entries.write() {
            entries.insert(
                key.into(),
                CacheEntry {
                    value,
                    expires_at: now + self.ttl,
                },
            );
        }
    }

    /// Number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    /// `true` when nothing has been stored.
    pub fn is_empty(&self) -> bool {
        self.entries.read().map(|e| e.is_empty()).unwrap_or(true)
    }
}

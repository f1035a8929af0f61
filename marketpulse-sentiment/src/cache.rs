//! Time-bounded response cache.
//!
//! Keyed, in-process memoization used for both sentiment lookups (key = hash
//! of the normalized text) and headline lookups (key = `market:query`). TTL
//! is enforced on read: an entry older than the TTL is a miss and is dropped,
//! so the next fetch replaces it. Thread-safe via RwLock; a single guard is
//! enough at the write rate of once per unique key per TTL window.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

/// Default TTL for cached responses: 15 minutes.
pub const DEFAULT_TTL: Duration = Duration::from_secs(15 * 60);

/// Default maximum number of entries per cache.
pub const DEFAULT_MAX_SIZE: usize = 1024;

// ============================================================================
// CLOCK
// ============================================================================

/// Time source for cache entries, injectable so tests can drive TTL expiry
/// deterministically.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Wall-clock time source used in production.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

// ============================================================================
// TTL CACHE
// ============================================================================

struct Entry<V> {
    value: V,
    inserted_at: Instant,
}

/// Bounded key-value cache with enforced TTL expiry.
///
/// Explicitly owned and injected where needed - no module-level singleton -
/// so each test can run against a fresh instance.
pub struct TtlCache<V> {
    entries: RwLock<HashMap<String, Entry<V>>>,
    ttl: Duration,
    max_size: usize,
    clock: Arc<dyn Clock>,
}

impl<V: Clone> TtlCache<V> {
    /// Create a cache with the default TTL and capacity.
    pub fn new() -> Self {
        Self::with_settings(DEFAULT_TTL, DEFAULT_MAX_SIZE, Arc::new(SystemClock))
    }

    /// Create a cache with explicit TTL, capacity, and clock.
    pub fn with_settings(ttl: Duration, max_size: usize, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
            max_size: max_size.max(1),
            clock,
        }
    }

    /// Look up a value. Entries older than the TTL are treated as a miss and
    /// removed so the caller's subsequent insert replaces them.
    pub fn get(&self, key: &str) -> Option<V> {
        let now = self.clock.now();

        {
            let entries = self.entries.read().ok()?;
            match entries.get(key) {
                Some(entry) if now.duration_since(entry.inserted_at) < self.ttl => {
                    return Some(entry.value.clone());
                }
                Some(_) => {} // stale, fall through to remove
                None => return None,
            }
        }

        if let Ok(mut entries) = self.entries.write() {
            // Re-check under the write lock; another thread may have refreshed it.
            if let Some(entry) = entries.get(key) {
                if now.duration_since(entry.inserted_at) < self.ttl {
                    return Some(entry.value.clone());
                }
                entries.remove(key);
            }
        }
        None
    }

    /// Insert or refresh a value. When full, stale entries are evicted first,
    /// then the oldest entry.
    pub fn insert(&self, key: impl Into<String>, value: V) {
        let key = key.into();
        let now = self.clock.now();

        let Ok(mut entries) = self.entries.write() else {
            return;
        };

        if entries.len() >= self.max_size && !entries.contains_key(&key) {
            entries.retain(|_, entry| now.duration_since(entry.inserted_at) < self.ttl);

            if entries.len() >= self.max_size {
                let oldest = entries
                    .iter()
                    .min_by_key(|(_, entry)| entry.inserted_at)
                    .map(|(k, _)| k.clone());
                if let Some(oldest) = oldest {
                    entries.remove(&oldest);
                }
            }
        }

        entries.insert(
            key,
            Entry {
                value,
                inserted_at: now,
            },
        );
    }

    /// Remove all entries.
    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.write() {
            entries.clear();
        }
    }

    /// Current number of entries, including any not-yet-collected stale ones.
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<V: Clone> Default for TtlCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> std::fmt::Debug for TtlCache<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TtlCache")
            .field("ttl", &self.ttl)
            .field("max_size", &self.max_size)
            .field(
                "current_size",
                &self.entries.read().map(|e| e.len()).unwrap_or(0),
            )
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod test_clock {
    use super::Clock;
    use std::sync::Mutex;
    use std::time::{Duration, Instant};

    /// Manually advanced clock for deterministic TTL tests.
    pub struct ManualClock {
        now: Mutex<Instant>,
    }

    impl ManualClock {
        pub fn new() -> Self {
            Self {
                now: Mutex::new(Instant::now()),
            }
        }

        pub fn advance(&self, by: Duration) {
            let mut now = self.now.lock().unwrap();
            *now += by;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> Instant {
            *self.now.lock().unwrap()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_clock::ManualClock;
    use super::*;

    fn cache_with_clock(ttl: Duration, max_size: usize) -> (TtlCache<String>, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new());
        let cache = TtlCache::with_settings(ttl, max_size, clock.clone());
        (cache, clock)
    }

    #[test]
    fn test_basic_get_put() {
        let cache: TtlCache<String> = TtlCache::new();
        assert!(cache.is_empty());

        cache.insert("indian:general", "headlines".to_string());
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("indian:general").as_deref(), Some("headlines"));
        assert_eq!(cache.get("us:general"), None);
    }

    #[test]
    fn test_entry_expires_after_ttl() {
        let (cache, clock) = cache_with_clock(Duration::from_secs(900), 16);
        cache.insert("key", "value".to_string());

        clock.advance(Duration::from_secs(899));
        assert!(cache.get("key").is_some());

        clock.advance(Duration::from_secs(2));
        assert_eq!(cache.get("key"), None);
        // The stale entry was dropped, not just hidden.
        assert!(cache.is_empty());
    }

    #[test]
    fn test_insert_refreshes_age() {
        let (cache, clock) = cache_with_clock(Duration::from_secs(100), 16);
        cache.insert("key", "v1".to_string());

        clock.advance(Duration::from_secs(60));
        cache.insert("key", "v2".to_string());

        clock.advance(Duration::from_secs(60));
        // 120s since first insert, 60s since refresh: still fresh.
        assert_eq!(cache.get("key").as_deref(), Some("v2"));
    }

    #[test]
    fn test_full_cache_evicts_stale_first() {
        let (cache, clock) = cache_with_clock(Duration::from_secs(100), 2);
        cache.insert("a", "1".to_string());
        clock.advance(Duration::from_secs(101));
        cache.insert("b", "2".to_string());

        // "a" is stale; inserting a third key evicts it rather than "b".
        cache.insert("c", "3".to_string());
        assert_eq!(cache.get("b").as_deref(), Some("2"));
        assert_eq!(cache.get("c").as_deref(), Some("3"));
        assert_eq!(cache.get("a"), None);
    }

    #[test]
    fn test_full_cache_evicts_oldest_when_none_stale() {
        let (cache, clock) = cache_with_clock(Duration::from_secs(1000), 2);
        cache.insert("a", "1".to_string());
        clock.advance(Duration::from_secs(1));
        cache.insert("b", "2".to_string());
        clock.advance(Duration::from_secs(1));

        cache.insert("c", "3".to_string());
        assert_eq!(cache.get("a"), None);
        assert_eq!(cache.get("b").as_deref(), Some("2"));
        assert_eq!(cache.get("c").as_deref(), Some("3"));
    }

    #[test]
    fn test_clear() {
        let cache: TtlCache<i32> = TtlCache::new();
        cache.insert("a", 1);
        cache.insert("b", 2);
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.get("a"), None);
    }
}

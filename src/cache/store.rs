//! Timed Cache Module
//!
//! Thread-safe cache combining LRU capacity eviction with lazy TTL expiration.

use std::borrow::Borrow;
use std::hash::Hash;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, trace};

use crate::cache::{CacheStats, Clock, Expiring, LruStore, SystemClock};
use crate::error::{CacheError, Result};

// == Timed Cache ==
/// Bounded LRU cache whose entries also expire a fixed time after insertion.
///
/// Expiration is lazy: nothing runs in the background. Single-key lookups
/// check and drop only the key they touch, while every other operation first
/// sweeps stale entries so that capacity and "oldest" decisions only ever see
/// live data. A stale value is never returned.
///
/// The sweep is O(n) in the stored entries. It is skipped while the earliest
/// known expiry is still in the future.
///
/// # Example
/// ```
/// use timedcache::cache::TimedCache;
///
/// let cache = TimedCache::new(2, 300).unwrap();
/// cache.add("a", 1);
/// cache.add("b", 2);
/// assert!(cache.add("c", 3));
/// assert!(!cache.contains("a"));
/// assert_eq!(cache.get("b"), Some(2));
/// ```
pub struct TimedCache<K: Eq + Hash, V> {
    /// All mutable state behind a single lock
    inner: RwLock<Inner<K, V>>,
    /// Time source for stamping and checking expiry
    clock: Arc<dyn Clock>,
}

struct Inner<K: Eq + Hash, V> {
    /// Recency-ordered storage of TTL envelopes
    store: LruStore<K, Expiring<V>>,
    /// Cache-wide TTL in seconds
    ttl: u64,
    /// Lower bound on every stored `expires_at`, None when nothing is stored
    next_expiry: Option<u64>,
    /// Performance statistics
    stats: CacheStats,
}

impl<K, V> TimedCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    // == Constructor ==
    /// Creates a cache holding at most `capacity` entries, each living `ttl_secs`.
    ///
    /// A TTL of zero is allowed; such entries stop being served once the
    /// current second has passed.
    ///
    /// # Errors
    /// Returns `CacheError::InvalidCapacity` when `capacity` is zero.
    pub fn new(capacity: usize, ttl_secs: u64) -> Result<Self> {
        Self::with_clock(capacity, ttl_secs, SystemClock)
    }

    /// Creates a cache that reads time from `clock` instead of the system.
    pub fn with_clock(
        capacity: usize,
        ttl_secs: u64,
        clock: impl Clock + 'static,
    ) -> Result<Self> {
        if capacity == 0 {
            return Err(CacheError::InvalidCapacity(capacity));
        }

        Ok(Self {
            inner: RwLock::new(Inner {
                store: LruStore::new(capacity),
                ttl: ttl_secs,
                next_expiry: None,
                stats: CacheStats::new(),
            }),
            clock: Arc::new(clock),
        })
    }

    // == Add ==
    /// Stores a value, replacing any existing one and restarting its TTL.
    ///
    /// Returns whether a live entry was evicted to make room.
    pub fn add(&self, key: K, value: V) -> bool {
        let now = self.clock.now();
        let mut inner = self.inner.write();
        inner.remove_expired(now);

        let entry = inner.wrap(value, now);
        let evicted = inner.store.add(key, entry);
        if evicted {
            inner.stats.record_eviction();
        }
        evicted
    }

    // == Get ==
    /// Returns the value for `key` and marks it most recently used.
    ///
    /// A stale entry is dropped on the spot and reported as absent.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let now = self.clock.now();
        let mut inner = self.inner.write();
        if !inner.check_live(key, now) {
            return None;
        }
        inner.store.get(key).map(|entry| entry.value.clone())
    }

    // == Peek ==
    /// Returns the value for `key` without touching its recency.
    pub fn peek<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let now = self.clock.now();
        let mut inner = self.inner.write();
        if !inner.check_live(key, now) {
            return None;
        }
        inner.store.peek(key).map(|entry| entry.value.clone())
    }

    // == Contains ==
    /// Checks for a live entry without touching its recency.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let now = self.clock.now();
        self.inner.write().check_live(key, now)
    }

    // == Contains Or Add ==
    /// Stores `value` only if no live entry exists for `key`.
    ///
    /// Returns `(found, evicted)`. A found entry keeps its value, TTL and recency.
    pub fn contains_or_add(&self, key: K, value: V) -> (bool, bool) {
        let now = self.clock.now();
        let mut inner = self.inner.write();
        inner.remove_expired(now);

        let entry = inner.wrap(value, now);
        let (found, evicted) = inner.store.contains_or_add(key, entry);
        if evicted {
            inner.stats.record_eviction();
        }
        (found, evicted)
    }

    // == Peek Or Add ==
    /// Returns the live value for `key`, or stores `value` if there is none.
    ///
    /// Returns `(previous, evicted)`; `previous` is `Some` iff the key was found.
    pub fn peek_or_add(&self, key: K, value: V) -> (Option<V>, bool) {
        let now = self.clock.now();
        let mut inner = self.inner.write();
        inner.remove_expired(now);

        let entry = inner.wrap(value, now);
        let (previous, evicted) = inner.store.peek_or_add(key, entry);
        let previous = previous.map(|entry| entry.value.clone());
        if evicted {
            inner.stats.record_eviction();
        }
        (previous, evicted)
    }

    // == Remove ==
    /// Removes `key`. Returns whether a live entry was present.
    pub fn remove<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let now = self.clock.now();
        let mut inner = self.inner.write();
        inner.remove_expired(now);
        inner.store.remove(key)
    }

    // == Resize ==
    /// Changes the capacity, evicting the oldest live entries when shrinking.
    ///
    /// Returns the number of entries evicted.
    pub fn resize(&self, capacity: usize) -> usize {
        let now = self.clock.now();
        let mut inner = self.inner.write();
        inner.remove_expired(now);

        let evicted = inner.store.resize(capacity);
        if evicted > 0 {
            debug!("Resize to {} evicted {} entries", capacity, evicted);
            inner.stats.record_evictions(evicted as u64);
        }
        evicted
    }

    // == Remove Oldest ==
    /// Removes and returns the least recently used live entry.
    pub fn remove_oldest(&self) -> Option<(K, V)> {
        let now = self.clock.now();
        let mut inner = self.inner.write();
        inner.remove_expired(now);
        inner
            .store
            .remove_oldest()
            .map(|(key, entry)| (key, entry.value))
    }

    // == Get Oldest ==
    /// Returns the least recently used live entry without removing it.
    pub fn get_oldest(&self) -> Option<(K, V)> {
        let now = self.clock.now();
        let mut inner = self.inner.write();
        inner.remove_expired(now);
        inner
            .store
            .get_oldest()
            .map(|(key, entry)| (key.clone(), entry.value.clone()))
    }

    // == Keys ==
    /// Returns the live keys ordered from oldest to newest.
    pub fn keys(&self) -> Vec<K> {
        let now = self.clock.now();
        let mut inner = self.inner.write();
        inner.remove_expired(now);
        inner.store.keys()
    }

    // == Length ==
    /// Returns the number of live entries.
    pub fn len(&self) -> usize {
        let now = self.clock.now();
        let mut inner = self.inner.write();
        inner.remove_expired(now);
        inner.store.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // == TTL ==
    /// Returns the TTL in seconds every entry is stored with.
    pub fn ttl(&self) -> u64 {
        self.inner.read().ttl
    }

    // == Capacity ==
    /// Returns the current maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.inner.read().store.capacity()
    }

    // == Purge ==
    /// Drops every entry.
    pub fn purge(&self) {
        let mut inner = self.inner.write();
        inner.store.purge();
        inner.next_expiry = None;
    }

    // == Stats ==
    /// Returns a snapshot of cache statistics counting only live entries.
    pub fn stats(&self) -> CacheStats {
        let now = self.clock.now();
        let mut inner = self.inner.write();
        inner.remove_expired(now);

        let mut stats = inner.stats.clone();
        stats.set_total_entries(inner.store.len());
        stats
    }
}

impl<K, V> Inner<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Wraps a value in a fresh TTL envelope and keeps the expiry bound current.
    fn wrap(&mut self, value: V, now: u64) -> Expiring<V> {
        let entry = Expiring::new(value, self.ttl, now);
        self.next_expiry = Some(match self.next_expiry {
            Some(bound) => bound.min(entry.expires_at),
            None => entry.expires_at,
        });
        entry
    }

    /// Drops `key` if it is stale. Returns whether a live entry remains.
    ///
    /// Records the lookup as a hit or a miss.
    fn check_live<Q>(&mut self, key: &Q, now: u64) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let expired = match self.store.peek(key) {
            Some(entry) => entry.is_expired_at(now),
            None => {
                self.stats.record_miss();
                return false;
            }
        };

        if expired {
            trace!("Dropping expired entry on lookup");
            self.store.remove(key);
            self.stats.record_expirations(1);
            self.stats.record_miss();
            return false;
        }

        self.stats.record_hit();
        true
    }

    /// Removes every stale entry. Returns the number removed.
    fn remove_expired(&mut self, now: u64) -> usize {
        match self.next_expiry {
            Some(bound) if bound < now => {}
            _ => return 0,
        }

        let expired: Vec<K> = self
            .store
            .iter()
            .filter(|(_, entry)| entry.is_expired_at(now))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            self.store.remove(key);
        }
        self.next_expiry = self.store.iter().map(|(_, entry)| entry.expires_at).min();

        let count = expired.len();
        if count > 0 {
            debug!("Lazy sweep removed {} expired entries", count);
            self.stats.record_expirations(count as u64);
        }
        count
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;
    use std::thread;

    const START: u64 = 1_700_000_000;

    fn cache_with_clock(
        capacity: usize,
        ttl: u64,
    ) -> (TimedCache<&'static str, i32>, ManualClock) {
        let clock = ManualClock::new(START);
        let cache = TimedCache::with_clock(capacity, ttl, clock.clone()).unwrap();
        (cache, clock)
    }

    #[test]
    fn test_new_rejects_zero_capacity() {
        let result = TimedCache::<String, String>::new(0, 10);
        assert!(matches!(result, Err(CacheError::InvalidCapacity(0))));
    }

    #[test]
    fn test_new_accepts_zero_ttl() {
        let cache = TimedCache::<String, String>::new(1, 0).unwrap();
        assert_eq!(cache.ttl(), 0);
        assert_eq!(cache.capacity(), 1);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_add_and_get() {
        let (cache, _) = cache_with_clock(10, 60);

        assert!(!cache.add("key1", 1));
        assert_eq!(cache.get("key1"), Some(1));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_get_nonexistent() {
        let (cache, _) = cache_with_clock(10, 60);
        assert_eq!(cache.get("missing"), None);
        assert_eq!(cache.peek("missing"), None);
        assert!(!cache.contains("missing"));
    }

    #[test]
    fn test_capacity_eviction_scenario() {
        let (cache, clock) = cache_with_clock(2, 5);

        cache.add("a", 1);
        cache.add("b", 2);
        assert_eq!(cache.len(), 2);

        assert!(cache.add("c", 3));
        assert!(!cache.contains("a"));
        assert!(cache.contains("b"));
        assert!(cache.contains("c"));

        clock.advance(6);
        assert_eq!(cache.get("b"), None);
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn test_ttl_boundary() {
        let (cache, clock) = cache_with_clock(10, 5);
        cache.add("key", 7);

        clock.advance(5);
        assert_eq!(cache.peek("key"), Some(7));

        clock.advance(1);
        assert_eq!(cache.peek("key"), None);
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn test_zero_ttl_lives_within_current_second() {
        let (cache, clock) = cache_with_clock(10, 0);
        cache.add("key", 1);
        assert_eq!(cache.get("key"), Some(1));

        clock.advance(1);
        assert_eq!(cache.get("key"), None);
    }

    #[test]
    fn test_add_existing_key_resets_ttl() {
        let (cache, clock) = cache_with_clock(10, 5);
        cache.add("key", 1);

        clock.advance(4);
        assert!(!cache.add("key", 2));

        clock.advance(4);
        assert_eq!(cache.get("key"), Some(2));

        clock.advance(2);
        assert_eq!(cache.get("key"), None);
    }

    #[test]
    fn test_get_refreshes_recency() {
        let (cache, _) = cache_with_clock(3, 60);
        cache.add("a", 1);
        cache.add("b", 2);
        cache.add("c", 3);

        cache.get("a");
        assert!(cache.add("d", 4));

        assert!(cache.contains("a"));
        assert!(!cache.contains("b"));
    }

    #[test]
    fn test_peek_does_not_refresh_recency() {
        let (cache, _) = cache_with_clock(3, 60);
        cache.add("a", 1);
        cache.add("b", 2);
        cache.add("c", 3);

        assert_eq!(cache.peek("a"), Some(1));
        assert!(cache.contains("a"));
        assert!(cache.add("d", 4));

        assert!(!cache.contains("a"));
        assert_eq!(cache.keys(), vec!["b", "c", "d"]);
    }

    #[test]
    fn test_expired_entries_do_not_cause_eviction() {
        let (cache, clock) = cache_with_clock(2, 5);
        cache.add("old", 1);

        clock.advance(3);
        cache.add("fresh", 2);

        // "old" is stale now, so adding a third key needs no eviction
        clock.advance(3);
        assert!(!cache.add("new", 3));
        assert_eq!(cache.keys(), vec!["fresh", "new"]);
        assert_eq!(cache.stats().evictions, 0);
    }

    #[test]
    fn test_contains_or_add() {
        let (cache, _) = cache_with_clock(2, 60);
        cache.add("a", 1);

        assert_eq!(cache.contains_or_add("a", 99), (true, false));
        assert_eq!(cache.get("a"), Some(1));

        assert_eq!(cache.contains_or_add("b", 2), (false, false));
        assert_eq!(cache.contains_or_add("c", 3), (false, true));
        assert!(!cache.contains("a"));
    }

    #[test]
    fn test_contains_or_add_replaces_stale_entry() {
        let (cache, clock) = cache_with_clock(2, 5);
        cache.add("a", 1);

        clock.advance(6);
        assert_eq!(cache.contains_or_add("a", 2), (false, false));
        assert_eq!(cache.get("a"), Some(2));
    }

    #[test]
    fn test_peek_or_add() {
        let (cache, clock) = cache_with_clock(2, 5);
        cache.add("a", 1);

        assert_eq!(cache.peek_or_add("a", 99), (Some(1), false));
        assert_eq!(cache.peek_or_add("b", 2), (None, false));
        assert_eq!(cache.peek_or_add("c", 3), (None, true));

        clock.advance(6);
        assert_eq!(cache.peek_or_add("b", 20), (None, false));
        assert_eq!(cache.peek("b"), Some(20));
    }

    #[test]
    fn test_remove_is_idempotent() {
        let (cache, _) = cache_with_clock(2, 60);
        cache.add("a", 1);

        assert!(cache.remove("a"));
        assert!(!cache.remove("a"));
        assert!(!cache.remove("never"));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_remove_expired_key_reports_absent() {
        let (cache, clock) = cache_with_clock(2, 5);
        cache.add("a", 1);

        clock.advance(6);
        assert!(!cache.remove("a"));
    }

    #[test]
    fn test_resize() {
        let (cache, _) = cache_with_clock(4, 60);
        for (key, value) in [("a", 1), ("b", 2), ("c", 3), ("d", 4)] {
            cache.add(key, value);
        }

        assert_eq!(cache.resize(6), 0);
        assert_eq!(cache.resize(2), 2);
        assert_eq!(cache.keys(), vec!["c", "d"]);
        assert_eq!(cache.capacity(), 2);
        assert_eq!(cache.stats().evictions, 2);
    }

    #[test]
    fn test_resize_only_counts_live_entries() {
        let (cache, clock) = cache_with_clock(4, 5);
        cache.add("a", 1);
        cache.add("b", 2);
        clock.advance(3);
        cache.add("c", 3);
        clock.advance(3);

        // a and b are stale; only c is live
        assert_eq!(cache.resize(1), 0);
        assert_eq!(cache.keys(), vec!["c"]);
    }

    #[test]
    fn test_oldest_operations() {
        let (cache, clock) = cache_with_clock(3, 5);
        assert_eq!(cache.get_oldest(), None);
        assert_eq!(cache.remove_oldest(), None);

        cache.add("a", 1);
        clock.advance(3);
        cache.add("b", 2);
        cache.add("c", 3);

        assert_eq!(cache.get_oldest(), Some(("a", 1)));
        clock.advance(3);

        // "a" expired; "b" is now the oldest live entry
        assert_eq!(cache.get_oldest(), Some(("b", 2)));
        assert_eq!(cache.remove_oldest(), Some(("b", 2)));
        assert_eq!(cache.keys(), vec!["c"]);
    }

    #[test]
    fn test_purge() {
        let (cache, _) = cache_with_clock(3, 60);
        cache.add("a", 1);
        cache.add("b", 2);

        cache.purge();

        assert!(cache.is_empty());
        assert_eq!(cache.get("a"), None);
        assert_eq!(cache.capacity(), 3);
    }

    #[test]
    fn test_stats() {
        let (cache, clock) = cache_with_clock(1, 5);
        cache.add("a", 1);
        cache.get("a"); // hit
        cache.get("zzz"); // miss
        cache.add("b", 2); // eviction

        clock.advance(6);
        cache.get("b"); // expired, miss

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 2);
        assert_eq!(stats.evictions, 1);
        assert_eq!(stats.expirations, 1);
        assert_eq!(stats.total_entries, 0);
    }

    #[test]
    fn test_concurrent_adds_respect_capacity() {
        let cache = Arc::new(TimedCache::<String, usize>::new(16, 60).unwrap());

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    for i in 0..100 {
                        cache.add(format!("{}-{}", t, i), i);
                        cache.get(&format!("{}-{}", t, i / 2));
                        assert!(cache.len() <= 16);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(cache.len(), 16);
    }
}

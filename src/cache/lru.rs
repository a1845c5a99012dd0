//! LRU Store Module
//!
//! Fixed-capacity key-value storage ordered by recency of use.

use std::borrow::Borrow;
use std::hash::Hash;

use hashlink::LruCache;

// == LRU Store ==
/// Capacity-bounded map that evicts its least recently used entry.
///
/// Entries live in a linked hash map where:
/// - Front = Least recently used
/// - Back = Most recently used
///
/// Insert, lookup and removal are O(1). The store enforces its own capacity
/// so that every eviction can be reported back to the caller.
pub struct LruStore<K: Eq + Hash, V> {
    /// Entries in recency order
    entries: LruCache<K, V>,
    /// Maximum number of entries allowed
    capacity: usize,
}

impl<K: Eq + Hash, V> LruStore<K, V> {
    // == Constructor ==
    /// Creates an empty store that holds at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: LruCache::new_unbounded(),
            capacity,
        }
    }

    // == Add ==
    /// Inserts or replaces an entry and marks it most recently used.
    ///
    /// A new key that pushes the store over capacity evicts the least
    /// recently used entry. Returns whether an eviction occurred.
    pub fn add(&mut self, key: K, value: V) -> bool {
        if self.entries.insert(key, value).is_some() {
            return false;
        }
        let mut evicted = false;
        while self.entries.len() > self.capacity {
            if self.entries.remove_lru().is_none() {
                break;
            }
            evicted = true;
        }
        evicted
    }

    // == Get ==
    /// Looks up a key and marks it most recently used.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.get(key)
    }

    // == Peek ==
    /// Looks up a key without touching its recency.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.peek(key)
    }

    // == Contains ==
    /// Checks for a key without touching its recency.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.peek(key).is_some()
    }

    // == Contains Or Add ==
    /// Inserts `value` only if `key` is absent.
    ///
    /// Returns `(found, evicted)`. An existing entry keeps its value and
    /// its place in the recency order.
    pub fn contains_or_add(&mut self, key: K, value: V) -> (bool, bool) {
        if self.entries.peek(&key).is_some() {
            return (true, false);
        }
        (false, self.add(key, value))
    }

    // == Peek Or Add ==
    /// Returns the existing value for `key`, or inserts `value` if absent.
    ///
    /// Returns `(previous, evicted)` where `previous` is `Some` iff the key
    /// was already present.
    pub fn peek_or_add(&mut self, key: K, value: V) -> (Option<&V>, bool) {
        if self.entries.peek(&key).is_some() {
            return (self.entries.peek(&key), false);
        }
        let evicted = self.add(key, value);
        (None, evicted)
    }

    // == Remove ==
    /// Removes a key. Returns whether it was present.
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.remove(key).is_some()
    }

    // == Remove Oldest ==
    /// Removes and returns the least recently used entry.
    pub fn remove_oldest(&mut self) -> Option<(K, V)> {
        self.entries.remove_lru()
    }

    // == Get Oldest ==
    /// Returns the least recently used entry without removing or touching it.
    pub fn get_oldest(&self) -> Option<(&K, &V)> {
        self.entries.iter().next()
    }

    // == Iterate ==
    /// Iterates over entries from oldest to newest without touching recency.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter()
    }

    // == Keys ==
    /// Returns all keys ordered from oldest to newest.
    pub fn keys(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.entries.iter().map(|(key, _)| key.clone()).collect()
    }

    // == Resize ==
    /// Changes the capacity, evicting oldest entries when shrinking.
    ///
    /// Returns the number of entries evicted.
    pub fn resize(&mut self, capacity: usize) -> usize {
        let mut evicted = 0;
        while self.entries.len() > capacity {
            if self.entries.remove_lru().is_none() {
                break;
            }
            evicted += 1;
        }
        self.capacity = capacity;
        evicted
    }

    // == Purge ==
    /// Removes every entry, keeping the capacity.
    pub fn purge(&mut self) {
        self.entries.clear();
    }

    // == Capacity ==
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    // == Length ==
    /// Returns the number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

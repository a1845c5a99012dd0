//! Cache Entry Module
//!
//! Defines the TTL envelope stored around every cached value.

// == Expiring Entry ==
/// A stored value paired with the absolute time it stops being served.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expiring<V> {
    /// The stored value
    pub value: V,
    /// Expiration timestamp (Unix seconds)
    pub expires_at: u64,
}

impl<V> Expiring<V> {
    // == Constructor ==
    /// Wraps `value` so that it expires `ttl_secs` after `now`.
    ///
    /// # Arguments
    /// * `value` - The value to store
    /// * `ttl_secs` - Cache-wide TTL in seconds
    /// * `now` - Current Unix timestamp in seconds
    pub fn new(value: V, ttl_secs: u64, now: u64) -> Self {
        Self {
            value,
            expires_at: expiry_time(now, ttl_secs),
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired at time `now`.
    ///
    /// Boundary condition: an entry stamped `expires_at == now` is still live;
    /// it only becomes stale once the clock has moved strictly past it. With a
    /// TTL of zero this means the entry survives until the current second ends.
    pub fn is_expired_at(&self, now: u64) -> bool {
        self.expires_at < now
    }
}

// == Utility Functions ==
/// Computes the absolute expiry for an entry inserted at `now`.
pub fn expiry_time(now: u64, ttl_secs: u64) -> u64 {
    now.saturating_add(ttl_secs)
}

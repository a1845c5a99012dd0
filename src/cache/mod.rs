//! Cache Module
//!
//! Provides a bounded in-memory cache with LRU eviction and lazy TTL expiration.

mod clock;
mod entry;
mod lru;
mod stats;
mod store;


// Re-export public types
pub use clock::{current_timestamp_secs, Clock, ManualClock, SystemClock};
pub use entry::{expiry_time, Expiring};
pub use lru::LruStore;
pub use stats::CacheStats;
pub use store::TimedCache;

// == Public Constants ==
/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;

/// Maximum allowed value size in bytes
pub const MAX_VALUE_SIZE: usize = 1024 * 1024; // 1 MB

//! Response DTOs for the cache server API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::CacheStats;

/// Response body for a lookup (GET /entries/:key, GET /entries/:key/peek, /oldest)
#[derive(Debug, Clone, Serialize)]
pub struct GetResponse {
    /// The requested key
    pub key: String,
    /// The stored value
    pub value: String,
}

impl GetResponse {
    /// Creates a new GetResponse
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Response body for storing an entry (PUT /entries)
#[derive(Debug, Clone, Serialize)]
pub struct AddResponse {
    /// The key that was stored
    pub key: String,
    /// Whether another entry was evicted to make room
    pub evicted: bool,
}

impl AddResponse {
    pub fn new(key: impl Into<String>, evicted: bool) -> Self {
        Self {
            key: key.into(),
            evicted,
        }
    }
}

/// Response body for a conditional store (PUT /entries/if-absent)
#[derive(Debug, Clone, Serialize)]
pub struct PeekOrAddResponse {
    /// The requested key
    pub key: String,
    /// Whether a live entry already existed
    pub found: bool,
    /// Whether another entry was evicted to make room
    pub evicted: bool,
    /// The existing value when `found` is true
    pub previous: Option<String>,
}

impl PeekOrAddResponse {
    pub fn new(key: impl Into<String>, previous: Option<String>, evicted: bool) -> Self {
        Self {
            key: key.into(),
            found: previous.is_some(),
            evicted,
            previous,
        }
    }
}

/// Response body for the DELETE operation (DELETE /entries/:key)
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    /// Success message
    pub message: String,
    /// The key that was deleted
    pub key: String,
}

impl DeleteResponse {
    /// Creates a new DeleteResponse
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' deleted successfully", key),
            key,
        }
    }
}

/// Response body for listing keys (GET /keys)
#[derive(Debug, Clone, Serialize)]
pub struct KeysResponse {
    /// Live keys, oldest first
    pub keys: Vec<String>,
    /// Number of keys returned
    pub count: usize,
}

impl KeysResponse {
    pub fn new(keys: Vec<String>) -> Self {
        Self {
            count: keys.len(),
            keys,
        }
    }
}

/// Response body for changing capacity (PUT /capacity)
#[derive(Debug, Clone, Serialize)]
pub struct ResizeResponse {
    /// The new capacity
    pub capacity: usize,
    /// Number of entries evicted by the shrink
    pub evicted: usize,
}

/// Response body for clearing the cache (DELETE /entries)
#[derive(Debug, Clone, Serialize)]
pub struct PurgeResponse {
    pub message: String,
}

impl PurgeResponse {
    pub fn purged() -> Self {
        Self {
            message: "Cache purged".to_string(),
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
    /// Number of capacity evictions
    pub evictions: u64,
    /// Number of entries dropped after their TTL passed
    pub expirations: u64,
    /// Current number of live entries in cache
    pub total_entries: usize,
    /// Maximum number of entries
    pub capacity: usize,
    /// Entry TTL in seconds
    pub ttl: u64,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl StatsResponse {
    /// Creates a new StatsResponse from cache statistics
    pub fn new(stats: &CacheStats, capacity: usize, ttl: u64) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            expirations: stats.expirations,
            total_entries: stats.total_entries,
            capacity,
            ttl,
            hit_rate: stats.hit_rate(),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

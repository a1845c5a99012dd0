//! Timed Cache - A bounded in-memory cache with lazy expiration
//!
//! Combines least-recently-used capacity eviction with a cache-wide TTL.
//! Stale entries are dropped when touched or swept by the next mutating call;
//! there is no background expiration task.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;

pub use api::AppState;
pub use cache::TimedCache;
pub use config::Config;
pub use error::{CacheError, Result};

//! API Handlers
//!
//! HTTP request handlers for each cache server endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::cache::TimedCache;
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{
    AddResponse, DeleteResponse, GetResponse, HealthResponse, KeysResponse, PeekOrAddResponse,
    PurgeResponse, ResizeRequest, ResizeResponse, SetRequest, StatsResponse,
};

/// Cache type served over HTTP.
pub type SharedCache = TimedCache<String, String>;

/// Application state shared across all handlers.
///
/// The cache synchronizes internally, so handlers only share an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<SharedCache>,
}

impl AppState {
    /// Creates a new AppState around an existing cache.
    pub fn new(cache: SharedCache) -> Self {
        Self {
            cache: Arc::new(cache),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Fails when the configured capacity is zero.
    pub fn from_config(config: &Config) -> Result<Self> {
        let cache = TimedCache::new(config.capacity, config.ttl)?;
        Ok(Self::new(cache))
    }
}

fn validated(req: &SetRequest) -> Result<()> {
    match req.validate() {
        Some(error_msg) => Err(CacheError::InvalidRequest(error_msg)),
        None => Ok(()),
    }
}

/// Handler for PUT /entries
///
/// Stores a key-value pair, restarting its TTL.
pub async fn add_handler(
    State(state): State<AppState>,
    Json(req): Json<SetRequest>,
) -> Result<Json<AddResponse>> {
    validated(&req)?;

    let evicted = state.cache.add(req.key.clone(), req.value);
    Ok(Json(AddResponse::new(req.key, evicted)))
}

/// Handler for PUT /entries/if-absent
///
/// Stores the value only if no live entry exists, returning the existing one otherwise.
pub async fn peek_or_add_handler(
    State(state): State<AppState>,
    Json(req): Json<SetRequest>,
) -> Result<Json<PeekOrAddResponse>> {
    validated(&req)?;

    let (previous, evicted) = state.cache.peek_or_add(req.key.clone(), req.value);
    Ok(Json(PeekOrAddResponse::new(req.key, previous, evicted)))
}

/// Handler for GET /entries/:key
///
/// Retrieves a value and marks it most recently used.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    match state.cache.get(&key) {
        Some(value) => Ok(Json(GetResponse::new(key, value))),
        None => Err(CacheError::NotFound(key)),
    }
}

/// Handler for GET /entries/:key/peek
///
/// Retrieves a value without changing its eviction order.
pub async fn peek_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    match state.cache.peek(&key) {
        Some(value) => Ok(Json(GetResponse::new(key, value))),
        None => Err(CacheError::NotFound(key)),
    }
}

/// Handler for DELETE /entries/:key
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<DeleteResponse>> {
    if state.cache.remove(&key) {
        Ok(Json(DeleteResponse::new(key)))
    } else {
        Err(CacheError::NotFound(key))
    }
}

/// Handler for DELETE /entries
pub async fn purge_handler(State(state): State<AppState>) -> Json<PurgeResponse> {
    state.cache.purge();
    Json(PurgeResponse::purged())
}

/// Handler for GET /keys
///
/// Lists live keys from least to most recently used.
pub async fn keys_handler(State(state): State<AppState>) -> Json<KeysResponse> {
    Json(KeysResponse::new(state.cache.keys()))
}

/// Handler for GET /oldest
pub async fn get_oldest_handler(State(state): State<AppState>) -> Result<Json<GetResponse>> {
    state
        .cache
        .get_oldest()
        .map(|(key, value)| Json(GetResponse::new(key, value)))
        .ok_or_else(|| CacheError::NotFound("oldest entry".to_string()))
}

/// Handler for DELETE /oldest
pub async fn remove_oldest_handler(State(state): State<AppState>) -> Result<Json<GetResponse>> {
    state
        .cache
        .remove_oldest()
        .map(|(key, value)| Json(GetResponse::new(key, value)))
        .ok_or_else(|| CacheError::NotFound("oldest entry".to_string()))
}

/// Handler for PUT /capacity
///
/// Shrinking evicts the least recently used entries.
pub async fn resize_handler(
    State(state): State<AppState>,
    Json(req): Json<ResizeRequest>,
) -> Result<Json<ResizeResponse>> {
    if req.capacity == 0 {
        return Err(CacheError::InvalidCapacity(req.capacity));
    }

    let evicted = state.cache.resize(req.capacity);
    Ok(Json(ResizeResponse {
        capacity: req.capacity,
        evicted,
    }))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.cache.stats();
    Json(StatsResponse::new(
        &stats,
        state.cache.capacity(),
        state.cache.ttl(),
    ))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

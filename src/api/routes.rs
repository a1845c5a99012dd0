//! API Routes
//!
//! Configures the Axum router with all cache server endpoints.

use axum::{
    routing::{get, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    add_handler, delete_handler, get_handler, get_oldest_handler, health_handler, keys_handler,
    peek_handler, peek_or_add_handler, purge_handler, remove_oldest_handler, resize_handler,
    stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `PUT /entries` / `DELETE /entries` - Store an entry / purge the cache
/// - `PUT /entries/if-absent` - Store an entry only if absent
/// - `GET /entries/:key` / `DELETE /entries/:key` - Get (touching recency) / remove
/// - `GET /entries/:key/peek` - Get without touching recency
/// - `GET /keys` - Live keys, oldest first
/// - `GET /oldest` / `DELETE /oldest` - Inspect / evict the oldest entry
/// - `PUT /capacity` - Resize the cache
/// - `GET /stats` - Cache statistics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/entries", put(add_handler).delete(purge_handler))
        .route("/entries/if-absent", put(peek_or_add_handler))
        .route("/entries/:key", get(get_handler).delete(delete_handler))
        .route("/entries/:key/peek", get(peek_handler))
        .route("/keys", get(keys_handler))
        .route("/oldest", get(get_oldest_handler).delete(remove_oldest_handler))
        .route("/capacity", put(resize_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

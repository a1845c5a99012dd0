//! API Module
//!
//! HTTP handlers and routing exposing the cache over a REST API.
//!
//! # Endpoints
//! - `PUT /entries`, `PUT /entries/if-absent` - Store a key-value pair
//! - `GET /entries/:key`, `GET /entries/:key/peek` - Retrieve a value
//! - `DELETE /entries/:key`, `DELETE /entries` - Remove one key / purge
//! - `GET /keys`, `GET /oldest`, `DELETE /oldest` - Recency inspection
//! - `PUT /capacity` - Resize
//! - `GET /stats`, `GET /health`

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;

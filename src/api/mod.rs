//! API Module
//!
//! HTTP handlers and routing for the operational surface over the caches.
//!
//! # Endpoints
//! - `GET /autocomplete/:kind` - Prefix suggestions
//! - `POST /vocabulary/products` - Add observed product names
//! - `POST /vocabulary/flush` - Persist the vocabulary
//! - `POST /invalidate` - Invalidate cached entries
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;

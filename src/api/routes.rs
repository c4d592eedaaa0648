//! API Routes
//!
//! Configures the Axum router with all operational endpoints.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    add_products_handler, autocomplete_handler, flush_handler, health_handler,
    invalidate_handler, stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /autocomplete/:kind` - Prefix suggestions for products, brands or flavors
/// - `POST /vocabulary/products` - Record names of newly observed products
/// - `POST /vocabulary/flush` - Persist the vocabulary now
/// - `POST /invalidate` - Drop cached entries by scope or key prefix
/// - `GET /stats` - Cache and vocabulary statistics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/autocomplete/:kind", get(autocomplete_handler))
        .route("/vocabulary/products", post(add_products_handler))
        .route("/vocabulary/flush", post(flush_handler))
        .route("/invalidate", post(invalidate_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

//! API Handlers
//!
//! HTTP request handlers for each operational endpoint.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::Value;
use tracing::{info, warn};

use crate::cache::SharedCache;
use crate::config::Config;
use crate::domain::{
    InMemoryRoleStore, LeaderboardCache, ProductListCache, RoleCache, CACHEABLE_PAGES,
};
use crate::error::{CacheError, Result};
use crate::models::{
    AutocompleteParams, AutocompleteResponse, FlushResponse, HealthResponse, InvalidateRequest,
    InvalidateResponse, StatsResponse, VocabularyUpdateResponse,
};
use crate::trie::{ProductNames, SharedVocabulary, Vocabulary, VocabularyKind};

/// Application state shared across all handlers.
///
/// Every field is a cheap clone of a handle created once in `main`.
///
/// No route here reads or fills `products` or `leaderboard`; this server
/// only invalidates and reports on them. They are public so a host service
/// that merges its catalog routes into [`create_router`](crate::api::create_router)
/// can read and fill the same caches through this state.
#[derive(Clone)]
pub struct AppState {
    pub products: ProductListCache<Value>,
    pub leaderboard: LeaderboardCache<Value>,
    pub roles: RoleCache<InMemoryRoleStore>,
    pub vocabulary: SharedVocabulary,
}

impl AppState {
    pub fn new(
        products: ProductListCache<Value>,
        leaderboard: LeaderboardCache<Value>,
        roles: RoleCache<InMemoryRoleStore>,
        vocabulary: Vocabulary,
    ) -> Self {
        Self {
            products,
            leaderboard,
            roles,
            vocabulary: SharedVocabulary::new(vocabulary),
        }
    }

    /// Builds empty caches sized and timed from `config`.
    pub fn from_config(config: &Config, vocabulary: Vocabulary) -> Self {
        let ttl = config.default_ttl();
        let products = ProductListCache::with_policy(
            SharedCache::new(config.max_entries, ttl),
            CACHEABLE_PAGES,
            ttl,
        );
        Self::new(
            products,
            LeaderboardCache::new(),
            RoleCache::new(InMemoryRoleStore::new()),
            vocabulary,
        )
    }

    /// Swaps in a role cache, e.g. one built with a seeder.
    pub fn with_role_cache(mut self, roles: RoleCache<InMemoryRoleStore>) -> Self {
        self.roles = roles;
        self
    }
}

/// Handler for GET /autocomplete/:kind
pub async fn autocomplete_handler(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Query(params): Query<AutocompleteParams>,
) -> Result<Json<AutocompleteResponse>> {
    let kind: VocabularyKind = kind.parse()?;
    let limit = params.effective_limit();

    let suggestions = state.vocabulary.search(kind, &params.q, limit).await;

    Ok(Json(AutocompleteResponse {
        kind,
        query: params.q,
        suggestions,
    }))
}

/// Handler for POST /vocabulary/products
///
/// Records the names of newly observed products. Nothing is written to disk
/// until the next flush.
pub async fn add_products_handler(
    State(state): State<AppState>,
    Json(products): Json<Vec<ProductNames>>,
) -> Json<VocabularyUpdateResponse> {
    let added = state.vocabulary.batch_update(&products).await;

    Json(VocabularyUpdateResponse {
        products: products.len(),
        added,
    })
}

/// Handler for POST /vocabulary/flush
///
/// Saves unconditionally; an I/O failure surfaces as a 500. Autocomplete
/// keeps answering while the files are written.
pub async fn flush_handler(State(state): State<AppState>) -> Result<Json<FlushResponse>> {
    state.vocabulary.save().await?;

    Ok(Json(FlushResponse {
        saved: true,
        file_updates: state.vocabulary.stats().await.file_updates,
    }))
}

/// Handler for POST /invalidate
pub async fn invalidate_handler(
    State(state): State<AppState>,
    Json(req): Json<InvalidateRequest>,
) -> Result<Json<InvalidateResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let scope = req.scope.trim();
    let removed = match scope {
        "products" => state.products.invalidate_all().await,
        "leaderboard" => state.leaderboard.invalidate().await as usize,
        "roles" => invalidate_roles(&state).await,
        "all" => {
            state.products.invalidate_all().await
                + state.leaderboard.invalidate().await as usize
                + invalidate_roles(&state).await
        }
        prefix => state.products.invalidate(prefix).await,
    };

    info!(scope, removed, "invalidation requested");
    Ok(Json(InvalidateResponse::new(scope, removed)))
}

/// Drops the role set and, when a seeder is configured, refills it right
/// away. A failed refill is retried by the next role lookup.
async fn invalidate_roles(state: &AppState) -> usize {
    let removed = state.roles.invalidate();
    if let Err(e) = state.roles.reload().await {
        warn!(error = %e, "role reload after invalidation failed");
    }
    removed
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let product_lists = state.products.stats().await;
    let leaderboard = state.leaderboard.stats().await;
    let vocabulary = state.vocabulary.stats().await;

    Json(StatsResponse {
        product_lists,
        leaderboard,
        roles: state.roles.len(),
        vocabulary,
    })
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

//! Response DTOs for the operational API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::CacheStats;
use crate::trie::{VocabularyKind, VocabularyStats};

/// Response body for `GET /autocomplete/:kind`
#[derive(Debug, Clone, Serialize)]
pub struct AutocompleteResponse {
    pub kind: VocabularyKind,
    /// The prefix as received
    pub query: String,
    pub suggestions: Vec<String>,
}

/// Response body for `POST /invalidate`
#[derive(Debug, Clone, Serialize)]
pub struct InvalidateResponse {
    pub scope: String,
    /// Number of cached entries dropped
    pub removed: usize,
}

impl InvalidateResponse {
    pub fn new(scope: impl Into<String>, removed: usize) -> Self {
        Self {
            scope: scope.into(),
            removed,
        }
    }
}

/// Response body for `POST /vocabulary/products`
#[derive(Debug, Clone, Serialize)]
pub struct VocabularyUpdateResponse {
    pub products: usize,
    /// Names that were not already known
    pub added: usize,
}

/// Response body for `POST /vocabulary/flush`
#[derive(Debug, Clone, Serialize)]
pub struct FlushResponse {
    pub saved: bool,
    pub file_updates: u64,
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub product_lists: CacheStats,
    pub leaderboard: CacheStats,
    /// Number of users with a cached privileged role
    pub roles: usize,
    pub vocabulary: VocabularyStats,
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
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

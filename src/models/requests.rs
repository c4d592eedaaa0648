//! Request DTOs for the operational API
//!
//! Defines incoming query strings and JSON bodies.

use serde::Deserialize;

/// Suggestions returned when `limit` is omitted.
pub const DEFAULT_SUGGESTION_LIMIT: usize = 10;

/// Upper bound on suggestions per request.
pub const MAX_SUGGESTION_LIMIT: usize = 50;

/// Query string for `GET /autocomplete/:kind`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AutocompleteParams {
    /// Prefix typed so far
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub limit: Option<usize>,
}

impl AutocompleteParams {
    /// Requested limit clamped to `1..=MAX_SUGGESTION_LIMIT`.
    pub fn effective_limit(&self) -> usize {
        self.limit
            .unwrap_or(DEFAULT_SUGGESTION_LIMIT)
            .clamp(1, MAX_SUGGESTION_LIMIT)
    }
}

/// Request body for `POST /invalidate`
///
/// `scope` names a whole cache (`products`, `leaderboard`, `roles`, `all`) or
/// is treated as a key prefix on the product-list cache.
#[derive(Debug, Clone, Deserialize)]
pub struct InvalidateRequest {
    pub scope: String,
}

impl InvalidateRequest {
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.scope.trim().is_empty() {
            return Some("Scope cannot be empty".to_string());
        }
        if self.scope.len() > 512 {
            return Some("Scope exceeds maximum length of 512 characters".to_string());
        }
        None
    }
}

//! Request and Response models for the operational API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

pub use requests::{
    AutocompleteParams, InvalidateRequest, DEFAULT_SUGGESTION_LIMIT, MAX_SUGGESTION_LIMIT,
};
pub use responses::{
    AutocompleteResponse, ErrorResponse, FlushResponse, HealthResponse, InvalidateResponse,
    StatsResponse, VocabularyUpdateResponse,
};

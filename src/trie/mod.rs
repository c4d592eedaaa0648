//! Autocomplete Module
//!
//! Prefix indexes for product, brand and flavor names, seeded from a static
//! list or a persisted snapshot and flushed back to disk on demand.

mod index;
mod persist;
mod seed;
mod shared;
mod vocabulary;

pub use index::PrefixIndex;
pub use persist::VocabularyStore;
pub use seed::{BRAND_SEED, FLAVOR_SEED, PRODUCT_SEED};
pub use shared::SharedVocabulary;
pub use vocabulary::{
    ProductNames, Vocabulary, VocabularyKind, VocabularySnapshot, VocabularyStats,
};

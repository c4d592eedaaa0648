//! Autocomplete vocabulary over product, brand and flavor names.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{CacheError, Result};
use crate::trie::index::PrefixIndex;
use crate::trie::persist::VocabularyStore;
use crate::trie::seed::{BRAND_SEED, FLAVOR_SEED, PRODUCT_SEED};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VocabularyKind {
    Products,
    Brands,
    Flavors,
}

impl VocabularyKind {
    pub const ALL: [VocabularyKind; 3] = [
        VocabularyKind::Products,
        VocabularyKind::Brands,
        VocabularyKind::Flavors,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VocabularyKind::Products => "products",
            VocabularyKind::Brands => "brands",
            VocabularyKind::Flavors => "flavors",
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            VocabularyKind::Products => "products.json",
            VocabularyKind::Brands => "brands.json",
            VocabularyKind::Flavors => "flavors.json",
        }
    }

    fn seed(&self) -> &'static [&'static str] {
        match self {
            VocabularyKind::Products => PRODUCT_SEED,
            VocabularyKind::Brands => BRAND_SEED,
            VocabularyKind::Flavors => FLAVOR_SEED,
        }
    }
}

impl fmt::Display for VocabularyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VocabularyKind {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "products" => Ok(VocabularyKind::Products),
            "brands" => Ok(VocabularyKind::Brands),
            "flavors" => Ok(VocabularyKind::Flavors),
            other => Err(CacheError::InvalidRequest(format!(
                "unknown vocabulary kind '{}'",
                other
            ))),
        }
    }
}

/// Names observed on a single product. Blank fields are skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductNames {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub flavor: String,
}

impl ProductNames {
    pub fn new(
        name: impl Into<String>,
        brand: impl Into<String>,
        flavor: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            brand: brand.into(),
            flavor: flavor.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct VocabularyStats {
    pub products: usize,
    pub brands: usize,
    pub flavors: usize,
    pub products_added: u64,
    pub brands_added: u64,
    pub flavors_added: u64,
    pub file_updates: u64,
    pub dirty: bool,
}

#[derive(Debug, Default, Clone, Copy)]
struct Added {
    products: u64,
    brands: u64,
    flavors: u64,
}

impl Added {
    fn bump(&mut self, kind: VocabularyKind) {
        match kind {
            VocabularyKind::Products => self.products += 1,
            VocabularyKind::Brands => self.brands += 1,
            VocabularyKind::Flavors => self.flavors += 1,
        }
    }
}

// == Snapshot ==
/// Word lists copied out of a [`Vocabulary`] so they can be written without
/// holding any lock on it.
#[derive(Debug, Clone)]
pub struct VocabularySnapshot {
    generation: u64,
    store: VocabularyStore,
    words: Vec<(VocabularyKind, Vec<String>)>,
}

impl VocabularySnapshot {
    /// Mutation count the snapshot reflects. Pass it to
    /// [`Vocabulary::mark_saved`] once written.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn words(&self, kind: VocabularyKind) -> &[String] {
        self.words
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, words)| words.as_slice())
            .unwrap_or_default()
    }

    /// Writes every kind to the store.
    pub async fn write(&self) -> Result<()> {
        for (kind, words) in &self.words {
            self.store.save(*kind, words).await?;
        }
        Ok(())
    }
}

// == Vocabulary ==
/// Three prefix indexes plus the store they are flushed to.
///
/// Every mutation bumps `generation`; the vocabulary is dirty while that
/// differs from the generation last written. Nothing touches disk until
/// [`Vocabulary::save`] or a [`SharedVocabulary`](crate::trie::SharedVocabulary)
/// save runs.
#[derive(Debug)]
pub struct Vocabulary {
    store: VocabularyStore,
    products: PrefixIndex,
    brands: PrefixIndex,
    flavors: PrefixIndex,
    added: Added,
    file_updates: u64,
    generation: u64,
    saved_generation: u64,
}

impl Vocabulary {
    /// Builds a vocabulary from the static seed lists without reading disk.
    pub fn from_seed(store: VocabularyStore) -> Self {
        Self {
            store,
            products: PrefixIndex::from_words(PRODUCT_SEED),
            brands: PrefixIndex::from_words(BRAND_SEED),
            flavors: PrefixIndex::from_words(FLAVOR_SEED),
            added: Added::default(),
            file_updates: 0,
            generation: 0,
            saved_generation: 0,
        }
    }

    // == Initialize ==
    /// Loads every kind from `store`, falling back to the static seed for any
    /// kind whose file is missing, unreadable or empty. Never fails.
    ///
    /// A vocabulary that needed the fallback starts dirty, so the next flush
    /// writes a usable snapshot.
    pub async fn initialize(store: VocabularyStore) -> Self {
        let mut vocabulary = Self::from_seed(store);

        for kind in VocabularyKind::ALL {
            let loaded = match vocabulary.store.load(kind).await {
                Ok(words) if !words.is_empty() => Some(words),
                Ok(_) => {
                    warn!(%kind, "vocabulary file empty, using seed");
                    None
                }
                Err(e) => {
                    warn!(%kind, error = %e, "vocabulary file unusable, using seed");
                    None
                }
            };

            match loaded {
                Some(words) => {
                    let index = PrefixIndex::from_words(&words);
                    info!(%kind, words = index.len(), "vocabulary loaded");
                    *vocabulary.index_mut(kind) = index;
                }
                None => vocabulary.generation += 1,
            }
        }

        vocabulary
    }

    pub fn store(&self) -> &VocabularyStore {
        &self.store
    }

    pub fn index(&self, kind: VocabularyKind) -> &PrefixIndex {
        match kind {
            VocabularyKind::Products => &self.products,
            VocabularyKind::Brands => &self.brands,
            VocabularyKind::Flavors => &self.flavors,
        }
    }

    fn index_mut(&mut self, kind: VocabularyKind) -> &mut PrefixIndex {
        match kind {
            VocabularyKind::Products => &mut self.products,
            VocabularyKind::Brands => &mut self.brands,
            VocabularyKind::Flavors => &mut self.flavors,
        }
    }

    pub fn search(&self, kind: VocabularyKind, prefix: &str, limit: usize) -> Vec<String> {
        self.index(kind).search_prefix(prefix, limit)
    }

    // == Insert ==
    /// Adds one word. Returns true when it was new.
    pub fn insert(&mut self, kind: VocabularyKind, text: &str) -> bool {
        let added = self.index_mut(kind).insert(text);
        if added {
            self.added.bump(kind);
            self.generation += 1;
        }
        added
    }

    /// Adds a product's name, brand and flavor. Returns how many were new.
    pub fn add_product(&mut self, product: &ProductNames) -> usize {
        [
            (VocabularyKind::Products, product.name.as_str()),
            (VocabularyKind::Brands, product.brand.as_str()),
            (VocabularyKind::Flavors, product.flavor.as_str()),
        ]
        .into_iter()
        .filter(|(kind, text)| self.insert(*kind, text))
        .count()
    }

    pub fn batch_update(&mut self, products: &[ProductNames]) -> usize {
        let added: usize = products.iter().map(|p| self.add_product(p)).sum();
        info!(products = products.len(), added, "vocabulary batch update");
        added
    }

    pub fn is_dirty(&self) -> bool {
        self.generation != self.saved_generation
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    // == Save ==
    /// Copies every word list along with the current generation.
    pub fn snapshot(&self) -> VocabularySnapshot {
        VocabularySnapshot {
            generation: self.generation,
            store: self.store.clone(),
            words: VocabularyKind::ALL
                .into_iter()
                .map(|kind| (kind, self.index(kind).words()))
                .collect(),
        }
    }

    /// Records that a snapshot taken at `generation` reached disk.
    ///
    /// Mutations made after the snapshot keep the vocabulary dirty.
    pub fn mark_saved(&mut self, generation: u64) {
        self.file_updates += 1;
        self.saved_generation = self.saved_generation.max(generation);
        info!(
            dir = ?self.store.dir(),
            generation,
            dirty = self.is_dirty(),
            "vocabulary saved"
        );
    }

    /// Writes every kind to the store while holding `&mut self`. Shared
    /// vocabularies should save through `SharedVocabulary` instead.
    pub async fn save(&mut self) -> Result<()> {
        let snapshot = self.snapshot();
        snapshot.write().await?;
        self.mark_saved(snapshot.generation());
        Ok(())
    }

    pub fn stats(&self) -> VocabularyStats {
        VocabularyStats {
            products: self.products.len(),
            brands: self.brands.len(),
            flavors: self.flavors.len(),
            products_added: self.added.products,
            brands_added: self.added.brands,
            flavors_added: self.added.flavors,
            file_updates: self.file_updates,
            dirty: self.is_dirty(),
        }
    }
}

//! Cache key construction for domain queries.
//!
//! Keys are `namespace:` followed by `label:value` fragments joined with `|`
//! in a fixed order. Free-text values are trimmed, lowercased and
//! percent-encoded so they cannot contain either separator.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Namespace shared by every product-list key.
pub const PRODUCT_LIST_NAMESPACE: &str = "products:";

/// Namespace for leaderboard snapshots.
pub const LEADERBOARD_NAMESPACE: &str = "products:top:";

/// Largest page size a listing may request.
pub const MAX_PAGE_LIMIT: i64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    #[default]
    Name,
    CreatedAt,
    Rating,
    Transparency,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Name => "name",
            SortField::CreatedAt => "created_at",
            SortField::Rating => "rating",
            SortField::Transparency => "transparency",
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// == Product List Query ==
/// Parameters of a paginated product listing as received from a caller.
///
/// Fields are deliberately loose (signed page numbers, optional strings);
/// [`ProductListQuery::normalized`] turns any input into a canonical form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductListQuery {
    pub page: i64,
    pub limit: i64,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub sort: SortField,
    #[serde(default)]
    pub order: SortOrder,
}

impl Default for ProductListQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 25,
            category: None,
            search: None,
            sort: SortField::default(),
            order: SortOrder::default(),
        }
    }
}

impl ProductListQuery {
    pub fn page(page: i64, limit: i64) -> Self {
        Self {
            page,
            limit,
            ..Self::default()
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn sorted_by(mut self, sort: SortField, order: SortOrder) -> Self {
        self.sort = sort;
        self.order = order;
        self
    }

    // == Normalized ==
    /// Clamps page to `>= 1`, limit to `1..=MAX_PAGE_LIMIT`, and folds blank
    /// or differently-cased text filters together.
    pub fn normalized(&self) -> Self {
        Self {
            page: self.page.max(1),
            limit: self.limit.clamp(1, MAX_PAGE_LIMIT),
            category: normalize_text(self.category.as_deref()),
            search: normalize_text(self.search.as_deref()),
            sort: self.sort,
            order: self.order,
        }
    }
}

fn normalize_text(value: Option<&str>) -> Option<String> {
    value
        .map(|v| v.trim().to_lowercase())
        .filter(|v| !v.is_empty())
}

// == Product List Key ==
/// Builds the canonical cache key for a product listing.
///
/// ```
/// use supplement_cache::domain::{build_product_list_key, ProductListQuery};
///
/// let key = build_product_list_key(&ProductListQuery::page(2, 25).with_category("Protein"));
/// assert_eq!(key, "products:page:2|limit:25|sort:name|order:asc|category:protein");
/// ```
pub fn build_product_list_key(query: &ProductListQuery) -> String {
    let q = query.normalized();
    let mut key = format!(
        "{}page:{}|limit:{}|sort:{}|order:{}",
        PRODUCT_LIST_NAMESPACE, q.page, q.limit, q.sort, q.order
    );
    if let Some(category) = &q.category {
        key.push_str("|category:");
        key.push_str(&urlencoding::encode(category));
    }
    if let Some(search) = &q.search {
        key.push_str("|search:");
        key.push_str(&urlencoding::encode(search));
    }
    key
}

/// Key for a top-N leaderboard snapshot.
pub fn build_leaderboard_key(size: usize) -> String {
    format!("{}{}", LEADERBOARD_NAMESPACE, size)
}

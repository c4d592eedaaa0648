//! Domain Caches Module
//!
//! Product listings, the top-rated leaderboard and the privileged role set,
//! each built on the generic cache with its own key scheme and TTL policy.

mod keys;
mod leaderboard;
mod product_list;
mod roles;

pub use keys::{
    build_leaderboard_key, build_product_list_key, ProductListQuery, SortField, SortOrder,
    LEADERBOARD_NAMESPACE, MAX_PAGE_LIMIT, PRODUCT_LIST_NAMESPACE,
};
pub use leaderboard::{LeaderboardCache, LEADERBOARD_SIZE, LEADERBOARD_TTL};
pub use product_list::{ProductListCache, CACHEABLE_PAGES, PRODUCT_LIST_TTL};
pub use roles::{
    InMemoryRoleStore, JsonFileRoleSeeder, Role, RoleCache, RoleGrant, RoleSeeder, RoleStore,
};

//! Administrator / owner role cache.
//!
//! The privileged set is small and changes rarely, so it stays resident with
//! no TTL. Correctness relies on mutations calling [`RoleCache::grant`],
//! [`RoleCache::revoke`] or [`RoleCache::invalidate`]. A cache built with a
//! [`RoleSeeder`] refills itself on the first lookup after an invalidation.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Owner,
}

impl Role {
    /// Owners carry every administrator privilege.
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin | Role::Owner)
    }

    pub fn is_owner(&self) -> bool {
        matches!(self, Role::Owner)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => f.write_str("admin"),
            Role::Owner => f.write_str("owner"),
        }
    }
}

/// One row of the authoritative role table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleGrant {
    pub user_id: String,
    pub role: Role,
}

impl RoleGrant {
    pub fn new(user_id: impl Into<String>, role: Role) -> Self {
        Self {
            user_id: user_id.into(),
            role,
        }
    }
}

// == Role Store ==
/// Storage backend for the role cache.
///
/// The in-process map is the default; an external accelerator can be plugged
/// in by implementing this trait and handing it to [`RoleCache::new`].
pub trait RoleStore: Send + Sync {
    fn set_role(&self, user_id: &str, role: Role);

    fn get_role(&self, user_id: &str) -> Option<Role>;

    /// Returns whether the user had a role.
    fn remove_user(&self, user_id: &str) -> bool;

    fn is_empty(&self) -> bool;

    fn len(&self) -> usize;

    /// Swaps in a complete new role set in one step.
    fn replace_all(&self, roles: HashMap<String, Role>);

    fn clear(&self);
}

#[derive(Debug, Default)]
pub struct InMemoryRoleStore {
    roles: RwLock<HashMap<String, Role>>,
}

impl InMemoryRoleStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RoleStore for InMemoryRoleStore {
    fn set_role(&self, user_id: &str, role: Role) {
        self.roles.write().insert(user_id.to_string(), role);
    }

    fn get_role(&self, user_id: &str) -> Option<Role> {
        self.roles.read().get(user_id).copied()
    }

    fn remove_user(&self, user_id: &str) -> bool {
        self.roles.write().remove(user_id).is_some()
    }

    fn is_empty(&self) -> bool {
        self.roles.read().is_empty()
    }

    fn len(&self) -> usize {
        self.roles.read().len()
    }

    fn replace_all(&self, roles: HashMap<String, Role>) {
        *self.roles.write() = roles;
    }

    fn clear(&self) {
        self.roles.write().clear();
    }
}

// == Role Seeder ==
/// Authoritative source of the full role set.
#[async_trait]
pub trait RoleSeeder: Send + Sync {
    async fn load_roles(&self) -> Result<Vec<RoleGrant>>;
}

/// Reads a JSON array of [`RoleGrant`] rows from disk on every load.
#[derive(Debug, Clone)]
pub struct JsonFileRoleSeeder {
    path: PathBuf,
}

impl JsonFileRoleSeeder {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl RoleSeeder for JsonFileRoleSeeder {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn load_roles(&self) -> Result<Vec<RoleGrant>> {
        let contents = tokio::fs::read(&self.path).await?;
        let grants = serde_json::from_slice(&contents)?;
        Ok(grants)
    }
}

// == Role Cache ==
pub struct RoleCache<S> {
    store: Arc<S>,
    seeder: Option<Arc<dyn RoleSeeder>>,
    /// False until a warm succeeds, and again after `invalidate`
    loaded: Arc<AtomicBool>,
    reload_lock: Arc<Mutex<()>>,
}

impl<S> Clone for RoleCache<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            seeder: self.seeder.clone(),
            loaded: Arc::clone(&self.loaded),
            reload_lock: Arc::clone(&self.reload_lock),
        }
    }
}

impl<S: RoleStore> RoleCache<S> {
    /// A cache with no seeder. It only changes through `grant`, `revoke`,
    /// `warm` and `invalidate`.
    pub fn new(store: S) -> Self {
        Self {
            store: Arc::new(store),
            seeder: None,
            loaded: Arc::new(AtomicBool::new(false)),
            reload_lock: Arc::new(Mutex::new(())),
        }
    }

    /// A cache that reloads from `seeder` whenever a lookup finds it unloaded.
    pub fn with_seeder(store: S, seeder: impl RoleSeeder + 'static) -> Self {
        Self {
            seeder: Some(Arc::new(seeder)),
            ..Self::new(store)
        }
    }

    pub fn has_seeder(&self) -> bool {
        self.seeder.is_some()
    }

    /// True once a warm has succeeded and no invalidation has happened since.
    pub fn is_loaded(&self) -> bool {
        self.loaded.load(Ordering::Acquire)
    }

    // == Lookup ==
    /// Looks up a user's role, reloading first if the cache was invalidated.
    ///
    /// A failed reload is logged and the lookup answers from whatever is
    /// resident, which after an invalidation means no role.
    pub async fn role_of(&self, user_id: &str) -> Option<Role> {
        if let Err(e) = self.ensure_fresh().await {
            warn!(error = %e, "role reload failed, answering from resident set");
        }
        self.store.get_role(user_id)
    }

    pub async fn is_admin(&self, user_id: &str) -> bool {
        self.role_of(user_id).await.map(|r| r.is_admin()).unwrap_or(false)
    }

    pub async fn is_owner(&self, user_id: &str) -> bool {
        self.role_of(user_id).await.map(|r| r.is_owner()).unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    // == Grant ==
    /// Records a role change the caller has already committed upstream,
    /// without reloading the whole set.
    pub fn grant(&self, user_id: &str, role: Role) {
        self.store.set_role(user_id, role);
        info!(user_id, %role, "role granted");
    }

    // == Revoke ==
    pub fn revoke(&self, user_id: &str) -> bool {
        let removed = self.store.remove_user(user_id);
        if removed {
            info!(user_id, "role revoked");
        }
        removed
    }

    // == Invalidate ==
    /// Drops every cached role and marks the cache unloaded. Returns how many
    /// were held.
    pub fn invalidate(&self) -> usize {
        let held = self.store.len();
        self.store.clear();
        self.loaded.store(false, Ordering::Release);
        info!(held, "role cache invalidated");
        held
    }

    // == Warm ==
    /// Rebuilds the cache from the authoritative source.
    ///
    /// The full set is fetched first and swapped in with a single write, so
    /// concurrent readers see either the old set or the new one. If `seeder`
    /// fails the old set is kept and the error is returned.
    pub async fn warm<F, Fut, E>(&self, seeder: F) -> std::result::Result<usize, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<Vec<RoleGrant>, E>>,
    {
        let grants = seeder().await?;
        let roles: HashMap<String, Role> = grants
            .into_iter()
            .map(|grant| (grant.user_id, grant.role))
            .collect();
        let count = roles.len();

        self.store.replace_all(roles);
        self.loaded.store(true, Ordering::Release);
        info!(count, "role cache warmed");
        Ok(count)
    }

    /// Warms the cache only when it is empty. Returns whether a load ran.
    pub async fn ensure_loaded<F, Fut, E>(&self, seeder: F) -> std::result::Result<bool, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<Vec<RoleGrant>, E>>,
    {
        if !self.store.is_empty() {
            return Ok(false);
        }
        self.warm(seeder).await?;
        Ok(true)
    }

    // == Reload ==
    /// Warms from the injected seeder. Returns `None` when there is none.
    pub async fn reload(&self) -> Result<Option<usize>> {
        let Some(seeder) = self.seeder.as_ref() else {
            return Ok(None);
        };
        let count = self.warm(|| seeder.load_roles()).await?;
        Ok(Some(count))
    }

    /// Reloads once if the cache has a seeder and is not loaded. Concurrent
    /// callers wait for a single reload.
    async fn ensure_fresh(&self) -> Result<()> {
        if self.seeder.is_none() || self.is_loaded() {
            return Ok(());
        }

        let _guard = self.reload_lock.lock().await;
        if self.is_loaded() {
            return Ok(());
        }
        debug!("role cache unloaded, reloading from seeder");
        self.reload().await.map(|_| ())
    }
}

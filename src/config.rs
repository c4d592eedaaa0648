//! Configuration Module
//!
//! Loads service configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of entries the product-list cache can hold
    pub max_entries: usize,
    /// Default TTL in seconds for entries without explicit TTL
    pub default_ttl: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Background cleanup task interval in seconds
    pub cleanup_interval: u64,
    /// Directory holding the persisted autocomplete vocabulary
    pub vocabulary_dir: PathBuf,
    /// Vocabulary flush interval in seconds
    pub vocabulary_flush_interval: u64,
    /// Optional JSON file of `{user_id, role}` rows used to warm the role cache
    pub role_seed_file: Option<PathBuf>,
    /// Product-list cache reset interval in seconds
    pub daily_reset_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `MAX_ENTRIES` - Maximum cache entries (default: 1000)
    /// - `DEFAULT_TTL` - Default TTL in seconds (default: 300)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CLEANUP_INTERVAL` - Cleanup frequency in seconds (default: 60)
    /// - `VOCABULARY_DIR` - Vocabulary data directory (default: ./data/autocomplete)
    /// - `VOCABULARY_FLUSH_INTERVAL` - Flush frequency in seconds (default: 3600)
    /// - `ROLE_SEED_FILE` - Role seed file (default: unset)
    /// - `DAILY_RESET_INTERVAL` - Product-list reset frequency in seconds (default: 86400)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_entries: parse_var("MAX_ENTRIES").unwrap_or(defaults.max_entries),
            default_ttl: parse_var("DEFAULT_TTL").unwrap_or(defaults.default_ttl),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            cleanup_interval: parse_var("CLEANUP_INTERVAL").unwrap_or(defaults.cleanup_interval),
            vocabulary_dir: env::var("VOCABULARY_DIR")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.vocabulary_dir),
            vocabulary_flush_interval: parse_var("VOCABULARY_FLUSH_INTERVAL")
                .unwrap_or(defaults.vocabulary_flush_interval),
            role_seed_file: env::var("ROLE_SEED_FILE")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
            daily_reset_interval: parse_var("DAILY_RESET_INTERVAL")
                .unwrap_or(defaults.daily_reset_interval),
        }
    }

    pub fn default_ttl(&self) -> Duration {
        Duration::from_secs(self.default_ttl)
    }

    // Zero would spin the background loops
    pub fn cleanup_interval(&self) -> Duration {
        Duration::from_secs(self.cleanup_interval.max(1))
    }

    pub fn vocabulary_flush_interval(&self) -> Duration {
        Duration::from_secs(self.vocabulary_flush_interval.max(1))
    }

    pub fn daily_reset_interval(&self) -> Duration {
        Duration::from_secs(self.daily_reset_interval.max(1))
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_entries: 1000,
            default_ttl: 300,
            server_port: 3000,
            cleanup_interval: 60,
            vocabulary_dir: PathBuf::from("./data/autocomplete"),
            vocabulary_flush_interval: 3600,
            role_seed_file: None,
            daily_reset_interval: 24 * 60 * 60,
        }
    }
}

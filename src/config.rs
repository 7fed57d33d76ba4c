//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::time::Duration;

use crate::cache::CacheEntryPolicy;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Default sliding expiration in seconds for cache entries
    pub default_sliding_ttl: u64,
    /// Default absolute expiration in seconds for cache entries
    pub default_absolute_ttl: u64,
    /// Sliding expiration in seconds for collection entries
    pub collection_sliding_ttl: u64,
    /// Absolute expiration in seconds for collection entries
    pub collection_absolute_ttl: u64,
    /// Background expiry sweep interval in seconds
    pub sweep_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `DEFAULT_SLIDING_TTL_SECS` - Default sliding expiration (default: 1800)
    /// - `DEFAULT_ABSOLUTE_TTL_SECS` - Default absolute expiration (default: 3600)
    /// - `COLLECTION_SLIDING_TTL_SECS` - Collection sliding expiration (default: 120)
    /// - `COLLECTION_ABSOLUTE_TTL_SECS` - Collection absolute expiration (default: 1200)
    /// - `SWEEP_INTERVAL_SECS` - Expiry sweep frequency (default: 5)
    pub fn from_env() -> Self {
        Self {
            server_port: env_or("SERVER_PORT", 3000),
            default_sliding_ttl: env_or("DEFAULT_SLIDING_TTL_SECS", 1800),
            default_absolute_ttl: env_or("DEFAULT_ABSOLUTE_TTL_SECS", 3600),
            collection_sliding_ttl: env_or("COLLECTION_SLIDING_TTL_SECS", 120),
            collection_absolute_ttl: env_or("COLLECTION_ABSOLUTE_TTL_SECS", 1200),
            sweep_interval: env_or("SWEEP_INTERVAL_SECS", 5),
        }
    }

    /// Returns the default entry policy derived from this configuration.
    pub fn default_policy(&self) -> CacheEntryPolicy {
        CacheEntryPolicy::new()
            .with_sliding_expiration(Duration::from_secs(self.default_sliding_ttl))
            .with_absolute_expiration(Duration::from_secs(self.default_absolute_ttl))
    }

    /// Returns the entry policy applied to cached collections.
    ///
    /// Collections are invalidated on every write, so they carry a shorter
    /// lifetime than single entities.
    pub fn collection_policy(&self) -> CacheEntryPolicy {
        CacheEntryPolicy::new()
            .with_sliding_expiration(Duration::from_secs(self.collection_sliding_ttl))
            .with_absolute_expiration(Duration::from_secs(self.collection_absolute_ttl))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            default_sliding_ttl: 1800,
            default_absolute_ttl: 3600,
            collection_sliding_ttl: 120,
            collection_absolute_ttl: 1200,
            sweep_interval: 5,
        }
    }
}

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

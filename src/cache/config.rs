use std::env;
use std::time::Duration;

const GIB: usize = 1024 * 1024 * 1024;

/// Конфигурация одного кэша результатов (TTL + бюджет памяти)
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of entries in the cache
    pub max_entries: usize,
    /// Maximum memory usage in bytes (approximate)
    pub max_memory_bytes: usize,
    /// Time-to-live for cache entries, counted from creation
    pub ttl: Duration,
    /// Whether caching is enabled
    pub enabled: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self::data_defaults()
    }
}

impl CacheConfig {
    /// Defaults for the row-result cache: 60 minutes, 16 GiB.
    #[must_use]
    pub const fn data_defaults() -> Self {
        Self {
            max_entries: 100_000,
            max_memory_bytes: 16 * GIB,
            ttl: Duration::from_secs(60 * 60),
            enabled: true,
        }
    }

    /// Defaults for the metadata cache: 60 minutes, 1 GiB.
    #[must_use]
    pub const fn metadata_defaults() -> Self {
        Self {
            max_entries: 100_000,
            max_memory_bytes: GIB,
            ttl: Duration::from_secs(60 * 60),
            enabled: true,
        }
    }

    /// Create a disabled cache configuration
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }

    /// Overrides taken from `{prefix}_TTL_SECS`, `{prefix}_MAX_BYTES`,
    /// `{prefix}_MAX_ENTRIES` and `{prefix}_ENABLED`; anything unset keeps
    /// the value already in `self`.
    #[must_use]
    pub fn from_env(self, prefix: &str) -> Self {
        let var = |suffix: &str| env::var(format!("{prefix}_{suffix}")).ok();
        Self {
            max_entries: var("MAX_ENTRIES")
                .and_then(|v| v.parse().ok())
                .unwrap_or(self.max_entries),
            max_memory_bytes: var("MAX_BYTES")
                .and_then(|v| v.parse().ok())
                .unwrap_or(self.max_memory_bytes),
            ttl: var("TTL_SECS")
                .and_then(|v| v.parse().ok())
                .map_or(self.ttl, Duration::from_secs),
            enabled: var("ENABLED")
                .and_then(|v| v.parse().ok())
                .unwrap_or(self.enabled),
        }
    }

    /// Set the maximum number of entries
    #[must_use]
    pub const fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = max_entries;
        self
    }

    /// Set the maximum memory usage
    #[must_use]
    pub const fn with_max_memory(mut self, max_memory_bytes: usize) -> Self {
        self.max_memory_bytes = max_memory_bytes;
        self
    }

    /// Set the TTL duration
    #[must_use]
    pub const fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Enable or disable the cache
    #[must_use]
    pub const fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

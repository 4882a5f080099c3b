// Module declarations
pub mod config;
pub mod stats;
pub mod query_cache;

// Re-exports for convenience
pub use config::CacheConfig;
pub use stats::CacheStats;
pub use query_cache::{CacheKey, EntryWeight, QueryCache};

use std::sync::Arc;

use crate::core::{ColumnInfo, ResultSet};

impl EntryWeight for ResultSet {
    fn weight_bytes(&self) -> usize {
        self.estimated_size()
    }
}

impl EntryWeight for Arc<Vec<ColumnInfo>> {
    fn weight_bytes(&self) -> usize {
        self.iter()
            .map(|col| {
                std::mem::size_of::<ColumnInfo>()
                    + col.name.len()
                    + col.label.len()
                    + col.type_name.len()
                    + col.schema.len()
                    + col.table.len()
            })
            .sum()
    }
}

/// The two shared result caches behind every prepared statement (v0.3.0 -
/// explicit lifecycle).
///
/// Constructed once per driver/process and passed to each connection by
/// `Arc`; there is deliberately no global instance, so tests and embedders
/// control the lifecycle.
#[derive(Debug)]
pub struct StatementCaches {
    data: QueryCache<ResultSet>,
    metadata: QueryCache<Arc<Vec<ColumnInfo>>>,
}

impl StatementCaches {
    #[must_use]
    pub fn new(data: CacheConfig, metadata: CacheConfig) -> Self {
        Self {
            data: QueryCache::new(data),
            metadata: QueryCache::new(metadata),
        }
    }

    /// Row-result cache at 60 minutes / 16 GiB, metadata cache at
    /// 60 minutes / 1 GiB.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(CacheConfig::data_defaults(), CacheConfig::metadata_defaults())
    }

    /// Defaults with `FORCEQL_DATA_CACHE_*` / `FORCEQL_METADATA_CACHE_*`
    /// environment overrides applied.
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(
            CacheConfig::data_defaults().from_env("FORCEQL_DATA_CACHE"),
            CacheConfig::metadata_defaults().from_env("FORCEQL_METADATA_CACHE"),
        )
    }

    #[must_use]
    pub const fn data(&self) -> &QueryCache<ResultSet> {
        &self.data
    }

    #[must_use]
    pub const fn metadata(&self) -> &QueryCache<Arc<Vec<ColumnInfo>>> {
        &self.metadata
    }
}

impl Default for StatementCaches {
    fn default() -> Self {
        Self::with_defaults()
    }
}

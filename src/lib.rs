// forceql - prepared-statement driver core for Salesforce-style query services
// Parameter binding, scoped result caching and metadata projection

// Clippy configuration - allow non-critical warnings
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::significant_drop_tightening)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::multiple_crate_versions)]

// Core value and metadata structures
pub mod core;

// Cache directive grammar
pub mod parser;

// Shared result caches (TTL, size budget, single-flight)
pub mod cache;

// Column metadata projection and type resolution
pub mod metadata;

// Contracts of the remote collaborators
pub mod service;

// Prepared statements (parameters, binding, execution)
pub mod statement;

// Connection facade
pub mod connection;

// Re-export commonly used types for convenience
pub use self::core::{ColumnInfo, DriverError, FieldDef, ResultSet, Row, Value};
pub use parser::{CacheMode, split_cache_directive};
pub use cache::{CacheConfig, CacheKey, CacheStats, QueryCache, StatementCaches};
pub use metadata::{SCHEMA_NAME, TypeInfo, TypeRegistry};
pub use service::{
    QueryAnalysis, QueryService, Record, ResultField, SessionIdentity, SoqlAnalyzer, StaticSession,
};
pub use statement::{Parameters, PreparedStatement, bind_parameters, count_placeholders};
pub use connection::Connection;

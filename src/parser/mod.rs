// Module declarations
mod hints;

// Re-export all public types
pub use hints::{CacheMode, cache_mode_of, split_cache_directive};

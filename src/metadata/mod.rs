// Module declarations
pub mod type_info;
pub mod projector;

// Re-exports for convenience
pub use type_info::{TypeInfo, TypeRegistry, sql_type};
pub use projector::{SCHEMA_NAME, flatten, project_columns};

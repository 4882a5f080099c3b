use thiserror::Error;

/// Driver-level failures surfaced to statement callers.
///
/// `Clone` is required so a single failed computation can be handed to every
/// caller blocked on the same cache key.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DriverError {
    #[error("Query preparation failed: {0}")]
    Preparation(String),
    #[error("Query execution failed: {0}")]
    Execution(String),
    #[error("Connection error: {0}")]
    Connection(String),
    #[error("Invalid parameter index {0}: indexes are 1-based")]
    InvalidParameterIndex(usize),
}

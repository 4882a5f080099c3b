//! Contracts of the remote collaborators the statement core drives.
//!
//! The wire transport, the query grammar analysis and the session handshake
//! all live behind these traits; the core only consumes them.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::{DriverError, FieldDef, Value};

/// One typed field of a fetched record, positionally aligned with the
/// statement's column metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResultField {
    /// Full column name, relationship-qualified where applicable.
    pub name: String,
    pub value: Value,
}

impl ResultField {
    pub fn new(name: impl Into<String>, value: Value) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    /// The placeholder substituted for a missing field so positions keep
    /// lining up with the metadata.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            name: String::new(),
            value: Value::Null,
        }
    }
}

/// One fetched record: an optional field per projected position.
pub type Record = Vec<Option<ResultField>>;

/// Executes bound query text against the remote service.
///
/// Implementations own connectivity, retries and timeouts; the statement
/// core propagates their failures unchanged and never retries.
pub trait QueryService: Send + Sync {
    fn execute_query(&self, soql: &str, fields: &[FieldDef]) -> Result<Vec<Record>, DriverError>;
}

/// What the analyzer learned about a prepared query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryAnalysis {
    /// Source object of the root query.
    pub from_object: String,
    /// Projected fields, nested where the query traverses relationships.
    pub fields: Vec<FieldDef>,
}

/// Grammar-level analysis of prepared query text.
pub trait SoqlAnalyzer: Send + Sync {
    /// Fails with [`DriverError::Preparation`] when the text cannot be
    /// parsed.
    fn analyze(&self, soql: &str) -> Result<QueryAnalysis, DriverError>;
}

/// Supplies the stable per-connection identifier used for session-scoped
/// cache keys.
pub trait SessionIdentity: Send + Sync {
    fn session_id(&self) -> String;
}

/// Fixed session identifier, handed out by transports that negotiate the
/// session once up front.
#[derive(Debug, Clone)]
pub struct StaticSession(String);

impl StaticSession {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Fresh random identifier, mainly for embedders without a real session
    /// handshake.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl SessionIdentity for StaticSession {
    fn session_id(&self) -> String {
        self.0.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_result_field() {
        let field = ResultField::empty();
        assert_eq!(field.name, "");
        assert_eq!(field.value, Value::Null);
    }

    #[test]
    fn test_static_session() {
        let session = StaticSession::new("00Dxx-token");
        assert_eq!(session.session_id(), "00Dxx-token");

        let a = StaticSession::random();
        let b = StaticSession::random();
        assert_ne!(a.session_id(), b.session_id());
    }
}

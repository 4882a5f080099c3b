use std::sync::Arc;

use crate::cache::StatementCaches;
use crate::metadata::TypeRegistry;
use crate::service::{QueryService, SessionIdentity, SoqlAnalyzer};
use crate::statement::PreparedStatement;

/// Live connection to a remote query service.
///
/// Bundles the collaborators every statement needs: the execution service,
/// the query analyzer, the session identity and the shared result caches.
/// Connections are cheap to clone; statements prepared from clones share the
/// same caches.
#[derive(Clone)]
pub struct Connection {
    service: Arc<dyn QueryService>,
    analyzer: Arc<dyn SoqlAnalyzer>,
    session: Arc<dyn SessionIdentity>,
    types: Arc<TypeRegistry>,
    caches: Arc<StatementCaches>,
}

impl Connection {
    /// Connection with default cache sizing and the built-in type registry.
    pub fn new(
        service: Arc<dyn QueryService>,
        analyzer: Arc<dyn SoqlAnalyzer>,
        session: Arc<dyn SessionIdentity>,
    ) -> Self {
        Self::with_caches(
            service,
            analyzer,
            session,
            Arc::new(StatementCaches::with_defaults()),
        )
    }

    /// Connection sharing an explicitly constructed cache service. Use this
    /// to share caches across connections or to control their lifecycle in
    /// tests.
    pub fn with_caches(
        service: Arc<dyn QueryService>,
        analyzer: Arc<dyn SoqlAnalyzer>,
        session: Arc<dyn SessionIdentity>,
        caches: Arc<StatementCaches>,
    ) -> Self {
        Self {
            service,
            analyzer,
            session,
            types: Arc::new(TypeRegistry::builtin()),
            caches,
        }
    }

    /// Replaces the type registry, e.g. to add service-specific custom
    /// types.
    #[must_use]
    pub fn with_type_registry(mut self, types: TypeRegistry) -> Self {
        self.types = Arc::new(types);
        self
    }

    /// Prepares `raw_query`, resolving a leading cache directive.
    #[must_use]
    pub fn prepare(&self, raw_query: &str) -> PreparedStatement {
        PreparedStatement::new(
            raw_query,
            Arc::clone(&self.service),
            Arc::clone(&self.analyzer),
            Arc::clone(&self.session),
            Arc::clone(&self.types),
            Arc::clone(&self.caches),
        )
    }

    #[must_use]
    pub fn caches(&self) -> &StatementCaches {
        &self.caches
    }

    #[must_use]
    pub fn session_id(&self) -> String {
        self.session.session_id()
    }
}

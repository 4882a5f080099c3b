// Module declarations
mod binder;
mod params;

// Re-export all public types
pub use binder::{bind_parameters, count_placeholders};
pub use params::Parameters;

use std::cell::OnceCell;
use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use tracing::debug;

use crate::cache::{CacheKey, StatementCaches};
use crate::core::{ColumnInfo, DriverError, FieldDef, ResultSet, Row, Value};
use crate::metadata::{TypeRegistry, project_columns};
use crate::parser::{CacheMode, split_cache_directive};
use crate::service::{
    QueryAnalysis, QueryService, Record, ResultField, SessionIdentity, SoqlAnalyzer,
};

/// Converts one fetched record into a row of named values.
///
/// A missing field becomes the empty placeholder so positions keep lining up
/// with the metadata; names are emitted in source order and duplicates stay
/// separate entries.
#[must_use]
pub fn project_row(record: Record) -> Row {
    let mut row = Row::default();
    for field in record {
        let field = field.unwrap_or_else(ResultField::empty);
        row.push(field.name, field.value);
    }
    row
}

/// Parameterized query bound to a connection's collaborators.
///
/// A leading `CACHE GLOBAL` / `CACHE SESSION` directive routes execution and
/// metadata through the shared caches; without it every call goes to the
/// service. One instance belongs to one thread: parameter mutation takes
/// `&mut self` and the memoized analysis is not synchronized. The caches it
/// points at are shared and thread-safe.
pub struct PreparedStatement {
    soql: String,
    cache_mode: CacheMode,
    parameters: Parameters,
    fetch_size: usize,
    max_rows: usize,
    service: Arc<dyn QueryService>,
    analyzer: Arc<dyn SoqlAnalyzer>,
    session: Arc<dyn SessionIdentity>,
    types: Arc<TypeRegistry>,
    caches: Arc<StatementCaches>,
    analysis: OnceCell<QueryAnalysis>,
    metadata: OnceCell<Arc<Vec<ColumnInfo>>>,
}

impl PreparedStatement {
    #[must_use]
    pub fn new(
        raw_query: &str,
        service: Arc<dyn QueryService>,
        analyzer: Arc<dyn SoqlAnalyzer>,
        session: Arc<dyn SessionIdentity>,
        types: Arc<TypeRegistry>,
        caches: Arc<StatementCaches>,
    ) -> Self {
        let (cache_mode, soql) = split_cache_directive(raw_query);
        debug!(?cache_mode, query = soql, "prepared statement");
        Self {
            soql: soql.to_string(),
            cache_mode,
            parameters: Parameters::new(),
            fetch_size: 0,
            max_rows: 0,
            service,
            analyzer,
            session,
            types,
            caches,
            analysis: OnceCell::new(),
            metadata: OnceCell::new(),
        }
    }

    /// Query text after directive removal, placeholders intact.
    #[must_use]
    pub fn query_text(&self) -> &str {
        &self.soql
    }

    #[must_use]
    pub const fn cache_mode(&self) -> CacheMode {
        self.cache_mode
    }

    /// Number of `?` placeholders in the query text.
    #[must_use]
    pub fn parameter_count(&self) -> usize {
        count_placeholders(&self.soql)
    }

    // ---- parameter setters (1-based indexes) ----

    pub fn set_value(&mut self, index: usize, value: Value) -> Result<(), DriverError> {
        self.parameters.set(index, value)
    }

    pub fn set_null(&mut self, index: usize) -> Result<(), DriverError> {
        self.parameters.set(index, Value::Null)
    }

    pub fn set_bool(&mut self, index: usize, value: bool) -> Result<(), DriverError> {
        self.parameters.set(index, Value::Boolean(value))
    }

    pub fn set_i16(&mut self, index: usize, value: i16) -> Result<(), DriverError> {
        self.parameters.set(index, Value::SmallInt(value))
    }

    pub fn set_i64(&mut self, index: usize, value: i64) -> Result<(), DriverError> {
        self.parameters.set(index, Value::Integer(value))
    }

    pub fn set_f64(&mut self, index: usize, value: f64) -> Result<(), DriverError> {
        self.parameters.set(index, Value::Real(value))
    }

    pub fn set_decimal(&mut self, index: usize, value: Decimal) -> Result<(), DriverError> {
        self.parameters.set(index, Value::Numeric(value))
    }

    pub fn set_string(&mut self, index: usize, value: impl Into<String>) -> Result<(), DriverError> {
        self.parameters.set(index, Value::Text(value.into()))
    }

    pub fn set_date(&mut self, index: usize, value: NaiveDate) -> Result<(), DriverError> {
        self.parameters.set(index, Value::Date(value))
    }

    pub fn set_timestamp(
        &mut self,
        index: usize,
        value: NaiveDateTime,
    ) -> Result<(), DriverError> {
        self.parameters.set(index, Value::Timestamp(value))
    }

    pub fn clear_parameters(&mut self) {
        self.parameters.clear();
    }

    #[must_use]
    pub fn parameters(&self) -> &[Value] {
        self.parameters.as_slice()
    }

    // ---- statement tuning ----

    pub fn set_fetch_size(&mut self, rows: usize) {
        self.fetch_size = rows;
    }

    #[must_use]
    pub const fn fetch_size(&self) -> usize {
        self.fetch_size
    }

    pub fn set_max_rows(&mut self, max: usize) {
        self.max_rows = max;
    }

    #[must_use]
    pub const fn max_rows(&self) -> usize {
        self.max_rows
    }

    // ---- execution ----

    /// Final query text: placeholders substituted with encoded literals,
    /// missing parameters bound to `NULL`.
    #[must_use]
    pub fn prepare_query(&self) -> String {
        bind_parameters(&self.soql, &self.parameters.effective(&self.soql))
    }

    /// Executes the bound query, serving from the shared data cache when the
    /// statement carries a cache directive.
    pub fn execute_query(&self) -> Result<ResultSet, DriverError> {
        match self.cache_mode {
            CacheMode::None => self.run_query(),
            CacheMode::Global | CacheMode::Session => {
                let key = self.cache_key();
                self.caches.data().get_or_compute(&key, || self.run_query())
            }
        }
    }

    /// Column metadata for the statement's projection, cached like results.
    pub fn metadata(&self) -> Result<Arc<Vec<ColumnInfo>>, DriverError> {
        match self.cache_mode {
            CacheMode::None => self.load_metadata(),
            CacheMode::Global | CacheMode::Session => {
                let key = self.cache_key();
                self.caches
                    .metadata()
                    .get_or_compute(&key, || self.load_metadata())
            }
        }
    }

    /// Projected field definitions as reported by the analyzer.
    pub fn field_definitions(&self) -> Result<&[FieldDef], DriverError> {
        Ok(&self.analysis()?.fields)
    }

    /// Source object of the root query.
    pub fn from_object(&self) -> Result<&str, DriverError> {
        Ok(&self.analysis()?.from_object)
    }

    fn cache_key(&self) -> CacheKey {
        let bound = self.prepare_query();
        if self.cache_mode == CacheMode::Session {
            CacheKey::session(&self.session.session_id(), &bound)
        } else {
            CacheKey::global(bound)
        }
    }

    fn analysis(&self) -> Result<&QueryAnalysis, DriverError> {
        if let Some(analysis) = self.analysis.get() {
            return Ok(analysis);
        }
        let analysis = self.analyzer.analyze(&self.prepare_query())?;
        Ok(self.analysis.get_or_init(|| analysis))
    }

    fn load_metadata(&self) -> Result<Arc<Vec<ColumnInfo>>, DriverError> {
        if let Some(metadata) = self.metadata.get() {
            return Ok(Arc::clone(metadata));
        }
        let analysis = self.analysis()?;
        let columns = project_columns(&analysis.fields, &analysis.from_object, &self.types);
        Ok(Arc::clone(self.metadata.get_or_init(|| Arc::new(columns))))
    }

    fn run_query(&self) -> Result<ResultSet, DriverError> {
        let soql = self.prepare_query();
        debug!(query = soql.as_str(), "executing remote query");
        let columns = self.metadata()?;
        let records = self.service.execute_query(&soql, self.field_definitions()?)?;
        let rows: Vec<Row> = records.into_iter().map(project_row).collect();
        Ok(ResultSet::new(columns, Arc::new(rows)))
    }
}

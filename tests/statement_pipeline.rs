// End-to-end statement pipeline: directive -> binding -> cache -> projection
use forceql::{
    CacheConfig, CacheKey, CacheMode, Connection, DriverError, FieldDef, QueryAnalysis,
    QueryService, Record, ResultField, SoqlAnalyzer, StatementCaches, StaticSession, Value,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Barrier;
use std::thread;
use std::time::Duration;

struct RecordingService {
    calls: AtomicUsize,
    latency: Duration,
}

impl RecordingService {
    fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            latency: Duration::ZERO,
        }
    }

    fn slow(latency: Duration) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            latency,
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl QueryService for RecordingService {
    fn execute_query(&self, soql: &str, _fields: &[FieldDef]) -> Result<Vec<Record>, DriverError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.latency.is_zero() {
            thread::sleep(self.latency);
        }
        // Echo the bound query back so tests can observe what was sent
        Ok(vec![vec![Some(ResultField::new(
            "Name",
            Value::Text(soql.to_string()),
        ))]])
    }
}

struct NameAnalyzer;

impl SoqlAnalyzer for NameAnalyzer {
    fn analyze(&self, _soql: &str) -> Result<QueryAnalysis, DriverError> {
        Ok(QueryAnalysis {
            from_object: "Account".to_string(),
            fields: vec![FieldDef::leaf("Name", "string")],
        })
    }
}

fn connect(service: Arc<RecordingService>, session: &str) -> Connection {
    Connection::new(
        service,
        Arc::new(NameAnalyzer),
        Arc::new(StaticSession::new(session)),
    )
}

#[test]
fn session_scoped_statement_end_to_end() {
    let service = Arc::new(RecordingService::new());
    let conn = connect(Arc::clone(&service), "00Dxx-session");

    let mut stmt = conn.prepare("CACHE SESSION SELECT Name FROM Account WHERE Id = ?");
    stmt.set_string(1, "001xx").unwrap();

    assert_eq!(stmt.cache_mode(), CacheMode::Session);
    assert_eq!(stmt.query_text(), "SELECT Name FROM Account WHERE Id = ?");

    let bound = stmt.prepare_query();
    assert_eq!(bound, "SELECT Name FROM Account WHERE Id = '001xx'");
    assert_eq!(
        CacheKey::session("00Dxx-session", &bound).as_str(),
        "00Dxx-sessionSELECT Name FROM Account WHERE Id = '001xx'"
    );

    let results = stmt.execute_query().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(
        results.rows()[0].get("Name"),
        Some(&Value::Text(bound.clone()))
    );

    let columns = results.columns();
    assert_eq!(columns.len(), 1);
    assert_eq!(columns[0].ordinal, 1);
    assert_eq!(columns[0].name, "Name");
    assert_eq!(columns[0].schema, "Salesforce");
    assert_eq!(columns[0].table, "Account");

    // repeated execution is served from the session cache
    stmt.execute_query().unwrap();
    assert_eq!(service.calls(), 1);
}

#[test]
fn global_scope_shares_across_connections_session_scope_does_not() {
    let service = Arc::new(RecordingService::new());
    let caches = Arc::new(StatementCaches::with_defaults());

    let conn_a = Connection::with_caches(
        Arc::clone(&service) as Arc<dyn QueryService>,
        Arc::new(NameAnalyzer),
        Arc::new(StaticSession::new("sid-a")),
        Arc::clone(&caches),
    );
    let conn_b = Connection::with_caches(
        Arc::clone(&service) as Arc<dyn QueryService>,
        Arc::new(NameAnalyzer),
        Arc::new(StaticSession::new("sid-b")),
        Arc::clone(&caches),
    );

    conn_a
        .prepare("CACHE GLOBAL SELECT Name FROM Account")
        .execute_query()
        .unwrap();
    conn_b
        .prepare("CACHE GLOBAL SELECT Name FROM Account")
        .execute_query()
        .unwrap();
    assert_eq!(service.calls(), 1);

    conn_a
        .prepare("CACHE SESSION SELECT Name FROM Account")
        .execute_query()
        .unwrap();
    conn_b
        .prepare("CACHE SESSION SELECT Name FROM Account")
        .execute_query()
        .unwrap();
    assert_eq!(service.calls(), 3);
}

#[test]
fn uncached_statement_always_executes() {
    let service = Arc::new(RecordingService::new());
    let conn = connect(Arc::clone(&service), "sid");

    let stmt = conn.prepare("SELECT Name FROM Account");
    stmt.execute_query().unwrap();
    stmt.execute_query().unwrap();
    stmt.execute_query().unwrap();

    assert_eq!(service.calls(), 3);
    assert_eq!(conn.caches().data().len(), 0);
}

#[test]
fn concurrent_statements_share_one_remote_execution() {
    let service = Arc::new(RecordingService::slow(Duration::from_millis(60)));
    let caches = Arc::new(StatementCaches::with_defaults());
    let barrier = Arc::new(Barrier::new(6));

    let handles: Vec<_> = (0..6)
        .map(|_| {
            let service = Arc::clone(&service);
            let caches = Arc::clone(&caches);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let conn = Connection::with_caches(
                    service as Arc<dyn QueryService>,
                    Arc::new(NameAnalyzer),
                    Arc::new(StaticSession::new("shared-session")),
                    caches,
                );
                let stmt = conn.prepare("CACHE GLOBAL SELECT Name FROM Account");
                barrier.wait();
                stmt.execute_query()
            })
        })
        .collect();

    let mut results = Vec::new();
    for handle in handles {
        results.push(handle.join().unwrap().unwrap());
    }

    assert_eq!(service.calls(), 1);
    let expected = results[0].rows()[0].get("Name").cloned();
    for result in &results {
        assert_eq!(result.rows()[0].get("Name").cloned(), expected);
    }
}

#[test]
fn typed_parameters_bind_through_the_statement() {
    let service = Arc::new(RecordingService::new());
    let conn = connect(Arc::clone(&service), "sid");

    let mut stmt = conn.prepare(
        "SELECT Name FROM Opportunity WHERE Amount > ? AND IsClosed = ? AND CloseDate < ?",
    );
    stmt.set_decimal(1, rust_decimal::Decimal::new(150_000, 2))
        .unwrap();
    stmt.set_bool(2, false).unwrap();
    stmt.set_date(3, chrono::NaiveDate::from_ymd_opt(2026, 1, 31).unwrap())
        .unwrap();

    assert_eq!(
        stmt.prepare_query(),
        "SELECT Name FROM Opportunity WHERE Amount > 1500.00 AND IsClosed = false \
         AND CloseDate < 2026-01-31T00:00:00"
    );
}

#[test]
fn custom_cache_config_bounds_the_data_cache() {
    let service = Arc::new(RecordingService::new());
    let caches = Arc::new(StatementCaches::new(
        CacheConfig::data_defaults()
            .with_max_memory(256)
            .with_ttl(Duration::from_millis(30)),
        CacheConfig::metadata_defaults(),
    ));
    let conn = Connection::with_caches(
        Arc::clone(&service) as Arc<dyn QueryService>,
        Arc::new(NameAnalyzer),
        Arc::new(StaticSession::new("sid")),
        Arc::clone(&caches),
    );

    let stmt = conn.prepare("CACHE GLOBAL SELECT Name FROM Account");
    stmt.execute_query().unwrap();
    assert_eq!(service.calls(), 1);

    // after the TTL the entry expires and the service is consulted again
    thread::sleep(Duration::from_millis(60));
    stmt.execute_query().unwrap();
    assert_eq!(service.calls(), 2);
    assert_eq!(caches.data().stats().expirations(), 1);
}

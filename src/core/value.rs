use serde::{Deserialize, Serialize};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use uuid::Uuid;
use rust_decimal::Decimal;

/// Fixed date-time layout for query literals, no timezone suffix.
pub const SOQL_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Value {
    Null,
    // Numeric types
    SmallInt(i16),
    Integer(i64),
    Real(f64),
    Numeric(Decimal),  // currency/percent fields with fixed precision
    // String types
    Text(String),
    // Boolean
    Boolean(bool),
    // Date/Time types
    Date(NaiveDate),
    Timestamp(NaiveDateTime),
    // Special types
    Uuid(Uuid),
    Json(String),      // JSON as text
    Bytea(Vec<u8>),    // Binary data (base64 fields)
}

impl Value {
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Renders this value as a query literal.
    ///
    /// Total over every variant: nulls become the bare `NULL` token, booleans
    /// and numbers their canonical decimal text, dates and timestamps the
    /// fixed unquoted [`SOQL_DATETIME_FORMAT`] layout. Text and every variant
    /// without a dedicated literal form fall through to a single-quoted
    /// string with backslashes doubled and embedded quotes escaped. For
    /// exotic values (binary, JSON) the quoted fallback can produce a literal
    /// the remote service rejects; the conversion itself never fails.
    #[must_use]
    pub fn to_soql_literal(&self) -> String {
        match self {
            Self::Null => "NULL".to_string(),
            Self::Boolean(b) => b.to_string(),
            Self::SmallInt(i) => i.to_string(),
            Self::Integer(i) => i.to_string(),
            Self::Real(r) => r.to_string(),
            Self::Numeric(d) => d.to_string(),
            Self::Date(d) => d
                .and_time(NaiveTime::MIN)
                .format(SOQL_DATETIME_FORMAT)
                .to_string(),
            Self::Timestamp(t) => t.format(SOQL_DATETIME_FORMAT).to_string(),
            other => quote_soql_string(&other.to_string()),
        }
    }

    /// Converts a JSON wire value into a [`Value`].
    ///
    /// Transport implementors deserialize service payloads with `serde_json`
    /// and hand each field through here. Arrays and objects are kept as raw
    /// JSON text.
    #[must_use]
    pub fn from_json(json: &serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Boolean(*b),
            serde_json::Value::Number(n) => n
                .as_i64()
                .map_or_else(|| Self::Real(n.as_f64().unwrap_or(f64::NAN)), Self::Integer),
            serde_json::Value::String(s) => Self::Text(s.clone()),
            other => Self::Json(other.to_string()),
        }
    }

    /// Approximate heap footprint, used for cache size accounting.
    #[must_use]
    pub fn estimated_size(&self) -> usize {
        let heap = match self {
            Self::Text(s) | Self::Json(s) => s.len(),
            Self::Bytea(b) => b.len(),
            _ => 0,
        };
        std::mem::size_of::<Self>() + heap
    }
}

/// Single-quotes `raw`, doubling backslashes before escaping embedded quotes.
fn quote_soql_string(raw: &str) -> String {
    let escaped = raw.replace('\\', "\\\\").replace('\'', "\\'");
    format!("'{escaped}'")
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Null => write!(f, "NULL"),
            Self::SmallInt(i) => write!(f, "{i}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Real(r) => write!(f, "{r}"),
            Self::Numeric(d) => write!(f, "{d}"),
            Self::Text(s) => write!(f, "{s}"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Self::Timestamp(t) => write!(f, "{}", t.format("%Y-%m-%d %H:%M:%S")),
            Self::Uuid(u) => write!(f, "{u}"),
            Self::Json(j) => write!(f, "{j}"),
            Self::Bytea(b) => write!(f, "\\x{}", hex::encode(b)),
        }
    }
}

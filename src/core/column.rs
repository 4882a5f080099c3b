use serde::{Deserialize, Serialize};

/// Flat description of one result column, derived from a field definition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ColumnInfo {
    /// 1-based position within the result.
    pub ordinal: usize,
    pub name: String,
    pub label: String,
    /// JDBC-style SQL type code.
    pub sql_type: i32,
    pub type_name: String,
    pub precision: u32,
    /// Fixed schema label, identical for every column of a statement.
    pub schema: String,
    /// Source object of the root query, identical for every column of a
    /// statement, including columns reached via relationship traversal.
    pub table: String,
}

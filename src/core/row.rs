use serde::{Deserialize, Serialize};
use std::sync::Arc;
use super::column::ColumnInfo;
use super::value::Value;

/// One fetched record as ordered (column name, value) pairs.
///
/// Insertion order is preserved and duplicate names stay distinct entries, so
/// positions keep lining up with the statement metadata even when a query
/// projects the same field twice.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Row {
    fields: Vec<(String, Value)>,
}

impl Row {
    #[must_use]
    pub fn new(fields: Vec<(String, Value)>) -> Self {
        Self { fields }
    }

    pub fn push(&mut self, name: String, value: Value) {
        self.fields.push((name, value));
    }

    /// First value stored under `name`, if any.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Value at 0-based position `index`.
    #[must_use]
    pub fn get_at(&self, index: usize) -> Option<&Value> {
        self.fields.get(index).map(|(_, v)| v)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(String, Value)> {
        self.fields.iter()
    }

    /// Approximate heap footprint, used for cache size accounting.
    #[must_use]
    pub fn estimated_size(&self) -> usize {
        self.fields
            .iter()
            .map(|(name, value)| name.len() + value.estimated_size())
            .sum()
    }
}

/// Materialized query result: projected rows plus their column metadata.
///
/// Both halves sit behind `Arc`, so clones are cheap and the same instance
/// can be handed out of the shared cache to many callers.
#[derive(Debug, Clone)]
pub struct ResultSet {
    columns: Arc<Vec<ColumnInfo>>,
    rows: Arc<Vec<Row>>,
}

impl ResultSet {
    #[must_use]
    pub fn new(columns: Arc<Vec<ColumnInfo>>, rows: Arc<Vec<Row>>) -> Self {
        Self { columns, rows }
    }

    #[must_use]
    pub fn columns(&self) -> &[ColumnInfo] {
        &self.columns
    }

    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Approximate heap footprint, used for cache size accounting.
    #[must_use]
    pub fn estimated_size(&self) -> usize {
        self.rows.iter().map(Row::estimated_size).sum()
    }
}

use crate::core::{DriverError, Value};
use super::binder::count_placeholders;

/// Positional parameter slots of a prepared statement.
///
/// Externally 1-based like the statement setters; internally a plain vector
/// that grows on demand, with unset gaps holding nulls. Mutable until the
/// statement binds.
#[derive(Debug, Clone, Default)]
pub struct Parameters {
    values: Vec<Value>,
}

impl Parameters {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes the 1-based slot `index`, extending the list with nulls first
    /// when it points past the end. Overwrites a previously set slot.
    pub fn set(&mut self, index: usize, value: Value) -> Result<(), DriverError> {
        if index == 0 {
            return Err(DriverError::InvalidParameterIndex(0));
        }
        let slot = index - 1;
        if slot >= self.values.len() {
            self.values.resize(slot + 1, Value::Null);
        }
        self.values[slot] = value;
        Ok(())
    }

    /// The stored values right-padded with nulls up to the placeholder count
    /// of `query`. Under-binding is not an error.
    #[must_use]
    pub fn effective(&self, query: &str) -> Vec<Value> {
        let needed = count_placeholders(query);
        let mut values = self.values.clone();
        if values.len() < needed {
            values.resize(needed, Value::Null);
        }
        values
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Value] {
        &self.values
    }
}

use std::collections::HashMap;

/// JDBC-style SQL type codes surfaced through column metadata.
pub mod sql_type {
    pub const LONGVARCHAR: i32 = -1;
    pub const DECIMAL: i32 = 3;
    pub const INTEGER: i32 = 4;
    pub const DOUBLE: i32 = 8;
    pub const VARCHAR: i32 = 12;
    pub const BOOLEAN: i32 = 16;
    pub const DATE: i32 = 91;
    pub const TIME: i32 = 92;
    pub const TIMESTAMP: i32 = 93;
    pub const BLOB: i32 = 2004;
}

/// Resolution of a remote field type name for column metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeInfo {
    pub sql_type: i32,
    pub type_name: String,
    pub precision: u32,
}

impl TypeInfo {
    fn new(sql_type: i32, type_name: &str, precision: u32) -> Self {
        Self {
            sql_type,
            type_name: type_name.to_string(),
            precision,
        }
    }
}

/// Maps remote field type names to SQL type information.
///
/// Lookup is case-insensitive and total: names the registry has never heard
/// of resolve to a fixed varchar default instead of failing, so metadata
/// projection keeps working when the service grows new field types.
#[derive(Debug, Clone)]
pub struct TypeRegistry {
    entries: HashMap<String, TypeInfo>,
    fallback: TypeInfo,
}

impl TypeRegistry {
    /// Registry preloaded with the standard field types of the service.
    #[must_use]
    pub fn builtin() -> Self {
        let table: &[(&str, i32, u32)] = &[
            ("id", sql_type::VARCHAR, 18),
            ("reference", sql_type::VARCHAR, 18),
            ("string", sql_type::VARCHAR, 255),
            ("encryptedstring", sql_type::VARCHAR, 255),
            ("phone", sql_type::VARCHAR, 40),
            ("url", sql_type::VARCHAR, 255),
            ("email", sql_type::VARCHAR, 128),
            ("combobox", sql_type::VARCHAR, 255),
            ("picklist", sql_type::VARCHAR, 255),
            ("multipicklist", sql_type::VARCHAR, 4099),
            ("address", sql_type::VARCHAR, 255),
            ("anyType", sql_type::VARCHAR, 255),
            ("textarea", sql_type::LONGVARCHAR, 131_072),
            ("boolean", sql_type::BOOLEAN, 1),
            ("int", sql_type::INTEGER, 10),
            ("double", sql_type::DOUBLE, 17),
            ("currency", sql_type::DECIMAL, 18),
            ("percent", sql_type::DECIMAL, 18),
            ("date", sql_type::DATE, 10),
            ("datetime", sql_type::TIMESTAMP, 19),
            ("time", sql_type::TIME, 8),
            ("base64", sql_type::BLOB, 2_147_483_647),
        ];
        let entries = table
            .iter()
            .map(|(name, code, precision)| {
                (name.to_lowercase(), TypeInfo::new(*code, name, *precision))
            })
            .collect();
        Self {
            entries,
            fallback: TypeInfo::new(sql_type::VARCHAR, "string", 255),
        }
    }

    /// Adds or replaces a mapping, e.g. for service-specific custom types.
    pub fn register(&mut self, remote_type: &str, info: TypeInfo) {
        self.entries.insert(remote_type.to_lowercase(), info);
    }

    /// Resolves `remote_type`, falling back to the fixed default for
    /// unrecognized names. Never fails.
    #[must_use]
    pub fn lookup(&self, remote_type: &str) -> &TypeInfo {
        self.entries
            .get(&remote_type.to_lowercase())
            .unwrap_or(&self.fallback)
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

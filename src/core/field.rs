use serde::{Deserialize, Serialize};

/// One projected column of a query, as reported by the query analyzer.
///
/// Relationship-traversal projections (`SELECT Owner.Name, ... FROM Case`)
/// arrive as a [`FieldDef::Group`] named after the relationship, holding the
/// traversed fields in source order. Leaf names are already fully qualified
/// by the analyzer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum FieldDef {
    Leaf {
        name: String,
        /// Remote field type name, e.g. `string`, `datetime`, `reference`.
        field_type: String,
    },
    Group {
        name: String,
        children: Vec<FieldDef>,
    },
}

impl FieldDef {
    pub fn leaf(name: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self::Leaf {
            name: name.into(),
            field_type: field_type.into(),
        }
    }

    pub fn group(name: impl Into<String>, children: Vec<FieldDef>) -> Self {
        Self::Group {
            name: name.into(),
            children,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Leaf { name, .. } | Self::Group { name, .. } => name,
        }
    }
}

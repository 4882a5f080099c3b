use crate::core::{ColumnInfo, FieldDef};
use super::type_info::TypeRegistry;

/// Schema label stamped on every projected column.
pub const SCHEMA_NAME: &str = "Salesforce";

/// Flattens a field-definition tree into (name, remote type) leaves,
/// depth-first and left-to-right.
#[must_use]
pub fn flatten(defs: &[FieldDef]) -> Vec<(&str, &str)> {
    let mut leaves = Vec::new();
    collect_leaves(defs, &mut leaves);
    leaves
}

fn collect_leaves<'a>(defs: &'a [FieldDef], out: &mut Vec<(&'a str, &'a str)>) {
    for def in defs {
        match def {
            FieldDef::Leaf { name, field_type } => out.push((name, field_type)),
            FieldDef::Group { children, .. } => collect_leaves(children, out),
        }
    }
}

/// Projects a field-definition tree into ordered column metadata.
///
/// One column per leaf, ordinals counted from 1 in flattening order. `table`
/// is the source object of the root query and is applied uniformly, also to
/// columns reached through relationship traversal.
#[must_use]
pub fn project_columns(defs: &[FieldDef], table: &str, types: &TypeRegistry) -> Vec<ColumnInfo> {
    flatten(defs)
        .into_iter()
        .enumerate()
        .map(|(i, (name, remote_type))| {
            let info = types.lookup(remote_type);
            ColumnInfo {
                ordinal: i + 1,
                name: name.to_string(),
                label: name.to_string(),
                sql_type: info.sql_type,
                type_name: info.type_name.clone(),
                precision: info.precision,
                schema: SCHEMA_NAME.to_string(),
                table: table.to_string(),
            }
        })
        .collect()
}

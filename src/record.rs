use crate::{Error, FieldDef, Result, Value};
use std::collections::BTreeMap;

/// A value the extractor can derive columns from: either a structured record
/// with a declared field table, or a flat column → value mapping.
///
/// The two variants are the closed set of shapes this layer accepts. A
/// structured record carries its field descriptors in declaration order; a
/// mapping contributes its keys as columns (sorted, since the map is
/// ordered by key) and never yields a primary key.
#[derive(Debug, Clone, Copy)]
pub enum Record<'a> {
    Structured {
        table: &'static str,
        fields: &'a [FieldDef],
    },
    Mapping(&'a BTreeMap<String, Value>),
}

impl<'a> Record<'a> {
    /// Tag-driven extraction: every persisted field contributes its column
    /// unless the column is listed in `skip` (exact, case-sensitive match).
    ///
    /// The primary key is the first field carrying the explicit marker, or
    /// failing that the first field named `ID`; either way its column must
    /// be non-empty to qualify. A structured record with no qualifying
    /// field is an error; a mapping yields `None`.
    pub fn columns(&self, skip: &[&str]) -> Result<(Vec<&'a str>, Option<&'a str>)> {
        match *self {
            Record::Structured { table, fields } => {
                let columns = fields
                    .iter()
                    .filter(|f| !f.column.is_empty() && !skip.contains(&f.column))
                    .map(|f| f.column)
                    .collect();
                let Some(key) = primary_key_of(fields) else {
                    return Err(Error::MissingPrimaryKey { table });
                };
                Ok((columns, Some(key)))
            }
            Record::Mapping(map) => Ok((map.keys().map(String::as_str).collect(), None)),
        }
    }

    /// Explicit-name extraction, used to build UPDATE SET lists: only the
    /// columns of the named declared fields are returned (matched by field
    /// name, not column name), plus the primary key by the same rule as
    /// [`Record::columns`]. Mappings have no declared fields to name.
    pub fn columns_named(&self, names: &[&str]) -> Result<(Vec<&'a str>, &'a str)> {
        match *self {
            Record::Structured { table, fields } => {
                let columns = fields
                    .iter()
                    .filter(|f| !f.column.is_empty() && names.contains(&f.name))
                    .map(|f| f.column)
                    .collect();
                let Some(key) = primary_key_of(fields) else {
                    return Err(Error::MissingPrimaryKey { table });
                };
                Ok((columns, key))
            }
            Record::Mapping(..) => Err(Error::UnsupportedShape(
                "field names can only be resolved on a structured record",
            )),
        }
    }
}

fn primary_key_of(fields: &[FieldDef]) -> Option<&'static str> {
    fields
        .iter()
        .find(|f| f.primary_key && !f.column.is_empty())
        .or_else(|| fields.iter().find(|f| f.name == "ID" && !f.column.is_empty()))
        .map(|f| f.column)
}

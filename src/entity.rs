use crate::{Executor, NamedRow, Record, Result, RowsAffected, ops};
use std::future::Future;

/// Declarative descriptor of one persisted field.
///
/// Entities list one `FieldDef` per declared field, in declaration order.
/// An empty `column` means the field is not persisted at all; such fields
/// still occupy their slot in the table so the declaration order stays
/// visible to the extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    /// Declared field name, e.g. `Name`.
    pub name: &'static str,
    /// Mapped column name, e.g. `name`. Empty means not persisted.
    pub column: &'static str,
    /// Explicit primary-key marker. A field named `ID` is also considered,
    /// but an explicit marker anywhere wins over the name.
    pub primary_key: bool,
}

impl FieldDef {
    pub const fn new(name: &'static str, column: &'static str) -> Self {
        Self {
            name,
            column,
            primary_key: false,
        }
    }

    pub const fn primary_key(name: &'static str, column: &'static str) -> Self {
        Self {
            name,
            column,
            primary_key: true,
        }
    }
}

/// A record type that knows its table and exposes its field descriptor
/// table. Exactly one field per entity must qualify as the primary key for
/// the insert/update operations to accept it.
pub trait Entity {
    /// Table the entity persists into.
    fn table() -> &'static str;

    /// Field descriptor table, in declaration order.
    fn fields() -> &'static [FieldDef];

    /// Current field values, keyed by column name, one entry per persisted
    /// field. Operations bind statement parameters out of this row.
    fn row(&self) -> NamedRow;

    /// The entity viewed as an extractable record shape.
    fn record() -> Record<'static> {
        Record::Structured {
            table: Self::table(),
            fields: Self::fields(),
        }
    }

    fn insert<Exec: Executor>(
        &self,
        executor: &mut Exec,
    ) -> impl Future<Output = Result<RowsAffected>> + Send
    where
        Self: Sized + Sync,
    {
        ops::insert(executor, self)
    }

    fn insert_skip<'a, Exec: Executor>(
        &'a self,
        executor: &'a mut Exec,
        skip: &'a [&'a str],
    ) -> impl Future<Output = Result<RowsAffected>> + Send + 'a
    where
        Self: Sized + Sync,
    {
        ops::insert_skip(executor, self, skip)
    }

    fn update<'a, Exec: Executor>(
        &'a self,
        executor: &'a mut Exec,
        fields: &'a [&'a str],
    ) -> impl Future<Output = Result<RowsAffected>> + Send + 'a
    where
        Self: Sized + Sync,
    {
        ops::update(executor, self, fields)
    }
}

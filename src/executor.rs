use crate::Value;
use futures::stream::Stream;
use std::future::Future;

/// Values of one returned row, in column order.
pub type Row = Box<[Value]>;

/// An entity's field values keyed by column name. Operations pick statement
/// parameters out of this by column.
pub type NamedRow = Box<[(&'static str, Value)]>;

/// Statement parameters, keyed by the placeholder name they bind to.
pub type Params<'a> = &'a [(&'a str, Value)];

/// The execution context this layer runs statements against: a connection,
/// a pooled handle, or a transaction — whatever the caller owns. The layer
/// never constructs or pools these.
///
/// Implementations receive statements whose placeholders are named
/// (`:column`) and a parameter list keyed by those names; how the names map
/// onto the wire protocol is the implementation's business, as are
/// driver-level retries. Errors come back as [`anyhow::Error`] and are
/// wrapped into the typed taxonomy by the calling operation.
pub trait Executor: Send {
    /// Runs a statement and reports the number of rows it affected.
    fn execute(
        &mut self,
        sql: &str,
        params: Params<'_>,
    ) -> impl Future<Output = anyhow::Result<u64>> + Send;

    /// Runs a statement that returns rows (`INSERT .. RETURNING`), yielding
    /// them as they arrive.
    fn fetch(
        &mut self,
        sql: &str,
        params: Params<'_>,
    ) -> impl Stream<Item = anyhow::Result<Row>> + Send;
}

/// Outcome of a mutating statement.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct RowsAffected {
    /// Total number of rows impacted. A successful insert/update always
    /// reports at least 1.
    pub rows_affected: u64,
    /// Generated primary-key value, when the statement returned one. Only
    /// meaningful while `rows_affected` is non-zero.
    pub last_insert_id: Option<Value>,
}

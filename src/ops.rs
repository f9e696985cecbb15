use crate::{
    Entity, Error, Executor, GenericSqlWriter, NamedRow, Params, Result, RowsAffected, SqlWriter,
    Value, truncate_long,
};
use futures::StreamExt;
use std::pin::pin;

/// Inserts the entity with every persisted column included.
pub async fn insert<Exec, E>(executor: &mut Exec, entity: &E) -> Result<RowsAffected>
where
    Exec: Executor,
    E: Entity + Sync,
{
    insert_skip(executor, entity, &[]).await
}

/// Inserts the entity, leaving out the columns listed in `skip` (so the
/// store fills them, e.g. a generated key or a defaulted timestamp).
///
/// The statement runs as `INSERT .. RETURNING <key>`; every returned row is
/// drained, the last returned key value wins, and the number of rows drained
/// is the affected count. Zero returned rows is a failure even when the
/// execution itself reported none.
pub async fn insert_skip<Exec, E>(
    executor: &mut Exec,
    entity: &E,
    skip: &[&str],
) -> Result<RowsAffected>
where
    Exec: Executor,
    E: Entity + Sync,
{
    let (columns, key) = E::record().columns(skip)?;
    let key = key.ok_or(Error::MissingPrimaryKey { table: E::table() })?;
    let mut sql = String::with_capacity(256);
    GenericSqlWriter.write_insert(&mut sql, E::table(), &columns, key);
    let row = entity.row();
    let params = bound_params(&row, &columns, None);
    log::debug!(
        "running insert `{}` with {:?}",
        truncate_long!(sql),
        params
    );
    let mut affected = 0;
    let mut last_insert_id = None;
    {
        let mut rows = pin!(executor.fetch(&sql, &params));
        while let Some(returned) = rows.next().await.transpose().map_err(Error::Execution)? {
            if let Some(value) = returned.first() {
                last_insert_id = Some(value.clone());
            }
            affected += 1;
        }
    }
    if affected == 0 {
        return Err(Error::NoRowsAffected);
    }
    Ok(RowsAffected {
        rows_affected: affected,
        last_insert_id,
    })
}

/// Updates the named declared fields of the entity's row, targeted by its
/// primary key.
///
/// `fields` are declared field names, not column names; they are resolved
/// through the descriptor table, and the primary key resolves even when it
/// is not in the list. An update that touches zero rows (stale key) is
/// reported as [`Error::NoRowsAffected`], never silently ignored.
pub async fn update<Exec, E>(
    executor: &mut Exec,
    entity: &E,
    fields: &[&str],
) -> Result<RowsAffected>
where
    Exec: Executor,
    E: Entity + Sync,
{
    let (columns, key) = E::record().columns_named(fields)?;
    let mut sql = String::with_capacity(256);
    GenericSqlWriter.write_update(&mut sql, E::table(), &columns, key);
    let row = entity.row();
    let params = bound_params(&row, &columns, Some(key));
    log::debug!(
        "running update `{}` with {:?}",
        truncate_long!(sql),
        params
    );
    let rows_affected = executor
        .execute(&sql, &params)
        .await
        .map_err(Error::Execution)?;
    if rows_affected == 0 {
        return Err(Error::NoRowsAffected);
    }
    Ok(RowsAffected {
        rows_affected,
        last_insert_id: None,
    })
}

/// Runs an arbitrary caller-rendered statement, failing with
/// [`Error::NoRowsAffected`] when it touches nothing.
pub async fn exec<Exec>(executor: &mut Exec, sql: &str, params: Params<'_>) -> Result<u64>
where
    Exec: Executor,
{
    log::debug!("running `{}` with {:?}", truncate_long!(sql), params);
    let rows_affected = executor
        .execute(sql, params)
        .await
        .map_err(Error::Execution)?;
    if rows_affected == 0 {
        return Err(Error::NoRowsAffected);
    }
    Ok(rows_affected)
}

/// The subset of the row a statement actually names, in row order. Binding
/// more parameters than the statement has placeholders is a driver error.
fn bound_params(
    row: &NamedRow,
    columns: &[&str],
    key: Option<&str>,
) -> Vec<(&'static str, Value)> {
    row.iter()
        .filter(|(name, _)| {
            columns.iter().any(|c| *c == *name) || key.is_some_and(|k| k == *name)
        })
        .map(|(name, value)| (*name, value.clone()))
        .collect()
}

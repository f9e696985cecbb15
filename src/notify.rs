use crate::{Error, Executor, Result, Value};

/// Channel both the notifier and the listener agree on. Deployments must
/// share this name out of band; there is no negotiation.
pub const CHANNEL: &str = "events";

/// Publishes `payload` on the well-known channel through the store's native
/// notify primitive. Fire-and-forget: no retry, no delivery tracking —
/// at-most-once from this side.
pub async fn notify<Exec>(executor: &mut Exec, payload: &str) -> Result<()>
where
    Exec: Executor,
{
    let sql = format!("select pg_notify('{CHANNEL}', :payload)");
    executor
        .execute(&sql, &[("payload", Value::from(payload))])
        .await
        .map_err(Error::Publish)?;
    Ok(())
}

use crate::{CHANNEL, Error, Result};
use std::future::Future;
use tokio_util::sync::CancellationToken;

/// One inbound event from the store's publish/subscribe channel. Exists only
/// for the duration of its dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Backend process that published the event.
    pub process_id: u32,
    pub channel: String,
    pub payload: String,
}

/// The dedicated connection the listener owns for a whole session.
///
/// While the loop runs, the connection is continuously parked inside `recv`;
/// it must not be shared with any other operation. `recv` must resolve when
/// a notification arrives and error when the connection is lost; dropping
/// the returned future (which the listener does on cancellation) must leave
/// the connection in a sane state for teardown.
pub trait ListenConnection: Send {
    /// Issues a raw command, e.g. the subscribe statement.
    fn execute(&mut self, command: &str) -> impl Future<Output = anyhow::Result<()>> + Send;

    /// Blocks until the next notification arrives.
    fn recv(&mut self) -> impl Future<Output = anyhow::Result<Notification>> + Send;
}

/// Application-side consumer of notifications. Invoked synchronously, one
/// notification at a time, in arrival order.
pub trait NotificationHandler: Send {
    fn handle(&mut self, channel: &str, payload: &str) -> anyhow::Result<()>;
}

impl<F> NotificationHandler for F
where
    F: FnMut(&str, &str) -> anyhow::Result<()> + Send,
{
    fn handle(&mut self, channel: &str, payload: &str) -> anyhow::Result<()> {
        self(channel, payload)
    }
}

/// How a listening session ended, when it ended on purpose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenOutcome {
    /// The cancellation token fired while waiting for a notification.
    Cancelled,
}

/// Subscribes the dedicated connection to the well-known channel and
/// dispatches notifications to `handler` until cancelled.
///
/// The loop is meant to run on its own task: it owns the connection and
/// blocks in `recv` between events. Termination paths:
/// - subscribe failure → [`Error::Subscribe`], the loop never starts;
/// - cancellation, observed only at the blocking wait → `Ok(Cancelled)`;
/// - wait failure (connection loss) → [`Error::Listen`]; no reconnection is
///   attempted, the caller decides whether to listen again.
///
/// A failing handler is reported and swallowed: one bad event never costs
/// the subscription. An in-flight handler invocation is never preempted by
/// cancellation.
pub async fn listen<Conn, Handler>(
    mut connection: Conn,
    mut handler: Handler,
    cancel: CancellationToken,
) -> Result<ListenOutcome>
where
    Conn: ListenConnection,
    Handler: NotificationHandler,
{
    let command = format!("listen {CHANNEL}");
    connection
        .execute(&command)
        .await
        .map_err(|source| Error::Subscribe {
            channel: CHANNEL,
            source,
        })?;
    log::info!("listening for notifications on channel `{CHANNEL}`");
    loop {
        let notification = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                log::info!("notification listener cancelled");
                return Ok(ListenOutcome::Cancelled);
            }
            received = connection.recv() => received.map_err(Error::Listen)?,
        };
        log::debug!(
            "notification pid={} channel={} payload={}",
            notification.process_id,
            notification.channel,
            notification.payload,
        );
        if let Err(e) = handler.handle(&notification.channel, &notification.payload) {
            log::error!("{:#}", Error::Handler(e));
        }
    }
}

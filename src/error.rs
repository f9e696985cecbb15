use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failure taxonomy of the statement layer and the notification bridge.
///
/// Collaborator failures (statement execution, subscription, the blocking
/// notification wait) arrive as [`anyhow::Error`] from the boundary traits
/// and are wrapped here so callers can tell the conditions apart. Nothing in
/// this crate retries: every variant except [`Error::Handler`] propagates to
/// the immediate caller, which owns the retry/backoff decision.
#[derive(Debug, Error)]
pub enum Error {
    /// A structured record declared no usable primary-key field.
    #[error("no primary key declared for table `{table}`")]
    MissingPrimaryKey { table: &'static str },
    /// The operation cannot work on the given record shape.
    #[error("unsupported record shape: {0}")]
    UnsupportedShape(&'static str),
    /// The underlying execution collaborator failed to run a statement.
    #[error("statement execution failed: {0:#}")]
    Execution(anyhow::Error),
    /// A statement ran without error but touched zero rows.
    #[error("statement affected no rows")]
    NoRowsAffected,
    /// The fire-and-forget notification publish failed.
    #[error("failed to publish notification: {0:#}")]
    Publish(anyhow::Error),
    /// The subscribe command failed; the listening session never started.
    #[error("failed to subscribe to channel `{channel}`: {source:#}")]
    Subscribe {
        channel: &'static str,
        source: anyhow::Error,
    },
    /// The blocking notification wait failed; the listening session is over.
    #[error("failed while waiting for a notification: {0:#}")]
    Listen(anyhow::Error),
    /// A notification handler failed. Reported by the listener loop and
    /// swallowed there, never returned to a caller.
    #[error("notification handler failed: {0:#}")]
    Handler(anyhow::Error),
}

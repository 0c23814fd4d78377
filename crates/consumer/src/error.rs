//! Consumer-level errors. Per §7, only connection/channel setup is fatal;
//! everything downstream of a single delivery is absorbed and logged.

#[derive(Debug, thiserror::Error)]
pub enum ConsumerError {
    #[error("amqp error: {0}")]
    Amqp(#[from] lapin::Error),
}

//! Transport abstraction used by the publisher.

use async_trait::async_trait;
use thiserror::Error;

use super::types::QueueName;

/// Failures while constructing a publisher or sending a message.
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("missing configuration value `{0}`")]
    MissingConfiguration(&'static str),

    #[error("queue transport unreachable: {0}")]
    Unreachable(String),

    #[error("send to `{queue}` rejected: {reason}")]
    Rejected { queue: QueueName, reason: String },
}

/// Something that can deliver a text body to a named queue.
///
/// One handle is shared by every concurrent publish, so implementations
/// must be safe to call from many tasks at once.
#[async_trait]
pub trait QueueSender: Send + Sync {
    /// Send `body` to `queue`. Exactly one delivery attempt is made.
    async fn send(&self, queue: QueueName, body: &str) -> Result<(), PublishError>;

    /// Release transport resources.
    async fn close(&self) {}
}

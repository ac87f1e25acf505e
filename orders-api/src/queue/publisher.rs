//! Order id publisher for the payments and notifications queues.

use std::sync::Arc;

use tracing::info;

use super::amqp::AmqpSender;
use super::sender::{PublishError, QueueSender};
use super::types::{QueueMessage, QueueName};
use crate::config::{Config, QUEUE_CONNECTION_STRING};
use crate::orders::OrderId;

/// Publishes order ids to the two outbound queues.
///
/// Each call performs exactly one send and never retries. The two queues are
/// independent: a failure on one says nothing about the other.
#[derive(Clone)]
pub struct QueuePublisher {
    sender: Arc<dyn QueueSender>,
}

impl QueuePublisher {
    /// Publisher over an explicit transport handle.
    pub fn new(sender: impl QueueSender + 'static) -> Self {
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Publisher over AMQP, using the configured connection string.
    ///
    /// Fails when no connection string is configured. The broker itself is
    /// not contacted until the first publish.
    pub fn from_config(config: &Config) -> Result<Self, PublishError> {
        let url = config
            .queue_connection_string
            .as_deref()
            .ok_or(PublishError::MissingConfiguration(QUEUE_CONNECTION_STRING))?;

        info!(url_length = url.len(), "queue_publisher_created");

        Ok(Self::new(AmqpSender::new(url)))
    }

    /// Announce `order_id` on the `payments` queue.
    pub async fn publish_order(&self, order_id: OrderId) -> Result<(), PublishError> {
        self.publish(QueueName::Payments, order_id).await
    }

    /// Announce `order_id` on the `notifications` queue.
    pub async fn publish_notification(&self, order_id: OrderId) -> Result<(), PublishError> {
        self.publish(QueueName::Notifications, order_id).await
    }

    async fn publish(&self, queue: QueueName, order_id: OrderId) -> Result<(), PublishError> {
        let message = QueueMessage::for_order(queue, order_id);

        self.sender.send(message.queue, &message.body).await?;

        info!(
            queue = %queue,
            order_id = order_id,
            body = %message.body,
            "queue_message_published"
        );

        Ok(())
    }

    /// Close the underlying transport gracefully.
    pub async fn close(&self) {
        self.sender.close().await;
    }
}

//! RabbitMQ sender built on lapin.
//!
//! The sender maintains a persistent connection and channel, creating them on
//! first use and again whenever the channel is found disconnected. Both
//! destination queues are declared on every (re)connect.

use std::sync::Arc;

use async_trait::async_trait;
use lapin::{
    options::{BasicPublishOptions, ConfirmSelectOptions, QueueDeclareOptions},
    types::FieldTable,
    BasicProperties, Channel, Connection, ConnectionProperties,
};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use super::sender::{PublishError, QueueSender};
use super::types::QueueName;

/// AMQP [`QueueSender`] publishing to the default exchange.
///
/// Cloning is cheap; clones share the connection.
#[derive(Clone)]
pub struct AmqpSender {
    inner: Arc<AmqpInner>,
}

struct AmqpInner {
    url: String,
    connection: RwLock<Option<Connection>>,
    channel: RwLock<Option<Channel>>,
}

fn unreachable_error(context: &str, error: lapin::Error) -> PublishError {
    PublishError::Unreachable(format!("{context}: {error}"))
}

fn rejected(queue: QueueName, error: impl std::fmt::Display) -> PublishError {
    PublishError::Rejected {
        queue,
        reason: error.to_string(),
    }
}

impl AmqpSender {
    /// Create a sender for the given AMQP URL. No connection is made yet.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(AmqpInner {
                url: url.into(),
                connection: RwLock::new(None),
                channel: RwLock::new(None),
            }),
        }
    }

    /// Ensure we have a valid connection and channel.
    async fn ensure_connected(&self) -> Result<Channel, PublishError> {
        {
            let channel = self.inner.channel.read().await;
            if let Some(ch) = channel.as_ref() {
                if ch.status().connected() {
                    return Ok(ch.clone());
                }
            }
        }

        let mut connection = self.inner.connection.write().await;
        let mut channel = self.inner.channel.write().await;

        // Another task may have reconnected while we waited for the lock
        if let Some(ch) = channel.as_ref() {
            if ch.status().connected() {
                return Ok(ch.clone());
            }
        }

        info!("amqp_sender_connecting");

        let conn = Connection::connect(&self.inner.url, ConnectionProperties::default())
            .await
            .map_err(|e| unreachable_error("failed to connect", e))?;

        let ch = conn
            .create_channel()
            .await
            .map_err(|e| unreachable_error("failed to create channel", e))?;

        ch.confirm_select(ConfirmSelectOptions::default())
            .await
            .map_err(|e| unreachable_error("failed to enable publisher confirms", e))?;

        for queue in QueueName::ALL {
            ch.queue_declare(
                queue.as_str(),
                QueueDeclareOptions {
                    durable: true,
                    ..Default::default()
                },
                FieldTable::default(),
            )
            .await
            .map_err(|e| unreachable_error(&format!("failed to declare queue `{queue}`"), e))?;
        }

        info!(
            payments_queue = QueueName::Payments.as_str(),
            notifications_queue = QueueName::Notifications.as_str(),
            "amqp_sender_connected"
        );

        *connection = Some(conn);
        *channel = Some(ch.clone());

        Ok(ch)
    }
}

#[async_trait]
impl QueueSender for AmqpSender {
    async fn send(&self, queue: QueueName, body: &str) -> Result<(), PublishError> {
        let channel = self.ensure_connected().await?;

        let confirmation = channel
            .basic_publish(
                "",
                queue.as_str(),
                BasicPublishOptions::default(),
                body.as_bytes(),
                BasicProperties::default()
                    .with_delivery_mode(2) // Persistent
                    .with_content_type("text/plain".into()),
            )
            .await
            .map_err(|e| rejected(queue, e))?
            .await
            .map_err(|e| rejected(queue, e))?;

        if confirmation.is_nack() {
            return Err(rejected(queue, "broker returned nack"));
        }

        debug!(queue = %queue, body_length = body.len(), "amqp_message_confirmed");

        Ok(())
    }

    async fn close(&self) {
        let mut connection = self.inner.connection.write().await;
        let mut channel = self.inner.channel.write().await;

        if let Some(ch) = channel.take() {
            if let Err(e) = ch.close(200, "Normal shutdown").await {
                warn!(error = %e, "amqp_channel_close_error");
            }
        }

        if let Some(conn) = connection.take() {
            if let Err(e) = conn.close(200, "Normal shutdown").await {
                warn!(error = %e, "amqp_connection_close_error");
            }
        }

        info!("amqp_sender_closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sender_creation_is_lazy() {
        let sender = AmqpSender::new("amqp://localhost:5672/%2f");
        assert_eq!(Arc::strong_count(&sender.inner), 1);
        assert!(sender.inner.channel.try_read().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unreachable_broker_fails_send() {
        // Port 1 is never an AMQP broker
        let sender = AmqpSender::new("amqp://127.0.0.1:1/%2f");
        let result = sender.send(QueueName::Payments, "MTIz").await;
        assert!(matches!(result, Err(PublishError::Unreachable(_))));
    }

    #[tokio::test]
    async fn test_close_without_connection() {
        let sender = AmqpSender::new("amqp://localhost:5672/%2f");
        sender.close().await;
        assert!(sender.inner.connection.try_read().unwrap().is_none());
    }
}

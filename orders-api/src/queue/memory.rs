//! In-process sender that records messages instead of delivering them.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use tracing::debug;

use super::sender::{PublishError, QueueSender};
use super::types::{QueueMessage, QueueName};

/// Recording [`QueueSender`] for tests and local runs.
///
/// Clones share the same record, so a test can keep one handle while the
/// publisher owns another.
#[derive(Clone, Default)]
pub struct MemorySender {
    inner: Arc<MemoryInner>,
}

#[derive(Default)]
struct MemoryInner {
    sent: Mutex<Vec<QueueMessage>>,
    rejected: Mutex<HashSet<QueueName>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    // A poisoned record is still a valid record.
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MemorySender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every message accepted so far, in send order.
    pub fn sent(&self) -> Vec<QueueMessage> {
        lock(&self.inner.sent).clone()
    }

    /// Messages accepted for a single queue.
    pub fn sent_to(&self, queue: QueueName) -> Vec<QueueMessage> {
        lock(&self.inner.sent)
            .iter()
            .filter(|m| m.queue == queue)
            .cloned()
            .collect()
    }

    /// Make every subsequent send to `queue` fail.
    pub fn reject(&self, queue: QueueName) {
        lock(&self.inner.rejected).insert(queue);
    }
}

#[async_trait]
impl QueueSender for MemorySender {
    async fn send(&self, queue: QueueName, body: &str) -> Result<(), PublishError> {
        if lock(&self.inner.rejected).contains(&queue) {
            return Err(PublishError::Rejected {
                queue,
                reason: "queue configured to reject".to_string(),
            });
        }

        lock(&self.inner.sent).push(QueueMessage {
            queue,
            body: body.to_string(),
        });
        debug!(queue = %queue, body_length = body.len(), "memory_queue_message_recorded");

        Ok(())
    }
}

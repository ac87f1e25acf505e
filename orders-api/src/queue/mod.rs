//! Queue module for outbound order announcements.
//!
//! This module provides:
//! - Destination names and the base64 message format
//! - The `QueueSender` transport abstraction with AMQP and in-memory adapters
//! - `QueuePublisher`, which turns order ids into queue messages
//!
//! ## Architecture
//!
//! ```text
//!                        ┌→ payments queue
//! Order API → Publisher ─┤
//!                        └→ notifications queue
//! ```

pub mod amqp;
pub mod memory;
pub mod publisher;
pub mod sender;
pub mod types;

pub use amqp::AmqpSender;
pub use memory::MemorySender;
pub use publisher::QueuePublisher;
pub use sender::{PublishError, QueueSender};
pub use types::{
    encode_order_id, DecodeError, QueueMessage, QueueName, NOTIFICATIONS_QUEUE, PAYMENTS_QUEUE,
};

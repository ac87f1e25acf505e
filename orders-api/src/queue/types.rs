//! Queue destinations and the message format shared by both queues.
//!
//! Every message body is the standard, padded base64 encoding of the UTF-8
//! decimal representation of an order id, e.g. `123` → `MTIz`. The body is
//! sent as that base64 text and is never wrapped a second time.

use std::fmt;
use std::num::ParseIntError;
use std::string::FromUtf8Error;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use thiserror::Error;

use crate::orders::OrderId;

/// Queue name for payment processing.
pub const PAYMENTS_QUEUE: &str = "payments";

/// Queue name for customer notifications.
pub const NOTIFICATIONS_QUEUE: &str = "notifications";

/// One of the two outbound queue destinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueueName {
    Payments,
    Notifications,
}

impl QueueName {
    /// Every destination, in declaration order.
    pub const ALL: [QueueName; 2] = [QueueName::Payments, QueueName::Notifications];

    pub fn as_str(self) -> &'static str {
        match self {
            QueueName::Payments => PAYMENTS_QUEUE,
            QueueName::Notifications => NOTIFICATIONS_QUEUE,
        }
    }
}

impl fmt::Display for QueueName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors produced when reading a message body back into an order id.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("message body is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("decoded message body is not valid UTF-8: {0}")]
    Utf8(#[from] FromUtf8Error),

    #[error("decoded message body is not an order id: {0}")]
    OrderId(#[from] ParseIntError),
}

/// A single outbound message, built fresh for every publish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueMessage {
    pub queue: QueueName,
    pub body: String,
}

impl QueueMessage {
    /// Build the message announcing `order_id` on `queue`.
    ///
    /// Zero and negative ids are encoded as-is.
    pub fn for_order(queue: QueueName, order_id: OrderId) -> Self {
        Self {
            queue,
            body: encode_order_id(order_id),
        }
    }

    /// Decode the body back to the decimal text it carries.
    pub fn decode_text(&self) -> Result<String, DecodeError> {
        let bytes = STANDARD.decode(&self.body)?;
        Ok(String::from_utf8(bytes)?)
    }

    /// Decode the body back to the order id it carries.
    pub fn order_id(&self) -> Result<OrderId, DecodeError> {
        Ok(self.decode_text()?.parse()?)
    }
}

/// base64(UTF-8(decimal order id)).
pub fn encode_order_id(order_id: OrderId) -> String {
    STANDARD.encode(order_id.to_string())
}

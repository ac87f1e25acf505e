//! Orders API - order management with queue announcements.
//!
//! This library backs the `orders-api` binary:
//! - `orders`: order DTOs and the CRUD service
//! - `queue`: base64 order-id messages published to RabbitMQ
//! - `web`: axum handlers and router
//!
//! ## Architecture
//!
//! ```text
//! HTTP → Router → OrderService
//!                      ↓ (order created)
//!                QueuePublisher → payments / notifications queues
//! ```

pub mod config;
pub mod orders;
pub mod queue;
pub mod web;

// Re-export commonly used types
pub use config::{Config, ConfigError};
pub use orders::{InMemoryOrderService, OrderError, OrderId, OrderService};
pub use queue::{
    AmqpSender, MemorySender, PublishError, QueueMessage, QueueName, QueuePublisher, QueueSender,
    NOTIFICATIONS_QUEUE, PAYMENTS_QUEUE,
};
pub use web::{build_app, build_router, AppState, OrdersApp};

//! Order domain: entity, DTOs and the CRUD service.

pub mod error;
pub mod service;
pub mod types;

pub use error::OrderError;
pub use service::{InMemoryOrderService, OrderService};
pub use types::{AddOrderRequest, Order, OrderId, OrderResponse, OrderStatus, UpdateOrderRequest};

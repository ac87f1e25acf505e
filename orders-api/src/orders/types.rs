//! Order entity and the request/response DTOs exchanged over HTTP.

use serde::{Deserialize, Serialize};

/// Numeric key of an order.
pub type OrderId = i32;

/// Lifecycle state of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Paid,
    Cancelled,
}

/// Stored order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub id: OrderId,
    pub user_id: i32,
    pub game_id: i32,
    /// Price in the smallest currency unit
    pub price_cents: i64,
    pub status: OrderStatus,
}

/// Payload for creating an order.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddOrderRequest {
    pub user_id: i32,
    pub game_id: i32,
    pub price_cents: i64,
}

/// Payload for replacing an existing order.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderRequest {
    pub id: OrderId,
    pub user_id: i32,
    pub game_id: i32,
    pub price_cents: i64,
    /// Left unchanged when omitted
    #[serde(default)]
    pub status: Option<OrderStatus>,
}

/// Order as returned to API callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: OrderId,
    pub user_id: i32,
    pub game_id: i32,
    pub price_cents: i64,
    pub status: OrderStatus,
}

impl From<&Order> for OrderResponse {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id,
            user_id: order.user_id,
            game_id: order.game_id,
            price_cents: order.price_cents,
            status: order.status,
        }
    }
}

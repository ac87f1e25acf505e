//! Order service contract and its in-memory implementation.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::error::OrderError;
use super::types::{AddOrderRequest, Order, OrderId, OrderResponse, OrderStatus, UpdateOrderRequest};

/// CRUD operations over orders.
#[async_trait]
pub trait OrderService: Send + Sync {
    /// List every order, ordered by id.
    async fn list_orders(&self) -> Vec<OrderResponse>;

    /// Fetch one order. Fails with [`OrderError::NotFound`] for unknown ids.
    async fn get_order(&self, id: OrderId) -> Result<OrderResponse, OrderError>;

    /// Create an order in the `pending` state.
    async fn add_order(&self, request: AddOrderRequest) -> Result<OrderResponse, OrderError>;

    /// Replace the mutable fields of an existing order. An omitted status is kept.
    async fn update_order(&self, request: UpdateOrderRequest) -> Result<OrderResponse, OrderError>;

    /// Remove an order. Returns `true` when something was deleted.
    async fn delete_order(&self, id: OrderId) -> bool;
}

/// Process-local order store.
///
/// Ids are handed out sequentially starting at 1 and are never reused.
pub struct InMemoryOrderService {
    store: RwLock<Store>,
}

struct Store {
    orders: BTreeMap<OrderId, Order>,
    next_id: OrderId,
}

impl InMemoryOrderService {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(Store {
                orders: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }
}

impl Default for InMemoryOrderService {
    fn default() -> Self {
        Self::new()
    }
}

fn validate(user_id: i32, game_id: i32, price_cents: i64) -> Result<(), OrderError> {
    if user_id <= 0 {
        return Err(OrderError::Validation(format!("userId must be positive, got {user_id}")));
    }
    if game_id <= 0 {
        return Err(OrderError::Validation(format!("gameId must be positive, got {game_id}")));
    }
    if price_cents < 0 {
        return Err(OrderError::Validation(format!(
            "priceCents must not be negative, got {price_cents}"
        )));
    }
    Ok(())
}

#[async_trait]
impl OrderService for InMemoryOrderService {
    async fn list_orders(&self) -> Vec<OrderResponse> {
        let store = self.store.read().await;
        store.orders.values().map(OrderResponse::from).collect()
    }

    async fn get_order(&self, id: OrderId) -> Result<OrderResponse, OrderError> {
        let store = self.store.read().await;
        store
            .orders
            .get(&id)
            .map(OrderResponse::from)
            .ok_or(OrderError::NotFound(id))
    }

    async fn add_order(&self, request: AddOrderRequest) -> Result<OrderResponse, OrderError> {
        validate(request.user_id, request.game_id, request.price_cents)?;

        let mut store = self.store.write().await;
        let id = store.next_id;
        store.next_id = id
            .checked_add(1)
            .ok_or_else(|| OrderError::Validation("order id space exhausted".to_string()))?;

        let order = Order {
            id,
            user_id: request.user_id,
            game_id: request.game_id,
            price_cents: request.price_cents,
            status: OrderStatus::Pending,
        };
        let response = OrderResponse::from(&order);
        store.orders.insert(id, order);

        info!(order_id = id, user_id = request.user_id, game_id = request.game_id, "order_stored");
        Ok(response)
    }

    async fn update_order(&self, request: UpdateOrderRequest) -> Result<OrderResponse, OrderError> {
        validate(request.user_id, request.game_id, request.price_cents)?;

        let mut store = self.store.write().await;
        let order = store
            .orders
            .get_mut(&request.id)
            .ok_or(OrderError::NotFound(request.id))?;

        order.user_id = request.user_id;
        order.game_id = request.game_id;
        order.price_cents = request.price_cents;
        if let Some(status) = request.status {
            order.status = status;
        }

        debug!(order_id = request.id, status = ?order.status, "order_updated");
        Ok(OrderResponse::from(&*order))
    }

    async fn delete_order(&self, id: OrderId) -> bool {
        let removed = self.store.write().await.orders.remove(&id).is_some();
        debug!(order_id = id, removed, "order_delete_attempted");
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add_request(user_id: i32, game_id: i32, price_cents: i64) -> AddOrderRequest {
        AddOrderRequest {
            user_id,
            game_id,
            price_cents,
        }
    }

    #[tokio::test]
    async fn test_add_assigns_sequential_ids() {
        let service = InMemoryOrderService::new();

        let first = service.add_order(add_request(1, 10, 1999)).await.unwrap();
        let second = service.add_order(add_request(2, 20, 0)).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(first.status, OrderStatus::Pending);
    }

    #[tokio::test]
    async fn test_list_is_ordered_by_id() {
        let service = InMemoryOrderService::new();
        for game_id in [5, 3, 9] {
            service.add_order(add_request(1, game_id, 100)).await.unwrap();
        }

        let ids: Vec<OrderId> = service.list_orders().await.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_get_missing_order() {
        let service = InMemoryOrderService::new();
        assert_eq!(service.get_order(99).await, Err(OrderError::NotFound(99)));
    }

    #[tokio::test]
    async fn test_add_rejects_invalid_requests() {
        let service = InMemoryOrderService::new();

        assert!(matches!(
            service.add_order(add_request(0, 1, 100)).await,
            Err(OrderError::Validation(_))
        ));
        assert!(matches!(
            service.add_order(add_request(1, -4, 100)).await,
            Err(OrderError::Validation(_))
        ));
        assert!(matches!(
            service.add_order(add_request(1, 1, -1)).await,
            Err(OrderError::Validation(_))
        ));
        assert!(service.list_orders().await.is_empty());
    }

    #[tokio::test]
    async fn test_update_replaces_fields() {
        let service = InMemoryOrderService::new();
        let created = service.add_order(add_request(1, 10, 1999)).await.unwrap();

        let updated = service
            .update_order(UpdateOrderRequest {
                id: created.id,
                user_id: 1,
                game_id: 11,
                price_cents: 2499,
                status: Some(OrderStatus::Paid),
            })
            .await
            .unwrap();

        assert_eq!(updated.game_id, 11);
        assert_eq!(updated.price_cents, 2499);
        assert_eq!(updated.status, OrderStatus::Paid);
        assert_eq!(service.get_order(created.id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn test_update_without_status_keeps_current() {
        let service = InMemoryOrderService::new();
        let created = service.add_order(add_request(1, 10, 1999)).await.unwrap();
        service
            .update_order(UpdateOrderRequest {
                id: created.id,
                user_id: 1,
                game_id: 10,
                price_cents: 1999,
                status: Some(OrderStatus::Paid),
            })
            .await
            .unwrap();

        let updated = service
            .update_order(UpdateOrderRequest {
                id: created.id,
                user_id: 1,
                game_id: 10,
                price_cents: 1499,
                status: None,
            })
            .await
            .unwrap();

        assert_eq!(updated.status, OrderStatus::Paid);
        assert_eq!(updated.price_cents, 1499);
    }

    #[tokio::test]
    async fn test_update_missing_order() {
        let service = InMemoryOrderService::new();
        let result = service
            .update_order(UpdateOrderRequest {
                id: 5,
                user_id: 1,
                game_id: 1,
                price_cents: 1,
                status: Some(OrderStatus::Cancelled),
            })
            .await;

        assert_eq!(result, Err(OrderError::NotFound(5)));
    }

    #[tokio::test]
    async fn test_delete_reports_removal() {
        let service = InMemoryOrderService::new();
        let created = service.add_order(add_request(1, 10, 1999)).await.unwrap();

        assert!(service.delete_order(created.id).await);
        assert!(!service.delete_order(created.id).await);
        assert_eq!(
            service.get_order(created.id).await,
            Err(OrderError::NotFound(created.id))
        );
    }

    #[tokio::test]
    async fn test_ids_not_reused_after_delete() {
        let service = InMemoryOrderService::new();
        let first = service.add_order(add_request(1, 10, 100)).await.unwrap();
        service.delete_order(first.id).await;

        let second = service.add_order(add_request(1, 10, 100)).await.unwrap();
        assert_eq!(second.id, 2);
    }
}

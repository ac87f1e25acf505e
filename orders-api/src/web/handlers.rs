//! HTTP endpoint handlers.
//!
//! Order creation is the only handler that touches the queues: after the
//! order is stored, its id is published to `payments` and `notifications`.

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::{Method, StatusCode, Uri},
    Json,
};
use futures::future;
use tracing::{error, info, warn};

use crate::orders::{AddOrderRequest, OrderId, OrderResponse, OrderService, UpdateOrderRequest};
use crate::queue::QueuePublisher;
use crate::web::error::{ApiError, ErrorResponse};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub orders: Arc<dyn OrderService>,
    pub publisher: QueuePublisher,
}

impl AppState {
    pub fn new(orders: Arc<dyn OrderService>, publisher: QueuePublisher) -> Self {
        Self { orders, publisher }
    }
}

// =============================================================================
// Health Check
// =============================================================================

/// Liveness check. 200 with an empty body.
pub async fn health() -> StatusCode {
    StatusCode::OK
}

// =============================================================================
// Fallbacks
// =============================================================================

/// Paths with no route.
pub async fn not_found(uri: Uri) -> ErrorResponse {
    ErrorResponse::new(
        StatusCode::NOT_FOUND,
        "not_found",
        format!("no route for {}", uri.path()),
    )
}

/// Known paths requested with an unsupported method.
pub async fn method_not_allowed(method: Method, uri: Uri) -> ErrorResponse {
    ErrorResponse::new(
        StatusCode::METHOD_NOT_ALLOWED,
        "method_not_allowed",
        format!("{method} is not allowed on {}", uri.path()),
    )
}

// =============================================================================
// Orders
// =============================================================================

pub async fn list_orders(State(state): State<AppState>) -> Json<Vec<OrderResponse>> {
    Json(state.orders.list_orders().await)
}

pub async fn get_order(
    State(state): State<AppState>,
    path: Result<Path<OrderId>, PathRejection>,
) -> Result<Json<OrderResponse>, ApiError> {
    let Path(id) = path?;
    Ok(Json(state.orders.get_order(id).await?))
}

/// Create an order, then announce it on both queues.
///
/// The publishes run concurrently and are reported independently. If either
/// fails the caller gets a 500, but the stored order is kept.
pub async fn add_order(
    State(state): State<AppState>,
    payload: Result<Json<AddOrderRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<OrderResponse>), ApiError> {
    let Json(request) = payload?;

    info!(
        user_id = request.user_id,
        game_id = request.game_id,
        price_cents = request.price_cents,
        "order_create_received"
    );

    let order = state.orders.add_order(request).await?;

    let (payment, notification) = future::join(
        state.publisher.publish_order(order.id),
        state.publisher.publish_notification(order.id),
    )
    .await;

    if let Err(e) = &payment {
        error!(order_id = order.id, error = %e, "order_payment_publish_failed");
    }
    if let Err(e) = &notification {
        error!(order_id = order.id, error = %e, "order_notification_publish_failed");
    }
    payment?;
    notification?;

    info!(order_id = order.id, "order_created");

    Ok((StatusCode::CREATED, Json(order)))
}

pub async fn update_order(
    State(state): State<AppState>,
    payload: Result<Json<UpdateOrderRequest>, JsonRejection>,
) -> Result<Json<OrderResponse>, ApiError> {
    let Json(request) = payload?;
    let order = state.orders.update_order(request).await?;

    info!(order_id = order.id, status = ?order.status, "order_updated");

    Ok(Json(order))
}

/// Delete an order. The body is `true` on success, `false` with 404 otherwise.
pub async fn delete_order(
    State(state): State<AppState>,
    path: Result<Path<OrderId>, PathRejection>,
) -> Result<(StatusCode, Json<bool>), ApiError> {
    let Path(id) = path?;

    if state.orders.delete_order(id).await {
        info!(order_id = id, "order_deleted");
        Ok((StatusCode::OK, Json(true)))
    } else {
        warn!(order_id = id, "order_delete_not_found");
        Ok((StatusCode::NOT_FOUND, Json(false)))
    }
}

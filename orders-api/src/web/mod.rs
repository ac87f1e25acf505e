//! HTTP surface of the orders API.
//!
//! - `GET /Health` liveness check
//! - `/Order` CRUD routes backed by an `OrderService`
//!
//! Route roots match in any casing, and unmatched requests get the same
//! JSON error body as handler failures.
//!
//! Creating an order announces its id on the payments and notifications
//! queues through the shared `QueuePublisher`.

pub mod error;
pub mod handlers;
pub mod router;

pub use error::{panic_response, ApiError, ErrorResponse};
pub use handlers::{
    add_order, delete_order, get_order, health, list_orders, method_not_allowed, not_found,
    update_order, AppState,
};
pub use router::{build_app, build_router, OrdersApp};

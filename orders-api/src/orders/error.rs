use thiserror::Error;

use super::types::OrderId;

/// Failures of [`OrderService`](super::OrderService) operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OrderError {
    #[error("order {0} not found")]
    NotFound(OrderId),

    #[error("invalid order: {0}")]
    Validation(String),
}

//! Error payloads returned by the HTTP API.

use std::any::Any;

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

use crate::orders::OrderError;
use crate::queue::PublishError;

/// Body of every error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: u16,
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(status: StatusCode, error: &str, message: impl Into<String>) -> Self {
        Self {
            status: status.as_u16(),
            error: error.to_string(),
            message: message.into(),
        }
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

/// Handler failure, mapped onto a status code and [`ErrorResponse`].
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Order(#[from] OrderError),

    #[error(transparent)]
    Publish(#[from] PublishError),

    /// Request could not be extracted; carries the extractor's status.
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Order(OrderError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Order(OrderError::Validation(_)) => StatusCode::BAD_REQUEST,
            ApiError::Rejected { status, .. } => *status,
            ApiError::Publish(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            ApiError::Order(OrderError::NotFound(_)) => "not_found",
            ApiError::Order(OrderError::Validation(_)) => "validation",
            ApiError::Rejected { status, .. } => rejection_kind(*status),
            ApiError::Publish(_) => "publish_failed",
        }
    }
}

fn rejection_kind(status: StatusCode) -> &'static str {
    match status.as_u16() {
        413 => "payload_too_large",
        415 => "unsupported_media_type",
        422 => "unprocessable_entity",
        _ => "bad_request",
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        ErrorResponse::new(self.status(), self.kind(), self.to_string()).into_response()
    }
}

/// Turn a handler panic into a 500 response with the usual error body.
///
/// Used with `tower_http::catch_panic::CatchPanicLayer::custom`.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    error!(panic = %detail, "request_handler_panicked");

    ErrorResponse::new(
        StatusCode::INTERNAL_SERVER_ERROR,
        "internal",
        "internal server error",
    )
    .into_response()
}

//! HTTP-facing errors and their JSON rendering.
//!
//! Every failure leaves the server as `{"error": "<message>"}` with the
//! status from [`ApiError::status`]. Store `NotFound` is folded into
//! [`ApiError::NotFound`] on conversion so it renders as 404, not 500.
//! The request logger reports the status; the message is only logged at
//! `debug`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use todo_core::{StoreError, TodoId};

/// JSON error envelope.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    /// The request body was not a JSON `{"item": string}` object.
    #[error("{0}")]
    InvalidBody(String),

    #[error("Item cannot be empty")]
    EmptyItem,

    #[error("Invalid todo id")]
    InvalidId,

    #[error("Todo with id {0} not found")]
    NotFound(TodoId),

    #[error("Method not allowed")]
    MethodNotAllowed,

    /// No route matched the request path.
    #[error("Not found")]
    UnknownRoute,

    /// The store could not be reached by the health check.
    #[error("{0}")]
    Unavailable(String),

    #[error(transparent)]
    Store(StoreError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidBody(_) | ApiError::EmptyItem | ApiError::InvalidId => {
                StatusCode::BAD_REQUEST
            }
            ApiError::NotFound(_) | ApiError::UnknownRoute => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { id } => ApiError::NotFound(id),
            other => ApiError::Store(other),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::InvalidBody(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::debug!(status = status.as_u16(), error = %self, "request failed");
        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

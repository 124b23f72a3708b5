//! Route handlers for the `/todo` collection and `/todo/{id}` item endpoints.
//!
//! Validation (body shape, empty item, numeric id) happens here, before the
//! store is touched. Store results are translated by `ApiError`.

use axum::body::Bytes;
use axum::extract::{FromRequestParts, Path, State};
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use todo_core::{SharedStore, Todo, TodoId, TodoItem};

use crate::error::ApiError;

/// `Allow` header value for `/todo`.
pub const COLLECTION_ALLOW: &str = "GET, POST, DELETE";

/// `Allow` header value for `/todo/{id}`.
pub const ITEM_ALLOW: &str = "GET, PUT, DELETE";

pub const CLEARED: &str = "Todo cleared successfully";
pub const DELETED: &str = "Todo deleted successfully";

/// JSON success envelope for delete and clear.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    pub message: String,
}

impl Message {
    fn new(message: &str) -> Json<Self> {
        Json(Self {
            message: message.to_string(),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthResponse {
    pub status: String,
    pub todos: usize,
}

/// Decode a `{"item": string}` body and reject an empty item.
///
/// The body is parsed regardless of the request's `Content-Type`.
pub fn decode_item(body: &[u8]) -> Result<TodoItem, ApiError> {
    let input: TodoItem = serde_json::from_slice(body)?;
    if input.is_empty() {
        return Err(ApiError::EmptyItem);
    }
    Ok(input)
}

pub fn parse_id(raw: &str) -> Result<TodoId, ApiError> {
    raw.parse().map_err(|_| ApiError::InvalidId)
}

/// The todo id taken from everything after `/todo/`.
///
/// A missing segment, a segment that is not UTF-8, and a non-integer all
/// reject with `ApiError::InvalidId`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemId(pub TodoId);

impl<S> FromRequestParts<S> for ItemId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::InvalidId)?;
        parse_id(&raw).map(ItemId)
    }
}

// ---------------------------------------------------------------------------
// /todo
// ---------------------------------------------------------------------------

pub async fn list_todos(State(store): State<SharedStore>) -> Result<Json<Vec<Todo>>, ApiError> {
    Ok(Json(store.list().await?))
}

pub async fn create_todo(
    State(store): State<SharedStore>,
    body: Bytes,
) -> Result<(StatusCode, Json<Todo>), ApiError> {
    let input = decode_item(&body)?;
    let todo = store.create(input.item).await?;
    tracing::debug!(id = todo.id, "created todo");
    Ok((StatusCode::CREATED, Json(todo)))
}

pub async fn clear_todos(State(store): State<SharedStore>) -> Result<Json<Message>, ApiError> {
    store.clear().await?;
    Ok(Message::new(CLEARED))
}

// ---------------------------------------------------------------------------
// /todo/{id}
// ---------------------------------------------------------------------------

pub async fn get_todo(
    State(store): State<SharedStore>,
    ItemId(id): ItemId,
) -> Result<Json<Todo>, ApiError> {
    Ok(Json(store.get(id).await?))
}

pub async fn update_todo(
    State(store): State<SharedStore>,
    ItemId(id): ItemId,
    body: Bytes,
) -> Result<Json<Todo>, ApiError> {
    let input = decode_item(&body)?;
    let todo = store.update(id, input.item).await?;
    tracing::debug!(id, "updated todo");
    Ok(Json(todo))
}

pub async fn delete_todo(
    State(store): State<SharedStore>,
    ItemId(id): ItemId,
) -> Result<Json<Message>, ApiError> {
    if !store.delete(id).await? {
        return Err(ApiError::NotFound(id));
    }
    tracing::debug!(id, "deleted todo");
    Ok(Message::new(DELETED))
}

// ---------------------------------------------------------------------------
// Fallbacks and health
// ---------------------------------------------------------------------------

pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

/// 405 for `/todo/{id}`, but only once the id itself is valid.
pub async fn item_method_not_allowed(ItemId(_): ItemId) -> ApiError {
    ApiError::MethodNotAllowed
}

pub async fn unknown_route() -> ApiError {
    ApiError::UnknownRoute
}

pub async fn health(State(store): State<SharedStore>) -> Result<Json<HealthResponse>, ApiError> {
    let todos = store
        .count()
        .await
        .map_err(|e| ApiError::Unavailable(e.to_string()))?;
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        todos,
    }))
}

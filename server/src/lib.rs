//! HTTP front end for the todo service.
//!
//! # Overview
//! `/todo` lists, creates and clears todos; `/todo/{id}` reads, replaces and
//! deletes one. Both endpoints answer every method: unsupported ones get a
//! JSON 405, and every response carries `Content-Type: application/json`
//! plus the endpoint's `Allow` list.
//!
//! # Design
//! - Handlers depend only on `SharedStore`; the backend is picked by the
//!   caller of [`app`].
//! - [`logging::log_requests`] wraps the whole router so each request is
//!   logged exactly once with its final status.

use std::convert::Infallible;
use std::future::Future;
use std::net::SocketAddr;

use axum::http::{header, HeaderValue};
use axum::routing::{get, MethodRouter};
use axum::{middleware, Router};
use todo_core::SharedStore;
use tokio::net::TcpListener;
use tower_http::set_header::SetResponseHeaderLayer;

pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;

pub use config::{Config, StoreKind};
pub use error::{ApiError, ErrorBody};
pub use handlers::{HealthResponse, Message};

use handlers::{
    clear_todos, create_todo, delete_todo, get_todo, health, item_method_not_allowed,
    list_todos, method_not_allowed, unknown_route, update_todo, COLLECTION_ALLOW, ITEM_ALLOW,
};

/// Build the router over `store`, wrapped in the request logger.
///
/// Everything below `/todo/` belongs to the item endpoint, so `/todo/`,
/// `/todo/1/2` and `/todo/abc` all answer `400 Invalid todo id` whatever
/// the method. HEAD is registered explicitly because axum would otherwise
/// serve it from the GET handler.
pub fn app(store: SharedStore) -> Router {
    let collection = get(list_todos)
        .head(method_not_allowed)
        .post(create_todo)
        .delete(clear_todos)
        .fallback(method_not_allowed);
    let item = json_endpoint(
        get(get_todo)
            .head(item_method_not_allowed)
            .put(update_todo)
            .delete(delete_todo)
            .fallback(item_method_not_allowed),
        ITEM_ALLOW,
    );

    Router::new()
        .route("/todo", json_endpoint(collection, COLLECTION_ALLOW))
        .route("/todo/", item.clone())
        .route("/todo/{*id}", item)
        .route("/health", get(health))
        .fallback(unknown_route)
        .layer(middleware::from_fn(logging::log_requests))
        .with_state(store)
}

/// Stamp the JSON content type and the endpoint's `Allow` list on every
/// response, including errors and the 405 fallback.
fn json_endpoint(
    route: MethodRouter<SharedStore>,
    allow: &'static str,
) -> MethodRouter<SharedStore> {
    route
        .layer::<_, Infallible>(SetResponseHeaderLayer::overriding(
            header::ALLOW,
            HeaderValue::from_static(allow),
        ))
        .layer::<_, Infallible>(SetResponseHeaderLayer::overriding(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        ))
}

/// Serve `store` on `listener` until the process exits.
pub async fn run(listener: TcpListener, store: SharedStore) -> Result<(), std::io::Error> {
    run_until(listener, store, std::future::pending()).await
}

/// Serve until `shutdown` resolves, then drain in-flight requests.
pub async fn run_until<F>(
    listener: TcpListener,
    store: SharedStore,
    shutdown: F,
) -> Result<(), std::io::Error>
where
    F: Future<Output = ()> + Send + 'static,
{
    let service = app(store).into_make_service_with_connect_info::<SocketAddr>();
    axum::serve(listener, service)
        .with_graceful_shutdown(shutdown)
        .await
}

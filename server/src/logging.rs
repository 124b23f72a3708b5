//! Request logging and status capture.
//!
//! [`log_requests`] wraps the whole router and emits one structured event per
//! request after the handler returns. The status it reports comes from a
//! [`StatusCapture`] that decorates the inner dispatch.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU16, Ordering};
use std::sync::Arc;
use std::time::Instant;

use axum::extract::{ConnectInfo, Request};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::Response;
use tracing_subscriber::EnvFilter;

/// Initialize the tracing subscriber with the given default log level.
///
/// `RUST_LOG` wins over `default_level` when set.
pub fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

/// Records the status code of the response produced for one request.
///
/// Clones share the same slot. Reads `200 OK` until a response is observed.
#[derive(Debug, Clone)]
pub struct StatusCapture {
    status: Arc<AtomicU16>,
}

impl StatusCapture {
    pub fn new() -> Self {
        Self {
            status: Arc::new(AtomicU16::new(StatusCode::OK.as_u16())),
        }
    }

    pub fn record(&self, status: StatusCode) {
        self.status.store(status.as_u16(), Ordering::Release);
    }

    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.status.load(Ordering::Acquire)).unwrap_or(StatusCode::OK)
    }

    /// Await `inner`, record the status it commits, and pass the response on
    /// untouched. The body is neither read nor buffered.
    pub async fn observe<F>(&self, inner: F) -> Response
    where
        F: Future<Output = Response>,
    {
        let response = inner.await;
        self.record(response.status());
        response
    }
}

impl Default for StatusCapture {
    fn default() -> Self {
        Self::new()
    }
}

/// Middleware emitting one log line per request.
pub async fn log_requests(req: Request, next: Next) -> Response {
    let started = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_owned();
    let remote = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_else(|| "unknown".to_owned());

    let capture = StatusCapture::new();
    let response = capture.observe(next.run(req)).await;

    let status = capture.status().as_u16();
    let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
    if capture.status().is_server_error() {
        tracing::error!(%remote, %method, %path, status, elapsed_ms, "request");
    } else if capture.status().is_client_error() {
        tracing::warn!(%remote, %method, %path, status, elapsed_ms, "request");
    } else {
        tracing::info!(%remote, %method, %path, status, elapsed_ms, "request");
    }

    response
}

//! Shared state and service-level HTTP handlers.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use axum::{
    extract::{ws::WebSocketUpgrade, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use tracing::warn;

use crate::grapes::GrapeStore;
use crate::hub::{serve_client, GrapeHub, GrapeNotifier};

/// Application state shared with handlers.
///
/// Collaborators are passed in explicitly; handlers only see the traits.
#[derive(Clone)]
pub struct AppState {
    /// Grape storage.
    pub store: Arc<dyn GrapeStore>,
    /// Change notifications.
    pub notifier: Arc<dyn GrapeNotifier>,
    /// Hub that WebSocket clients subscribe to.
    pub hub: GrapeHub,
    /// Host used for links when a request has no `Host` header.
    pub public_host: Arc<str>,
    /// Whether the server is accepting traffic.
    pub ready: Arc<AtomicBool>,
    /// Prometheus render handle, if a recorder is installed.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create new app state from its collaborators.
    pub fn new(store: Arc<dyn GrapeStore>, notifier: Arc<dyn GrapeNotifier>, hub: GrapeHub) -> Self {
        Self {
            store,
            notifier,
            hub,
            public_host: Arc::from("localhost:8080"),
            ready: Arc::new(AtomicBool::new(false)),
            metrics: None,
        }
    }

    /// State where the hub itself delivers notifications.
    pub fn with_hub(store: Arc<dyn GrapeStore>, hub: GrapeHub) -> Self {
        let notifier: Arc<dyn GrapeNotifier> = Arc::new(hub.clone());
        Self::new(store, notifier, hub)
    }

    /// Set the fallback host for links.
    pub fn with_public_host(mut self, host: impl Into<String>) -> Self {
        self.public_host = Arc::from(host.into());
        self
    }

    /// Attach a Prometheus handle for `/metrics`.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    /// Set ready state.
    pub fn set_ready(&self, ready: bool) {
        self.ready.store(ready, Ordering::SeqCst);
    }

    /// Check if ready.
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }

    /// Host to put in links: the request's `Host` header, else the
    /// configured public host.
    pub fn link_host<'a>(&'a self, headers: &'a HeaderMap) -> &'a str {
        headers
            .get(header::HOST)
            .and_then(|v| v.to_str().ok())
            .filter(|h| !h.is_empty())
            .unwrap_or(&*self.public_host)
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Status: "ok".
    pub status: &'static str,
}

/// Readiness check response.
#[derive(Debug, Serialize)]
pub struct ReadyResponse {
    /// Whether service is ready.
    pub ready: bool,
}

/// Status response.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    /// Service status.
    pub status: &'static str,
    /// Stored grapes, if the store answered.
    pub grapes: Option<usize>,
    /// Connected hub clients.
    pub hub_clients: usize,
}

/// Health check handler - always returns 200.
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse { status: "ok" })
}

/// Readiness check handler - returns 200 if ready, 503 otherwise.
pub async fn ready(State(state): State<AppState>) -> impl IntoResponse {
    let is_ready = state.is_ready();
    let response = ReadyResponse { ready: is_ready };

    if is_ready {
        (StatusCode::OK, Json(response))
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, Json(response))
    }
}

/// Status handler - returns service status and counts.
pub async fn status(State(state): State<AppState>) -> impl IntoResponse {
    let grapes = match state.store.count().await {
        Ok(count) => Some(count),
        Err(e) => {
            warn!(error = %e, "Status could not count grapes");
            None
        }
    };

    let status = if state.is_ready() { "running" } else { "starting" };

    Json(StatusResponse {
        status,
        grapes,
        hub_clients: state.hub.client_count(),
    })
}

/// Prometheus exposition.
pub async fn metrics_text(State(state): State<AppState>) -> Response {
    match &state.metrics {
        Some(handle) => (StatusCode::OK, handle.render()).into_response(),
        None => (StatusCode::NOT_FOUND, "Metrics recorder not installed").into_response(),
    }
}

/// Upgrade to a hub WebSocket session.
pub async fn grape_hub_socket(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    let hub = state.hub.clone();
    ws.on_upgrade(move |socket| serve_client(socket, hub))
}

//! HTTP API route definitions.

use axum::{
    routing::{delete, get},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::docs::ApiDoc;
use super::grapes::{add_grape, delete_grape, list_grapes};
use super::handlers::{grape_hub_socket, health, metrics_text, ready, status, AppState};

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health endpoints
        .route("/health", get(health))
        .route("/ready", get(ready))
        .route("/metrics", get(metrics_text))
        // Status endpoint
        .route("/api/v1/status", get(status))
        // Grape collection
        .route("/api/v1/hateoas-grapes", get(list_grapes).post(add_grape))
        .route("/api/v1/hateoas-grapes/", get(list_grapes).post(add_grape))
        .route("/api/v1/hateoas-grapes/:id", delete(delete_grape))
        // Change hub
        .route("/hubs/grapes", get(grape_hub_socket))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Wrap `router` in a CORS layer allowing any origin when `permissive`.
pub fn with_cors(router: Router, permissive: bool) -> Router {
    if permissive {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}

//! HATEOAS grape collection endpoints.
//!
//! Each handler runs its steps in order (store, then notify) and stops at
//! the first failure. Failures are logged with full detail and answered
//! with a fixed 500 message.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tracing::{error, info, instrument};

use crate::error::GrapeServiceError;
use crate::grapes::Grape;
use crate::hateoas::{grapes_base_url, to_envelope, Envelope};
use crate::metrics::{self, LatencyTimer};

use super::handlers::AppState;

/// Body of a successful create.
pub const CREATED_MESSAGE: &str = "Grape created";
/// Body of a failed create.
pub const CREATE_FAILED_MESSAGE: &str = "Server error";
/// Body of a failed list or delete.
pub const FAILED_MESSAGE: &str = "Failed";

/// Create a new grape.
#[utoipa::path(
    post,
    path = "/api/v1/hateoas-grapes/",
    tag = "grapes",
    request_body = Grape,
    responses(
        (status = 201, description = "Grape is created", body = String),
        (status = 500, description = "Internal Server Error", body = String)
    )
)]
#[instrument(skip_all)]
pub async fn add_grape(State(state): State<AppState>, Json(grape): Json<Grape>) -> Response {
    let _timer = LatencyTimer::new("add_grape");

    match create_and_notify(&state, grape).await {
        Ok(()) => (StatusCode::CREATED, CREATED_MESSAGE).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to create grape.");
            operation_failed("add_grape", CREATE_FAILED_MESSAGE)
        }
    }
}

/// Get all the grapes, with links.
#[utoipa::path(
    get,
    path = "/api/v1/hateoas-grapes/",
    tag = "grapes",
    responses(
        (status = 200, description = "Returns a list of grapes", body = Envelope<Vec<Grape>>),
        (status = 500, description = "Internal Server Error", body = String)
    )
)]
#[instrument(skip_all)]
pub async fn list_grapes(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let _timer = LatencyTimer::new("list_grapes");

    match state.store.list_all().await {
        Ok(grapes) => {
            info!(count = grapes.len(), "Grapes are fetched.");
            let base_url = grapes_base_url(state.link_host(&headers));
            (StatusCode::OK, Json(to_envelope(&base_url, grapes))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to retrieve grapes.");
            operation_failed("list_grapes", FAILED_MESSAGE)
        }
    }
}

/// Delete a grape.
#[utoipa::path(
    delete,
    path = "/api/v1/hateoas-grapes/{id}",
    tag = "grapes",
    params(("id" = i32, Path, description = "grape id")),
    responses(
        (status = 200, description = "Deletion is ok"),
        (status = 500, description = "Internal Server Error", body = String)
    )
)]
#[instrument(skip_all, fields(id = id))]
pub async fn delete_grape(State(state): State<AppState>, Path(id): Path<i32>) -> Response {
    let _timer = LatencyTimer::new("delete_grape");

    match delete_and_notify(&state, id).await {
        Ok(()) => {
            info!("Grape with id:{} is deleted.", id);
            StatusCode::OK.into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to delete grape.");
            operation_failed("delete_grape", FAILED_MESSAGE)
        }
    }
}

async fn create_and_notify(state: &AppState, grape: Grape) -> Result<(), GrapeServiceError> {
    state.store.create(grape).await?;
    metrics::inc_grapes_created();
    state.notifier.broadcast_grape_changed().await?;
    Ok(())
}

async fn delete_and_notify(state: &AppState, id: i32) -> Result<(), GrapeServiceError> {
    state.store.delete_by_id(id).await?;
    metrics::inc_grapes_deleted();
    state.notifier.broadcast_grape_changed().await?;
    Ok(())
}

fn operation_failed(operation: &'static str, message: &'static str) -> Response {
    metrics::inc_operations_failed(operation);
    (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
}

//! OpenAPI document for the grape endpoints.

use utoipa::OpenApi;

use crate::grapes::Grape;
use crate::hateoas::Link;

use super::grapes;

/// Generated OpenAPI description, served under `/api-docs/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    info(title = "grape-hub", description = "HATEOAS grape collection"),
    paths(grapes::add_grape, grapes::list_grapes, grapes::delete_grape),
    components(schemas(Grape, Link)),
    tags((name = "grapes", description = "Grape CRUD with hypermedia links"))
)]
pub struct ApiDoc;

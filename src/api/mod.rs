//! HTTP API: the grape collection plus health, status, metrics and hub
//! endpoints.

pub mod docs;
pub mod grapes;
pub mod handlers;
pub mod routes;

pub use handlers::AppState;
pub use routes::{create_router, with_cors};

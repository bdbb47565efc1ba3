//! HATEOAS grape API with a real-time change hub.
//!
//! A small CRUD surface over a single "grape" resource. Reads come back
//! wrapped in an envelope carrying navigation links; every successful
//! mutation is announced to connected WebSocket clients.
//!
//! ```text
//! POST   /api/v1/hateoas-grapes/      201 "Grape created"  → broadcast
//! GET    /api/v1/hateoas-grapes/      200 {data, links}
//! DELETE /api/v1/hateoas-grapes/{id}  200                  → broadcast
//! GET    /hubs/grapes                 WebSocket: {"event":"grape_changed"}
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`grapes`]: Grape record and storage collaborator
//! - [`hub`]: Change notification collaborator and WebSocket hub
//! - [`hateoas`]: Link and envelope construction
//! - [`api`]: HTTP handlers and routes
//! - [`metrics`]: Prometheus metrics
//! - [`utils`]: Utility functions

pub mod api;
pub mod config;
pub mod error;
pub mod grapes;
pub mod hateoas;
pub mod hub;
pub mod metrics;
pub mod utils;

pub use config::Config;
pub use error::{AppError, Result};

//! Unified error types for the grape service.

use thiserror::Error;

/// Process-level error type (startup, configuration, binding).
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Configuration loaded but failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Prometheus recorder could not be installed.
    #[error("metrics error: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Grape storage errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No grape with the given id exists.
    #[error("grape {id} not found")]
    NotFound {
        /// The missing id.
        id: i32,
    },

    /// A grape with the given id already exists.
    #[error("grape {id} already exists")]
    Conflict {
        /// The duplicated id.
        id: i32,
    },

    /// The backing store could not serve the request.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Change notification errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotifyError {
    /// The event could not be handed to the push transport.
    #[error("broadcast failed: {0}")]
    BroadcastFailed(String),
}

/// Any failure while serving a grape request.
///
/// Handlers log this and answer with an opaque 500; the detail never
/// reaches the caller.
#[derive(Error, Debug)]
pub enum GrapeServiceError {
    /// Storage collaborator failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Notification collaborator failed.
    #[error(transparent)]
    Notify(#[from] NotifyError),
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, AppError>;

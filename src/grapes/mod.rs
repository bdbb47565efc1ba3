//! Grape records and their storage.
//!
//! This module handles:
//! - The grape record type
//! - The storage trait the HTTP handlers call
//! - An in-memory store used by the binary
//! - A mock store for testing

pub mod mock;
pub mod store;
pub mod types;

pub use mock::{MockGrapeStore, MockStoreConfig};
pub use store::{GrapeStore, InMemoryGrapeStore};
pub use types::Grape;

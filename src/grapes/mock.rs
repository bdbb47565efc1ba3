//! Mock grape store for unit and integration testing.
//!
//! Records every call and can be told to fail individual operations.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::StoreError;

use super::store::GrapeStore;
use super::types::Grape;

/// Configuration for mock store behavior.
#[derive(Debug, Clone, Default)]
pub struct MockStoreConfig {
    /// Whether to fail create requests.
    pub fail_create: bool,
    /// Whether to fail list requests.
    pub fail_list: bool,
    /// Whether to fail delete requests.
    pub fail_delete: bool,
}

/// Mock grape store.
#[derive(Debug, Clone, Default)]
pub struct MockGrapeStore {
    config: MockStoreConfig,
    grapes: Arc<Mutex<Vec<Grape>>>,
    created: Arc<Mutex<Vec<Grape>>>,
    deleted: Arc<Mutex<Vec<i32>>>,
}

impl MockGrapeStore {
    /// Create a mock store that succeeds at everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock store with custom configuration.
    pub fn with_config(config: MockStoreConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Create a mock store whose every operation fails.
    pub fn failing() -> Self {
        Self::with_config(MockStoreConfig {
            fail_create: true,
            fail_list: true,
            fail_delete: true,
        })
    }

    /// Seed the grapes returned by `list_all`.
    pub fn set_grapes(&self, grapes: Vec<Grape>) {
        *self.grapes.lock().unwrap() = grapes;
    }

    /// Grapes passed to `create`, successful or not.
    pub fn created(&self) -> Vec<Grape> {
        self.created.lock().unwrap().clone()
    }

    /// Ids passed to `delete_by_id`, successful or not.
    pub fn deleted(&self) -> Vec<i32> {
        self.deleted.lock().unwrap().clone()
    }
}

#[async_trait]
impl GrapeStore for MockGrapeStore {
    async fn create(&self, grape: Grape) -> Result<(), StoreError> {
        self.created.lock().unwrap().push(grape.clone());

        if self.config.fail_create {
            return Err(StoreError::Unavailable("Mock create failure".to_string()));
        }

        self.grapes.lock().unwrap().push(grape);
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Grape>, StoreError> {
        if self.config.fail_list {
            return Err(StoreError::Unavailable("Mock list failure".to_string()));
        }

        Ok(self.grapes.lock().unwrap().clone())
    }

    async fn delete_by_id(&self, id: i32) -> Result<(), StoreError> {
        self.deleted.lock().unwrap().push(id);

        if self.config.fail_delete {
            return Err(StoreError::Unavailable("Mock delete failure".to_string()));
        }

        self.grapes.lock().unwrap().retain(|g| g.id != id);
        Ok(())
    }
}

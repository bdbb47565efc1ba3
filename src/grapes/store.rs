//! Grape storage collaborator.

use std::sync::atomic::{AtomicI32, Ordering};

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::debug;

use crate::error::StoreError;

use super::types::Grape;

/// Storage operations the grape endpoints depend on.
#[async_trait]
pub trait GrapeStore: Send + Sync {
    /// Persist a new grape.
    async fn create(&self, grape: Grape) -> Result<(), StoreError>;

    /// Every stored grape, ordered by id.
    async fn list_all(&self) -> Result<Vec<Grape>, StoreError>;

    /// Remove the grape with `id`.
    async fn delete_by_id(&self, id: i32) -> Result<(), StoreError>;

    /// Number of stored grapes.
    async fn count(&self) -> Result<usize, StoreError> {
        Ok(self.list_all().await?.len())
    }
}

/// Process-local grape store.
#[derive(Debug)]
pub struct InMemoryGrapeStore {
    grapes: DashMap<i32, Grape>,
    next_id: AtomicI32,
}

impl InMemoryGrapeStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            grapes: DashMap::new(),
            next_id: AtomicI32::new(1),
        }
    }

    /// Number of stored grapes.
    pub fn len(&self) -> usize {
        self.grapes.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.grapes.is_empty()
    }

    /// Next id not yet handed out or taken by an explicit insert.
    ///
    /// Ids only grow; once `i32::MAX` is reached no more are assigned.
    fn allocate_id(&self) -> Result<i32, StoreError> {
        loop {
            let id = self
                .next_id
                .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |id| id.checked_add(1))
                .map_err(|_| StoreError::Unavailable("id space exhausted".to_string()))?;
            if !self.grapes.contains_key(&id) {
                return Ok(id);
            }
        }
    }
}

impl Default for InMemoryGrapeStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GrapeStore for InMemoryGrapeStore {
    async fn create(&self, mut grape: Grape) -> Result<(), StoreError> {
        if grape.id == 0 {
            grape.id = self.allocate_id()?;
        }

        match self.grapes.entry(grape.id) {
            Entry::Occupied(_) => Err(StoreError::Conflict { id: grape.id }),
            Entry::Vacant(slot) => {
                debug!(id = grape.id, "Storing grape");
                slot.insert(grape);
                Ok(())
            }
        }
    }

    async fn list_all(&self) -> Result<Vec<Grape>, StoreError> {
        let mut grapes: Vec<Grape> = self.grapes.iter().map(|g| g.value().clone()).collect();
        grapes.sort_by_key(|g| g.id);
        Ok(grapes)
    }

    async fn delete_by_id(&self, id: i32) -> Result<(), StoreError> {
        self.grapes
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound { id })
    }

    async fn count(&self) -> Result<usize, StoreError> {
        Ok(self.grapes.len())
    }
}

//! Mock notifier for testing.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::NotifyError;

use super::notifier::GrapeNotifier;

/// Counts broadcasts and optionally fails them.
#[derive(Debug, Clone, Default)]
pub struct MockNotifier {
    fail: bool,
    calls: Arc<AtomicUsize>,
}

impl MockNotifier {
    /// Create a notifier that always succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a notifier that always fails.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Number of broadcast attempts so far.
    pub fn broadcasts(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GrapeNotifier for MockNotifier {
    async fn broadcast_grape_changed(&self) -> Result<(), NotifyError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.fail {
            return Err(NotifyError::BroadcastFailed(
                "Mock broadcast failure".to_string(),
            ));
        }

        Ok(())
    }
}

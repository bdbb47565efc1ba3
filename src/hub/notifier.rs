//! Change notification collaborator and the broadcast hub behind it.

use async_trait::async_trait;
use serde::Serialize;
use strum::Display;
use tokio::sync::broadcast;
use tracing::debug;

use crate::error::NotifyError;
use crate::metrics;

/// Event pushed to hub clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GrapeEvent {
    /// Grape data changed; clients should refetch.
    #[strum(serialize = "grape_changed")]
    GrapeChanged,
}

/// Notification operations the grape endpoints depend on.
#[async_trait]
pub trait GrapeNotifier: Send + Sync {
    /// Tell every connected client that grape data changed.
    async fn broadcast_grape_changed(&self) -> Result<(), NotifyError>;
}

/// Fan-out point for grape change events.
///
/// Cloning shares the same channel. Each WebSocket client holds one
/// receiver; a client that falls `capacity` events behind skips ahead.
#[derive(Debug, Clone)]
pub struct GrapeHub {
    sender: broadcast::Sender<GrapeEvent>,
}

impl GrapeHub {
    /// Create a hub buffering up to `capacity` events per client.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero; `Config::validate` rejects that.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Register a new client.
    pub fn subscribe(&self) -> broadcast::Receiver<GrapeEvent> {
        self.sender.subscribe()
    }

    /// Number of currently connected clients.
    pub fn client_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Push an event to all clients, returning how many were reached.
    pub fn publish(&self, event: GrapeEvent) -> usize {
        // Err only means nobody is listening.
        match self.sender.send(event) {
            Ok(reached) => reached,
            Err(_) => {
                debug!(%event, "No hub clients connected");
                0
            }
        }
    }
}

#[async_trait]
impl GrapeNotifier for GrapeHub {
    async fn broadcast_grape_changed(&self) -> Result<(), NotifyError> {
        let reached = self.publish(GrapeEvent::GrapeChanged);
        metrics::inc_broadcasts_sent();
        debug!(clients = reached, "Broadcast grape change");
        Ok(())
    }
}

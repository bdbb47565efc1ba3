//! WebSocket session for a single hub client.

use axum::extract::ws::{Message, WebSocket};
use futures::{SinkExt, StreamExt};
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, warn};

use super::notifier::GrapeHub;

/// Forward hub events to `socket` until either side goes away.
///
/// Inbound frames other than close are ignored.
pub async fn serve_client(socket: WebSocket, hub: GrapeHub) {
    let mut events = hub.subscribe();
    let (mut sink, mut stream) = socket.split();

    info!(clients = hub.client_count(), "Hub client connected");

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Ok(event) => {
                    let text = match serde_json::to_string(&event) {
                        Ok(text) => text,
                        Err(e) => {
                            warn!(error = %e, "Failed to encode hub event");
                            continue;
                        }
                    };
                    if let Err(e) = sink.send(Message::Text(text)).await {
                        debug!(error = %e, "Hub client send failed");
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Hub client lagging, events skipped");
                }
                Err(RecvError::Closed) => break,
            },
            incoming = stream.next() => match incoming {
                Some(Ok(Message::Close(_))) | None => break,
                Some(Err(e)) => {
                    debug!(error = %e, "Hub client receive failed");
                    break;
                }
                Some(Ok(_)) => {}
            },
        }
    }

    drop(events);
    info!(clients = hub.client_count(), "Hub client disconnected");
}

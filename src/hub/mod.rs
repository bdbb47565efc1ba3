//! Real-time change hub.
//!
//! Mutations announce themselves through [`GrapeNotifier`]; the
//! [`GrapeHub`] implementation fans the event out to every WebSocket
//! client connected at `/hubs/grapes`.

pub mod mock;
pub mod notifier;
pub mod socket;

pub use mock::MockNotifier;
pub use notifier::{GrapeEvent, GrapeHub, GrapeNotifier};
pub use socket::serve_client;

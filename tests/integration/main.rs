//! Integration tests for the grape service.
//!
//! These run the full router against the in-memory store and the real
//! hub. The hub tests bind a loopback listener and connect a WebSocket
//! client.

mod crud;
mod hub;

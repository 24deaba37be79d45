//! Networking layer for the client-server protocol.
//!
//! JSON messages over a single persistent WebSocket, discriminated by a
//! top-level `message_type` tag.

/// Transport lifecycle: connect, join, keepalive, teardown.
pub mod connection;

/// Decode and connection error types.
pub mod errors;

/// Wire message types for both directions.
pub mod messages;

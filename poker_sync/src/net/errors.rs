//! Error types for wire decoding and the connection lifecycle.

use thiserror::Error;

/// Why an inbound frame could not be turned into a [`ServerMessage`].
///
/// Unknown tags are the forward-compatibility case and are logged and
/// dropped; malformed payloads of a known tag abort that single update and
/// surface one user-visible status line. Prior state is preserved either
/// way.
///
/// [`ServerMessage`]: super::messages::ServerMessage
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The outer `message_type` tag is not part of the protocol (yet).
    #[error("unknown message type: {0}")]
    UnknownTag(String),
    /// A game-update carried an `event` tag this client does not know.
    #[error("unknown game event: {0}")]
    UnknownEvent(String),
    /// A known tag whose payload failed structural validation.
    #[error("malformed {tag} payload: {source}")]
    Malformed {
        tag: String,
        #[source]
        source: serde_json::Error,
    },
    /// The frame was not a JSON object with a `message_type` field.
    #[error("not a protocol message: {0}")]
    NotAMessage(String),
}

impl DecodeError {
    /// Whether this error is the benign forward-compatibility case.
    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::UnknownTag(_) | Self::UnknownEvent(_))
    }
}

/// Transport-level failures. Connection loss is terminal for the session;
/// no retry happens at this layer.
#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error("websocket error: {0}")]
    Transport(#[from] tokio_tungstenite::tungstenite::Error),
    #[error("failed to encode outgoing message: {0}")]
    Encode(#[from] serde_json::Error),
}

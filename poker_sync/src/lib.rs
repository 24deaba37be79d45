//! # Poker Sync
//!
//! The client-side synchronization engine for a multiplayer poker viewer.
//! It keeps a local presentation model consistent with an authoritative
//! game server by consuming a stream of tagged JSON events over a
//! persistent WebSocket, and turns local player intent (bets, card
//! exchanges) into outgoing messages under the server's timing windows.
//!
//! The engine renders nothing itself: every inbound message resolves to a
//! sequence of [`view::ViewCommand`]s that an external render layer applies
//! in order. The server is authoritative for all game rules; this crate
//! only mirrors what it asserts.
//!
//! ## Architecture
//!
//! One connection owns one [`session::SessionContext`] holding the mutable
//! models, applied to synchronously, one message at a time:
//!
//! - [`room`]: the seat list, rebuilt wholesale on every room event
//! - [`game`]: the current hand (cards, pots, bets, shared board)
//! - [`interaction`]: the local player's action state machine
//! - [`router`]: two-level tag dispatch into the models
//! - [`net`]: wire types and the transport lifecycle
//! - [`codec`]: the deterministic card-to-sprite encoding
//!
//! ## Example
//!
//! ```
//! use poker_sync::session::{LocalPlayer, SessionContext};
//!
//! let mut session = SessionContext::new(
//!     LocalPlayer {
//!         id: "p1".into(),
//!         name: "alice".into(),
//!     },
//!     "room-7",
//! );
//! let commands = session.apply_frame(r#"{"message_type": "join-success"}"#);
//! assert_eq!(commands.len(), 1);
//! ```

/// Deterministic card-to-sprite encoding.
pub mod codec;

/// Hand presentation model and domain entities.
pub mod game;

/// Local-player action state machine.
pub mod interaction;

/// Networking: wire types and the transport lifecycle.
pub mod net;

/// Room presentation model.
pub mod room;

/// Two-level message dispatch.
pub mod router;

/// Per-connection session context.
pub mod session;

/// Render-layer boundary types.
pub mod view;

pub use game::entities::{Card, GameKind, Money, Player, PlayerId, Seat};
pub use net::connection::{PlayerIntent, run_session};
pub use net::messages::{ClientMessage, ServerMessage};
pub use session::{LocalPlayer, SessionContext};
pub use view::{RoomView, ViewCommand};

//! Per-connection session context.
//!
//! One context owns everything mutable for one connection: the local
//! player identity, the room and hand models, and the action controller.
//! Handlers receive it by reference; there is no ambient global state, and
//! the local identity is carried here explicitly rather than read back out
//! of whatever the render layer happens to display.
//!
//! All mutation is synchronous: one inbound message is applied to
//! completion before the next, which gives FIFO-per-connection ordering of
//! effects without any locking.

use crate::game::HandState;
use crate::game::entities::PlayerId;
use crate::interaction::InteractionController;
use crate::net::errors::DecodeError;
use crate::net::messages::{ClientMessage, ServerMessage};
use crate::room::RoomState;
use crate::router;
use crate::view::ViewCommand;

/// The identity this client joins as. Server-assigned, page-scoped in the
/// original deployment; opaque here.
#[derive(Clone, Debug)]
pub struct LocalPlayer {
    pub id: PlayerId,
    pub name: String,
}

pub struct SessionContext {
    pub local: LocalPlayer,
    pub room_id: String,
    pub room: RoomState,
    pub hand: HandState,
    pub interaction: InteractionController,
}

impl SessionContext {
    pub fn new(local: LocalPlayer, room_id: impl Into<String>) -> Self {
        Self {
            local,
            room_id: room_id.into(),
            room: RoomState::default(),
            hand: HandState::default(),
            interaction: InteractionController::default(),
        }
    }

    /// The join message sent right after the transport opens.
    pub fn join_message(&self) -> ClientMessage {
        ClientMessage::Join {
            player_id: self.local.id.clone(),
            player_name: self.local.name.clone(),
            room_id: self.room_id.clone(),
        }
    }

    /// Apply one decoded inbound message.
    pub fn apply(&mut self, message: ServerMessage) -> Vec<ViewCommand> {
        router::route(self, message)
    }

    /// Decode and apply one raw inbound frame, enforcing the error policy:
    /// unknown tags are logged and dropped, a malformed payload of a known
    /// tag aborts that update with exactly one user-visible status line,
    /// and prior state is preserved in every failure case.
    pub fn apply_frame(&mut self, text: &str) -> Vec<ViewCommand> {
        self.apply_decoded(router::decode(text))
    }

    /// Error-policy half of [`apply_frame`], split out so the connection
    /// layer can inspect the decoded message (for keepalive replies)
    /// before handing it over.
    ///
    /// [`apply_frame`]: Self::apply_frame
    pub fn apply_decoded(
        &mut self,
        decoded: Result<ServerMessage, DecodeError>,
    ) -> Vec<ViewCommand> {
        match decoded {
            Ok(message) => self.apply(message),
            Err(error) if error.is_unknown() => {
                log::warn!("{error}");
                Vec::new()
            }
            Err(error @ DecodeError::Malformed { .. }) => {
                log::error!("{error}");
                vec![ViewCommand::Status(format!("Error: {error}"))]
            }
            Err(error) => {
                log::error!("dropping inbound frame: {error}");
                Vec::new()
            }
        }
    }

    /// Full local teardown on connection loss: room and hand return to
    /// neutral, any pending action window dies with them. Terminal for the
    /// session; reconnecting means a fresh context and a fresh join.
    pub fn teardown(&mut self) -> Vec<ViewCommand> {
        self.interaction.reset();
        self.hand.reset();
        self.room.clear();
        vec![
            ViewCommand::ControlsCleared,
            ViewCommand::HandCleared,
            ViewCommand::RoomChanged(self.room.view()),
            ViewCommand::Status("Disconnected from the game server.".to_string()),
        ]
    }
}

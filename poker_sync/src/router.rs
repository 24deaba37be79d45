//! Two-level message dispatch.
//!
//! The outer `message_type` tag selects the handler family; `game-update`
//! messages dispatch again on their nested `event` tag. Both levels are
//! exhaustive matches over the wire enums, so an addition to the protocol
//! types cannot silently fall through here.
//!
//! Decode classification lives here too: an undecodable frame is sorted
//! into unknown-tag (forward compatibility, logged and dropped) versus
//! malformed-payload (that update is aborted, prior state untouched).

use crate::game::entities::PlayerId;
use crate::net::errors::DecodeError;
use crate::net::messages::{GameEvent, GameMessage, ServerMessage, WinningPot};
use crate::session::SessionContext;
use crate::view::ViewCommand;

/// Every outer tag this client understands.
pub const KNOWN_TAGS: [&str; 10] = [
    "connect",
    "disconnect",
    "join-success",
    "room-update",
    "player-added",
    "player-removed",
    "game-update",
    "error",
    "ping",
    "pong",
];

/// Every nested game-update event this client understands.
pub const KNOWN_EVENTS: [&str; 14] = [
    "new-game",
    "cards-assignment",
    "fold",
    "dead-player",
    "bet",
    "pots-update",
    "cards-change",
    "shared-cards",
    "winner-designation",
    "showdown",
    "game-over",
    "player-action",
    "ping",
    "pong",
];

/// Decode one inbound frame, classifying failures per the error policy.
pub fn decode(text: &str) -> Result<ServerMessage, DecodeError> {
    let err = match serde_json::from_str::<ServerMessage>(text) {
        Ok(message) => return Ok(message),
        Err(err) => err,
    };

    // Inspect the raw value to tell an unknown tag (benign) from a known
    // tag with a broken payload (aborts that update).
    let Ok(value) = serde_json::from_str::<serde_json::Value>(text) else {
        return Err(DecodeError::NotAMessage(err.to_string()));
    };
    let Some(tag) = value.get("message_type").and_then(|t| t.as_str()) else {
        return Err(DecodeError::NotAMessage("missing message_type".to_string()));
    };
    if !KNOWN_TAGS.contains(&tag) {
        return Err(DecodeError::UnknownTag(tag.to_string()));
    }
    if tag == "game-update"
        && let Some(event) = value.get("event").and_then(|e| e.as_str())
        && !KNOWN_EVENTS.contains(&event)
    {
        return Err(DecodeError::UnknownEvent(event.to_string()));
    }
    Err(DecodeError::Malformed {
        tag: tag.to_string(),
        source: err,
    })
}

/// Dispatch one inbound message into the session's models.
pub fn route(session: &mut SessionContext, message: ServerMessage) -> Vec<ViewCommand> {
    match message {
        ServerMessage::Connect {
            player_id,
            player_name,
        } => {
            log::debug!("connect ack for {player_id:?} ({player_name:?})");
            vec![ViewCommand::Status(
                "Connection established with the game server.".to_string(),
            )]
        }
        ServerMessage::Disconnect => vec![ViewCommand::Status(
            "Disconnected from the game server.".to_string(),
        )],
        ServerMessage::JoinSuccess => vec![ViewCommand::Status(
            "Successfully joined the room.".to_string(),
        )],
        ServerMessage::RoomUpdate(snapshot) => {
            let view = session.room.reconcile(snapshot);
            vec![ViewCommand::RoomChanged(view)]
        }
        // Single-player deltas are log-and-re-emit only; the authoritative
        // seat list arrives in the full room-update that follows.
        ServerMessage::PlayerAdded {
            player_id,
            player_name,
        } => vec![
            ViewCommand::Status(format!(
                "Player added: {}",
                player_name.unwrap_or_else(|| player_id.to_string())
            )),
            ViewCommand::RoomChanged(session.room.view()),
        ],
        ServerMessage::PlayerRemoved { player_id } => vec![
            ViewCommand::Status(format!("Player removed: {player_id}")),
            ViewCommand::RoomChanged(session.room.view()),
        ],
        ServerMessage::GameUpdate(game) => route_game_event(session, game),
        ServerMessage::Error { error } => vec![ViewCommand::Status(error)],
        ServerMessage::Ping | ServerMessage::Pong => {
            // Keepalive is the connection layer's business; by the time a
            // frame reaches the router the pong reply is already on its way.
            log::debug!("keepalive frame reached the router");
            Vec::new()
        }
    }
}

fn route_game_event(session: &mut SessionContext, game: GameMessage) -> Vec<ViewCommand> {
    // Whatever the event turns out to be, any pending action window is
    // superseded and its countdown dies. Exactly once per inbound message.
    session.interaction.reset();
    let mut commands = vec![ViewCommand::ControlsCleared];

    match game.event {
        GameEvent::NewGame {
            game_type,
            players,
            dealer_id,
        } => {
            commands.extend(session.hand.start(game.game_id, game_type, dealer_id, &players));
        }
        GameEvent::CardsAssignment {
            target,
            cards,
            score,
        } => {
            if target == session.local.id {
                commands.push(session.hand.reveal(target, cards, score.as_ref()));
            } else {
                // Other players' identities are never disclosed; track a
                // count and render backs.
                let count = if cards.is_empty() {
                    session.hand.seat_card_count()
                } else {
                    cards.len()
                };
                commands.push(session.hand.show_backs(target, count));
            }
        }
        GameEvent::Fold { player } | GameEvent::DeadPlayer { player } => {
            commands.push(session.hand.mark_folded(player.id));
        }
        GameEvent::Bet { player, bets, .. } => {
            session.room.update_player(&player);
            commands.push(ViewCommand::PlayerChanged(player));
            commands.push(session.hand.replace_bets(bets));
        }
        GameEvent::PotsUpdate { players, pots } => {
            for player in sorted_by_id(players.into_values()) {
                session.room.update_player(&player);
                commands.push(ViewCommand::PlayerChanged(player));
            }
            commands.extend(session.hand.rake_pots(pots));
        }
        GameEvent::CardsChange { player, num_cards } => {
            commands.push(ViewCommand::ExchangeAnimated {
                player_id: player.id,
                count: num_cards,
            });
        }
        GameEvent::SharedCards { cards } => {
            commands.push(session.hand.deal_shared(cards));
        }
        GameEvent::WinnerDesignation { players, pots, pot } => {
            for player in sorted_by_id(players.into_values()) {
                session.room.update_player(&player);
                commands.push(ViewCommand::PlayerChanged(player));
            }
            commands.push(ViewCommand::Status(winners_line(session, &pot)));
            commands.extend(session.hand.conclude(pots));
        }
        GameEvent::Showdown { players } => {
            for (id, hand) in sorted_by_id(players.into_iter()) {
                commands.push(session.hand.reveal(id, hand.cards, hand.score.as_ref()));
            }
        }
        GameEvent::GameOver => {
            commands.push(session.hand.reset());
        }
        GameEvent::PlayerAction(request) => {
            commands.extend(session.interaction.open(&request, &session.local.id));
        }
        GameEvent::Ping | GameEvent::Pong => {
            log::debug!("keepalive event inside a game update");
        }
    }

    commands
}

/// Deterministic ordering for map-keyed payloads, so identical inputs
/// always produce identical command sequences.
fn sorted_by_id<T, I>(items: I) -> Vec<T>
where
    I: Iterator<Item = T>,
    T: SortById,
{
    let mut items: Vec<T> = items.collect();
    items.sort_by(|a, b| a.sort_id().cmp(b.sort_id()));
    items
}

trait SortById {
    fn sort_id(&self) -> &PlayerId;
}

impl SortById for crate::game::entities::Player {
    fn sort_id(&self) -> &PlayerId {
        &self.id
    }
}

impl<T> SortById for (PlayerId, T) {
    fn sort_id(&self) -> &PlayerId {
        &self.0
    }
}

fn winners_line(session: &SessionContext, pot: &WinningPot) -> String {
    let names: Vec<String> = pot
        .winner_ids
        .iter()
        .map(|id| {
            session
                .room
                .occupants()
                .find(|p| &p.id == id)
                .map_or_else(|| id.to_string(), |p| p.name.clone())
        })
        .collect();
    if names.is_empty() {
        format!("Pot of ${} settled.", pot.money)
    } else {
        format!(
            "Pot of ${} goes to {} (${} each).",
            pot.money,
            names.join(", "),
            pot.money_split
        )
    }
}

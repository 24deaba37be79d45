//! Wire message types for the client-server protocol.
//!
//! Messages are JSON objects discriminated by a top-level `message_type`
//! tag; game updates carry a second, nested `event` tag. Both families are
//! exhaustive enums so that a new tag is a compile-time concern here and a
//! logged no-op at the router, never a silent fall-through.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::game::entities::{Card, GameKind, Money, Player, PlayerId, Pot, Score};

/// A message from the game server to this client.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(tag = "message_type", rename_all = "kebab-case")]
pub enum ServerMessage {
    /// Acknowledgement addressed to the joining client only.
    Connect {
        #[serde(default)]
        player_id: Option<PlayerId>,
        #[serde(default)]
        player_name: Option<String>,
    },
    /// Courtesy notice; the transport close is what actually ends the session.
    Disconnect,
    /// Confirms the join handshake.
    JoinSuccess,
    /// Full room snapshot; always a wholesale seat replacement.
    RoomUpdate(RoomSnapshot),
    PlayerAdded {
        player_id: PlayerId,
        #[serde(default)]
        player_name: Option<String>,
    },
    PlayerRemoved {
        player_id: PlayerId,
    },
    /// A game event; see [`GameEvent`] for the nested tag.
    GameUpdate(GameMessage),
    Error {
        error: String,
    },
    Ping,
    Pong,
}

impl ServerMessage {
    /// Whether the keepalive layer owes the server an immediate pong.
    /// The server emits pings both as an outer tag and nested inside a
    /// game update; both forms are answered the same way.
    pub fn wants_pong(&self) -> bool {
        matches!(
            self,
            Self::Ping
                | Self::GameUpdate(GameMessage {
                    event: GameEvent::Ping,
                    ..
                })
        )
    }
}

/// Room snapshot payload. `player_ids` is the server-defined seat order
/// with `null` marking an empty seat; `players` is keyed by player id.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct RoomSnapshot {
    #[serde(default)]
    pub room_id: Option<String>,
    pub player_ids: Vec<Option<PlayerId>>,
    #[serde(default)]
    pub players: HashMap<PlayerId, Player>,
    /// Server readiness signal; the room is joinable/startable when set.
    #[serde(default)]
    pub can_start: bool,
}

/// Envelope of a game-update message: the hand identifier plus the event.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct GameMessage {
    #[serde(default)]
    pub game_id: Option<String>,
    #[serde(flatten)]
    pub event: GameEvent,
}

/// The nested event of a game-update message.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum GameEvent {
    /// A hand begins: fixes the variant (and with it the per-seat card
    /// count and score-label table) and names the dealer.
    NewGame {
        game_type: GameKind,
        #[serde(default)]
        players: Vec<Player>,
        dealer_id: PlayerId,
    },
    /// Cards dealt to one player. Only the target learns identities;
    /// everyone else renders backs.
    CardsAssignment {
        target: PlayerId,
        #[serde(default)]
        cards: Vec<Card>,
        #[serde(default)]
        score: Option<Score>,
    },
    Fold {
        player: Player,
    },
    /// A player timed out or dropped; rendered exactly like a fold.
    DeadPlayer {
        player: Player,
    },
    /// A bet was placed: the player snapshot and the *entire* bets mapping
    /// replace the previous ones, never merge into them.
    Bet {
        player: Player,
        #[serde(default)]
        bet: i64,
        #[serde(default)]
        bets: HashMap<PlayerId, Money>,
    },
    /// Bets were raked into the pots; clears the bets mapping wholesale.
    PotsUpdate {
        #[serde(default)]
        players: HashMap<PlayerId, Player>,
        #[serde(default)]
        pots: Vec<Pot>,
    },
    /// Visual-only: a player exchanged `num_cards` cards. Identities are
    /// never disclosed to observers.
    CardsChange {
        player: Player,
        num_cards: usize,
    },
    /// New community cards; append-only.
    SharedCards {
        cards: Vec<Card>,
    },
    /// A pot was awarded; freezes the board for display until game-over.
    WinnerDesignation {
        #[serde(default)]
        players: HashMap<PlayerId, Player>,
        #[serde(default)]
        pots: Vec<Pot>,
        pot: WinningPot,
    },
    /// Everyone still in reveals their cards and score.
    Showdown {
        players: HashMap<PlayerId, ShowdownHand>,
    },
    /// Hand ended; reset to the neutral state.
    GameOver,
    /// The server grants one player a time-bounded action window.
    PlayerAction(ActionRequest),
    Ping,
    Pong,
}

/// The awarded pot of a winner-designation event.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct WinningPot {
    pub money: Money,
    #[serde(default)]
    pub player_ids: Vec<PlayerId>,
    #[serde(default)]
    pub winner_ids: Vec<PlayerId>,
    #[serde(default)]
    pub money_split: Money,
}

/// One player's revealed cards at showdown.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct ShowdownHand {
    #[serde(default)]
    pub cards: Vec<Card>,
    #[serde(default)]
    pub score: Option<Score>,
}

/// Which action a player-action window solicits.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionKind {
    Bet,
    CardsChange,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::Bet => "bet",
            Self::CardsChange => "cards-change",
        };
        write!(f, "{repr}")
    }
}

/// A server-granted, time-bounded opportunity for one player to act.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct ActionRequest {
    pub action: ActionKind,
    pub player: Player,
    #[serde(default)]
    pub min_bet: Money,
    #[serde(default)]
    pub max_bet: Money,
    /// Server gate on whether the player may place a numeric bet at all
    /// this round. Absent means allowed.
    #[serde(default = "default_true")]
    pub allowed_to_bet: bool,
    /// Present when the variant requires a prior qualifying score; flips
    /// the negative control's label from "fold" to "pass".
    #[serde(default)]
    pub min_score: Option<u32>,
    /// Window length in seconds, informational only.
    #[serde(default)]
    pub timeout: Option<u64>,
    /// Absolute deadline; the countdown is derived from it.
    #[serde(rename = "timeout_date", with = "timeout_date")]
    pub deadline: DateTime<Utc>,
}

fn default_true() -> bool {
    true
}

/// The server's `timeout_date` format: `"2024-05-01 12:30:00+0000"`.
mod timeout_date {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de};

    const FORMAT: &str = "%Y-%m-%d %H:%M:%S%z";

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        DateTime::parse_from_str(&s, FORMAT)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(de::Error::custom)
    }
}

/// A message from this client to the game server.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(tag = "message_type", rename_all = "kebab-case")]
pub enum ClientMessage {
    /// Identify the local player right after the transport opens.
    Join {
        player_id: PlayerId,
        player_name: String,
        room_id: String,
    },
    /// A bet amount; −1 encodes fold/pass, 0 encodes check.
    Bet { bet: i64 },
    /// Indices of the cards the player chose to discard.
    CardsChange { cards: Vec<usize> },
    StartGame,
    Pong,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn decode(text: &str) -> ServerMessage {
        serde_json::from_str(text).unwrap()
    }

    #[test]
    fn room_update_decodes_seats_and_readiness() {
        let msg = decode(
            r#"{
                "message_type": "room-update",
                "event": "update",
                "room_id": "r7",
                "player_ids": ["a", null, "b"],
                "players": {
                    "a": {"id": "a", "name": "alice", "money": 100},
                    "b": {"player_id": "b", "player_name": "bob", "player_money": 50}
                },
                "can_start": true
            }"#,
        );
        let ServerMessage::RoomUpdate(snapshot) = msg else {
            panic!("wrong variant");
        };
        assert_eq!(snapshot.room_id.as_deref(), Some("r7"));
        assert_eq!(snapshot.player_ids.len(), 3);
        assert!(snapshot.player_ids[1].is_none());
        assert!(snapshot.can_start);
        assert_eq!(snapshot.players[&PlayerId::from("b")].name, "bob");
    }

    #[test]
    fn new_game_decodes_variant_and_dealer() {
        let msg = decode(
            r#"{
                "message_type": "game-update",
                "event": "new-game",
                "game_id": "g1",
                "game_type": "traditional",
                "players": [{"id": "a", "name": "alice", "money": 100}],
                "dealer_id": "a"
            }"#,
        );
        let ServerMessage::GameUpdate(game) = msg else {
            panic!("wrong variant");
        };
        assert_eq!(game.game_id.as_deref(), Some("g1"));
        let GameEvent::NewGame {
            game_type,
            players,
            dealer_id,
        } = game.event
        else {
            panic!("wrong event");
        };
        assert_eq!(game_type, GameKind::Draw);
        assert_eq!(players.len(), 1);
        assert_eq!(dealer_id, PlayerId::from("a"));
    }

    #[test]
    fn cards_assignment_ignores_decorative_fields() {
        let msg = decode(
            r#"{
                "message_type": "game-update",
                "event": "cards-assignment",
                "game_id": "g1",
                "target": "a",
                "cards": [
                    {"rank": 14, "suit": 3, "rank_name": "Ace", "suit_name": "hearts"},
                    {"rank": 5, "suit": 0}
                ],
                "score": {"category": 0, "cards": []}
            }"#,
        );
        let ServerMessage::GameUpdate(game) = msg else {
            panic!("wrong variant");
        };
        let GameEvent::CardsAssignment { target, cards, .. } = game.event else {
            panic!("wrong event");
        };
        assert_eq!(target, PlayerId::from("a"));
        assert_eq!(cards, vec![Card { rank: 14, suit: 3 }, Card { rank: 5, suit: 0 }]);
    }

    #[test]
    fn player_action_parses_deadline_and_defaults() {
        let msg = decode(
            r#"{
                "message_type": "game-update",
                "event": "player-action",
                "game_id": "g1",
                "action": "bet",
                "player": {"id": "a", "name": "alice", "money": 100},
                "min_bet": 10,
                "max_bet": 500,
                "timeout": 30,
                "timeout_date": "2024-05-01 12:30:00+0000"
            }"#,
        );
        let ServerMessage::GameUpdate(game) = msg else {
            panic!("wrong variant");
        };
        let GameEvent::PlayerAction(request) = game.event else {
            panic!("wrong event");
        };
        assert_eq!(request.action, ActionKind::Bet);
        assert_eq!((request.min_bet, request.max_bet), (10, 500));
        assert!(request.allowed_to_bet);
        assert_eq!(request.min_score, None);
        assert_eq!(
            request.deadline,
            Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap()
        );
    }

    #[test]
    fn keepalive_detection_covers_both_levels() {
        assert!(decode(r#"{"message_type": "ping"}"#).wants_pong());
        assert!(
            decode(r#"{"message_type": "game-update", "event": "ping"}"#).wants_pong()
        );
        assert!(!decode(r#"{"message_type": "pong"}"#).wants_pong());
    }

    #[test]
    fn outbound_shapes_match_the_protocol() {
        let join = ClientMessage::Join {
            player_id: PlayerId::from("a"),
            player_name: "alice".into(),
            room_id: "r7".into(),
        };
        assert_eq!(
            serde_json::to_value(&join).unwrap(),
            serde_json::json!({
                "message_type": "join",
                "player_id": "a",
                "player_name": "alice",
                "room_id": "r7"
            })
        );

        assert_eq!(
            serde_json::to_value(ClientMessage::Bet { bet: -1 }).unwrap(),
            serde_json::json!({"message_type": "bet", "bet": -1})
        );
        assert_eq!(
            serde_json::to_value(ClientMessage::CardsChange { cards: vec![0, 2, 4] }).unwrap(),
            serde_json::json!({"message_type": "cards-change", "cards": [0, 2, 4]})
        );
        assert_eq!(
            serde_json::to_value(ClientMessage::StartGame).unwrap(),
            serde_json::json!({"message_type": "start-game"})
        );
        assert_eq!(
            serde_json::to_value(ClientMessage::Pong).unwrap(),
            serde_json::json!({"message_type": "pong"})
        );
    }
}

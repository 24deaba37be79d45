//! The boundary between the sync engine and the render layer.
//!
//! Every inbound message resolves to a sequence of [`ViewCommand`]s. The
//! render layer applies them in order and never reaches back into the
//! models; anything it needs to draw is carried on the command itself.

use chrono::{DateTime, Utc};
use std::collections::HashMap;

use crate::game::entities::{Card, GameKind, Money, Player, PlayerId, Pot, Seat};

/// Full room view emitted after every room reconciliation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoomView {
    pub seats: Vec<Seat>,
    /// Derived from the server readiness signal; gates the start-game
    /// control in the render layer.
    pub joinable: bool,
}

impl RoomView {
    pub fn occupants(&self) -> impl Iterator<Item = &Player> {
        self.seats.iter().filter_map(|seat| seat.occupant.as_ref())
    }
}

/// Parameters for the local player's bet controls.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BetPrompt {
    pub min_bet: Money,
    pub max_bet: Money,
    /// When the variant requires a prior qualifying score, the negative
    /// control reads "pass" instead of "fold". Display-only distinction.
    pub fold_is_pass: bool,
}

/// An instruction to the render layer.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ViewCommand {
    /// Replace the whole seat display.
    RoomChanged(RoomView),
    /// One user-visible status line.
    Status(String),
    /// Close any open bet/exchange controls and stop active countdowns.
    /// Emitted once per game-update message, before the event's own effect.
    ControlsCleared,
    /// A new hand started; lay out face-down placeholders per seat.
    HandStarted {
        game_id: Option<String>,
        kind: GameKind,
        dealer_id: PlayerId,
        seat_card_count: usize,
    },
    /// Reset the board to the neutral, between-hands state.
    HandCleared,
    /// Showdown concluded: keep the board on screen untouched until the
    /// next hand reset.
    BoardFrozen,
    /// Show face-down card backs for a player.
    CardBacksShown { player_id: PlayerId, count: usize },
    /// Reveal a player's cards, with the score-category label when the
    /// server scored the hand.
    CardsRevealed {
        player_id: PlayerId,
        cards: Vec<Card>,
        score_label: Option<String>,
    },
    PlayerFolded { player_id: PlayerId },
    /// Refresh one player's name/money snapshot.
    PlayerChanged(Player),
    /// Replace all bet chips. Only positive amounts are carried; a zero
    /// bet displays as no chip at all.
    BetsChanged(HashMap<PlayerId, Money>),
    /// Replace the pot display.
    PotsChanged(Vec<Pot>),
    /// Append newly dealt shared cards to the board.
    SharedCardsDealt(Vec<Card>),
    /// Play the card-exchange animation on that many of a player's cards.
    /// Carries a count only; the exchanged identities are never disclosed.
    ExchangeAnimated { player_id: PlayerId, count: usize },
    /// Start a countdown ring on the acting player's seat. Expiry is a
    /// visual matter; no local auto-submit follows from it.
    CountdownStarted {
        player_id: PlayerId,
        deadline: DateTime<Utc>,
    },
    /// Open the numeric bet controls for the local player.
    BetControlsOpened(BetPrompt),
    /// The local player may not bet this round; offer only the passive
    /// acknowledgement control.
    AckControlsOpened,
    /// Open the discard-selection controls for the local player.
    ExchangeControlsOpened,
}

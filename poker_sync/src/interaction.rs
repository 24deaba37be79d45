//! Local-player action state machine.
//!
//! The server grants action windows; this controller tracks the pending
//! one, derives its countdown deadline, and turns a local submission into
//! the single outgoing message. Submissions reset to idle immediately
//! without waiting for acknowledgement; the next inbound game update would
//! cancel the window anyway, addressed to this player or not.

use chrono::{DateTime, Duration, Utc};

use crate::game::entities::{Money, PlayerId};
use crate::net::messages::{ActionKind, ActionRequest, ClientMessage};
use crate::view::{BetPrompt, ViewCommand};

/// Bet amount encoding fold (or pass, under qualifying-score rules).
pub const FOLD_BET: i64 = -1;

/// Bet amount encoding check / no bet.
pub const CHECK_BET: i64 = 0;

/// Parameters of a pending bet window.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BetWindow {
    pub min_bet: Money,
    pub max_bet: Money,
    /// The negative control reads "pass" instead of "fold".
    pub fold_is_pass: bool,
    /// When false the server only accepts the passive acknowledgement.
    pub may_act: bool,
    pub deadline: DateTime<Utc>,
}

/// Parameters of a pending card-exchange window.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExchangeWindow {
    pub deadline: DateTime<Utc>,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum ActionState {
    #[default]
    Idle,
    BetPending(BetWindow),
    CardsChangePending(ExchangeWindow),
}

#[derive(Debug, Default)]
pub struct InteractionController {
    state: ActionState,
}

impl InteractionController {
    pub fn state(&self) -> &ActionState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, ActionState::Idle)
    }

    /// Deadline of the pending window, if any.
    pub fn deadline(&self) -> Option<DateTime<Utc>> {
        match &self.state {
            ActionState::Idle => None,
            ActionState::BetPending(window) => Some(window.deadline),
            ActionState::CardsChangePending(window) => Some(window.deadline),
        }
    }

    /// Time left on the pending window. Zero once expired; expiry itself
    /// is purely visual and no auto-submit follows from it here.
    pub fn remaining(&self, now: DateTime<Utc>) -> Option<Duration> {
        self.deadline()
            .map(|deadline| (deadline - now).max(Duration::zero()))
    }

    /// Cancel the pending window. Called once per inbound game update,
    /// before the event's own effect is applied.
    pub fn reset(&mut self) {
        self.state = ActionState::Idle;
    }

    /// Handle a player-action event. The countdown starts for whichever
    /// player the window addresses; controls open only when that player is
    /// the local one.
    pub fn open(&mut self, request: &ActionRequest, local_id: &PlayerId) -> Vec<ViewCommand> {
        let mut commands = vec![ViewCommand::CountdownStarted {
            player_id: request.player.id.clone(),
            deadline: request.deadline,
        }];

        if &request.player.id != local_id {
            return commands;
        }

        match request.action {
            ActionKind::Bet => {
                let fold_is_pass = request.min_score.is_some();
                // Under qualifying-score rules an unqualified player may
                // only acknowledge the round.
                let may_act = !fold_is_pass || request.allowed_to_bet;
                self.state = ActionState::BetPending(BetWindow {
                    min_bet: request.min_bet,
                    max_bet: request.max_bet,
                    fold_is_pass,
                    may_act,
                    deadline: request.deadline,
                });
                if may_act {
                    commands.push(ViewCommand::BetControlsOpened(BetPrompt {
                        min_bet: request.min_bet,
                        max_bet: request.max_bet,
                        fold_is_pass,
                    }));
                } else {
                    commands.push(ViewCommand::AckControlsOpened);
                }
            }
            ActionKind::CardsChange => {
                self.state = ActionState::CardsChangePending(ExchangeWindow {
                    deadline: request.deadline,
                });
                commands.push(ViewCommand::ExchangeControlsOpened);
            }
        }

        commands
    }

    /// Submit a bet amount ([`FOLD_BET`], [`CHECK_BET`], or a positive
    /// amount) and optimistically return to idle. Range enforcement is the
    /// server's job. Returns `None` when no bet window is pending.
    pub fn submit_bet(&mut self, amount: i64) -> Option<ClientMessage> {
        match self.state {
            ActionState::BetPending(_) => {
                self.state = ActionState::Idle;
                Some(ClientMessage::Bet { bet: amount })
            }
            _ => {
                log::debug!("bet of {amount} submitted with no pending bet window");
                None
            }
        }
    }

    /// Submit the locally selected discard indices and return to idle.
    /// Returns `None` when no exchange window is pending.
    pub fn submit_cards_change(&mut self, discards: Vec<usize>) -> Option<ClientMessage> {
        match self.state {
            ActionState::CardsChangePending(_) => {
                self.state = ActionState::Idle;
                Some(ClientMessage::CardsChange { cards: discards })
            }
            _ => {
                log::debug!("card exchange submitted with no pending exchange window");
                None
            }
        }
    }
}

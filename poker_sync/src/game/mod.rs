//! Hand presentation model.
//!
//! One [`HandState`] mirrors the hand currently asserted by the server,
//! from the new-game event to game-over. All transitions are driven by the
//! nested event of a game-update message; nothing here is inferred from
//! game rules, which stay server-side.

pub mod entities;

use std::collections::{HashMap, HashSet};

use self::entities::{Card, GameKind, Money, Player, PlayerId, Pot, Score, SeatCards};

use crate::view::ViewCommand;

#[derive(Debug, Default)]
pub struct HandState {
    game_id: Option<String>,
    kind: Option<GameKind>,
    dealer_id: Option<PlayerId>,
    seat_cards: HashMap<PlayerId, SeatCards>,
    folded: HashSet<PlayerId>,
    shared_cards: Vec<Card>,
    pots: Vec<Pot>,
    bets: HashMap<PlayerId, Money>,
    /// Set by winner-designation: the board stays on display, frozen,
    /// until the next game-over resets it.
    concluded: bool,
}

impl HandState {
    pub fn game_id(&self) -> Option<&str> {
        self.game_id.as_deref()
    }

    pub fn kind(&self) -> Option<GameKind> {
        self.kind
    }

    /// Per-seat card count, fixed when the new-game event named the
    /// variant; zero between hands.
    pub fn seat_card_count(&self) -> usize {
        self.kind.map_or(0, GameKind::seat_card_count)
    }

    pub fn dealer_id(&self) -> Option<&PlayerId> {
        self.dealer_id.as_ref()
    }

    pub fn cards_of(&self, id: &PlayerId) -> Option<&SeatCards> {
        self.seat_cards.get(id)
    }

    pub fn is_folded(&self, id: &PlayerId) -> bool {
        self.folded.contains(id)
    }

    pub fn shared_cards(&self) -> &[Card] {
        &self.shared_cards
    }

    pub fn pots(&self) -> &[Pot] {
        &self.pots
    }

    pub fn bets(&self) -> &HashMap<PlayerId, Money> {
        &self.bets
    }

    pub fn is_concluded(&self) -> bool {
        self.concluded
    }

    pub fn in_progress(&self) -> bool {
        self.kind.is_some()
    }

    /// Label for a score category under the current variant's ordering.
    pub fn score_label(&self, category: usize) -> Option<&'static str> {
        self.kind
            .and_then(|kind| kind.score_category_labels().get(category).copied())
    }

    /// Begin a new hand: fix the variant and dealer, lay out face-down
    /// placeholders for every player the server dealt in.
    pub fn start(
        &mut self,
        game_id: Option<String>,
        kind: GameKind,
        dealer_id: PlayerId,
        players: &[Player],
    ) -> Vec<ViewCommand> {
        self.clear();
        let count = kind.seat_card_count();
        self.game_id = game_id.clone();
        self.kind = Some(kind);

        if !players.iter().any(|p| p.id == dealer_id) {
            log::warn!("dealer {dealer_id} is not among the dealt-in players");
        }
        self.dealer_id = Some(dealer_id.clone());

        let mut commands = vec![ViewCommand::HandStarted {
            game_id,
            kind,
            dealer_id,
            seat_card_count: count,
        }];
        for player in players {
            self.seat_cards
                .insert(player.id.clone(), SeatCards::Hidden(count));
            commands.push(ViewCommand::CardBacksShown {
                player_id: player.id.clone(),
                count,
            });
        }
        commands
    }

    /// Reveal a player's own cards (their assignment, or anyone's at
    /// showdown). Card validity is a render-time concern; the model keeps
    /// whatever the server asserted.
    pub fn reveal(
        &mut self,
        player_id: PlayerId,
        cards: Vec<Card>,
        score: Option<&Score>,
    ) -> ViewCommand {
        self.seat_cards
            .insert(player_id.clone(), SeatCards::Revealed(cards.clone()));
        ViewCommand::CardsRevealed {
            player_id,
            cards,
            score_label: score
                .and_then(|s| self.score_label(s.category))
                .map(str::to_string),
        }
    }

    /// Record that a player holds `count` face-down cards.
    pub fn show_backs(&mut self, player_id: PlayerId, count: usize) -> ViewCommand {
        self.seat_cards
            .insert(player_id.clone(), SeatCards::Hidden(count));
        ViewCommand::CardBacksShown { player_id, count }
    }

    /// Mark a player folded (or dead). They keep their seat.
    pub fn mark_folded(&mut self, player_id: PlayerId) -> ViewCommand {
        self.folded.insert(player_id.clone());
        ViewCommand::PlayerFolded { player_id }
    }

    /// Replace the entire bets mapping; never a merge.
    pub fn replace_bets(&mut self, bets: HashMap<PlayerId, Money>) -> ViewCommand {
        self.bets = bets;
        ViewCommand::BetsChanged(self.visible_bets())
    }

    /// Bets were raked into the pots: replace the pot sequence and clear
    /// the bets mapping unconditionally.
    pub fn rake_pots(&mut self, pots: Vec<Pot>) -> Vec<ViewCommand> {
        self.pots = pots;
        self.bets.clear();
        vec![
            ViewCommand::PotsChanged(self.pots.clone()),
            ViewCommand::BetsChanged(HashMap::new()),
        ]
    }

    /// Append shared cards; earlier ones are never replaced.
    pub fn deal_shared(&mut self, cards: Vec<Card>) -> ViewCommand {
        if self.kind == Some(GameKind::Draw) {
            log::warn!("shared cards dealt in a draw hand");
        }
        self.shared_cards.extend(cards.iter().copied());
        ViewCommand::SharedCardsDealt(cards)
    }

    /// Winner designation: replace the pot sequence, then freeze the board
    /// for display. The actual reset waits for the next game-over.
    pub fn conclude(&mut self, pots: Vec<Pot>) -> Vec<ViewCommand> {
        self.pots = pots;
        self.concluded = true;
        vec![
            ViewCommand::PotsChanged(self.pots.clone()),
            ViewCommand::BoardFrozen,
        ]
    }

    /// Reset to the neutral, between-hands state.
    pub fn reset(&mut self) -> ViewCommand {
        self.clear();
        ViewCommand::HandCleared
    }

    /// The bets mapping as the render layer should see it: zero bets
    /// display as no chip at all.
    fn visible_bets(&self) -> HashMap<PlayerId, Money> {
        self.bets
            .iter()
            .filter(|(_, amount)| **amount > 0)
            .map(|(id, amount)| (id.clone(), *amount))
            .collect()
    }

    fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(id: &str) -> Player {
        Player {
            id: PlayerId::from(id),
            name: id.to_string(),
            money: 100,
        }
    }

    fn started_hand(kind: GameKind) -> HandState {
        let mut hand = HandState::default();
        hand.start(
            Some("g1".into()),
            kind,
            PlayerId::from("a"),
            &[player("a"), player("b")],
        );
        hand
    }

    #[test]
    fn new_draw_hand_deals_five_backs_per_player() {
        let hand = started_hand(GameKind::Draw);
        assert_eq!(hand.seat_card_count(), 5);
        assert_eq!(hand.dealer_id(), Some(&PlayerId::from("a")));
        for id in ["a", "b"] {
            assert_eq!(
                hand.cards_of(&PlayerId::from(id)),
                Some(&SeatCards::Hidden(5))
            );
        }
    }

    #[test]
    fn seat_card_count_is_fixed_for_the_hand() {
        let mut hand = started_hand(GameKind::CommunityCard);
        assert_eq!(hand.seat_card_count(), 2);
        hand.deal_shared(vec![Card { rank: 9, suit: 2 }]);
        hand.mark_folded(PlayerId::from("b"));
        assert_eq!(hand.seat_card_count(), 2);
    }

    #[test]
    fn raking_pots_clears_bets_unconditionally() {
        let mut hand = started_hand(GameKind::CommunityCard);
        hand.replace_bets(HashMap::from([
            (PlayerId::from("a"), 50),
            (PlayerId::from("b"), 50),
        ]));
        hand.rake_pots(vec![Pot {
            money: 100,
            player_ids: vec![PlayerId::from("a"), PlayerId::from("b")],
        }]);
        assert!(hand.bets().is_empty());
        assert_eq!(hand.pots().len(), 1);
    }

    #[test]
    fn bets_replace_never_merge() {
        let mut hand = started_hand(GameKind::CommunityCard);
        hand.replace_bets(HashMap::from([(PlayerId::from("a"), 50)]));
        hand.replace_bets(HashMap::from([(PlayerId::from("b"), 20)]));
        assert_eq!(hand.bets().len(), 1);
        assert_eq!(hand.bets().get(&PlayerId::from("b")), Some(&20));
    }

    #[test]
    fn zero_bets_are_invisible() {
        let mut hand = started_hand(GameKind::CommunityCard);
        let ViewCommand::BetsChanged(visible) = hand.replace_bets(HashMap::from([
            (PlayerId::from("a"), 0),
            (PlayerId::from("b"), 25),
        ])) else {
            panic!("expected a bets command");
        };
        assert_eq!(visible.len(), 1);
        assert_eq!(visible.get(&PlayerId::from("b")), Some(&25));
        // The model itself still tracks the full mapping.
        assert_eq!(hand.bets().len(), 2);
    }

    #[test]
    fn shared_cards_append_only() {
        let mut hand = started_hand(GameKind::CommunityCard);
        hand.deal_shared(vec![
            Card { rank: 2, suit: 0 },
            Card { rank: 3, suit: 1 },
            Card { rank: 4, suit: 2 },
        ]);
        hand.deal_shared(vec![Card { rank: 5, suit: 3 }]);
        assert_eq!(hand.shared_cards().len(), 4);
        assert_eq!(hand.shared_cards()[0], Card { rank: 2, suit: 0 });
    }

    #[test]
    fn conclusion_freezes_until_game_over() {
        let mut hand = started_hand(GameKind::CommunityCard);
        hand.conclude(vec![]);
        assert!(hand.is_concluded());
        assert!(hand.in_progress());

        hand.reset();
        assert!(!hand.is_concluded());
        assert!(!hand.in_progress());
        assert_eq!(hand.seat_card_count(), 0);
        assert!(hand.pots().is_empty());
        assert!(hand.bets().is_empty());
    }

    #[test]
    fn score_labels_follow_the_variant_ordering() {
        let draw = started_hand(GameKind::Draw);
        let community = started_hand(GameKind::CommunityCard);
        assert_eq!(draw.score_label(5), Some("Full house"));
        assert_eq!(community.score_label(5), Some("Flush"));
        assert_eq!(draw.score_label(9), None);
    }

    #[test]
    fn reveal_attaches_the_variant_label() {
        let mut hand = started_hand(GameKind::Draw);
        let command = hand.reveal(
            PlayerId::from("a"),
            vec![Card { rank: 14, suit: 3 }, Card { rank: 5, suit: 0 }],
            Some(&Score {
                category: 1,
                cards: vec![],
            }),
        );
        let ViewCommand::CardsRevealed {
            cards, score_label, ..
        } = command
        else {
            panic!("expected a reveal");
        };
        assert_eq!(cards.len(), 2);
        assert_eq!(score_label.as_deref(), Some("Pair"));
    }
}

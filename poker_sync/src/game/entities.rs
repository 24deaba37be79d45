use serde::{Deserialize, Deserializer, Serialize};
use std::{borrow::Borrow, fmt, hash::Hash};

/// Placeholder for card ranks. Aces appear on the wire both as 1 and 14
/// depending on whether the server scored them high or low.
pub type Value = u8;

/// Numeric suit code as sent by the server:
/// 0 = spades, 1 = clubs, 2 = diamonds, 3 = hearts.
pub type SuitCode = u8;

/// Type alias for whole dollars. The server owns all balances; the client
/// only mirrors whatever snapshot the last event carried.
pub type Money = u32;

/// A card as asserted by the server. Values outside the renderable range
/// are kept as-is here and rejected by the codec at presentation time.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Card {
    pub rank: Value,
    pub suit: SuitCode,
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let rank = match self.rank {
            1 | 14 => "A",
            11 => "J",
            12 => "Q",
            13 => "K",
            v => &v.to_string(),
        };
        let suit = match self.suit {
            0 => "♠",
            1 => "♣",
            2 => "♦",
            3 => "♥",
            _ => "?",
        };
        write!(f, "{rank}{suit}")
    }
}

/// Server-assigned player identifier. Opaque to the client.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(s: &str) -> Self {
        Self(s.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl<'de> Deserialize<'de> for PlayerId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self(s))
    }
}

impl From<String> for PlayerId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for PlayerId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// A player snapshot as carried by room and game events. The aliases accept
/// the lobby-side field spellings, which differ from the game engine's.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Player {
    #[serde(alias = "player_id")]
    pub id: PlayerId,
    #[serde(alias = "player_name")]
    pub name: String,
    #[serde(alias = "player_money", default)]
    pub money: Money,
}

impl Hash for Player {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Borrow<PlayerId> for Player {
    fn borrow(&self) -> &PlayerId {
        &self.id
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} (${})", self.name, self.money)
    }
}

/// Type alias for seat positions at the table.
pub type SeatIndex = usize;

/// A fixed ordinal position at the table, independent of who occupies it.
/// Seat order is server-defined and stable for a room's lifetime.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Seat {
    pub index: SeatIndex,
    pub occupant: Option<Player>,
}

/// An amount of currency at stake, possibly one of several side pots.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Pot {
    pub money: Money,
    #[serde(default)]
    pub player_ids: Vec<PlayerId>,
}

/// A revealed hand's strength: a category ordinal plus the cards that
/// produced it. Label lookup goes through [`GameKind::score_category_labels`]
/// since the two variants order some categories differently.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Score {
    pub category: usize,
    #[serde(default)]
    pub cards: Vec<Card>,
}

/// The two game variants the server deals.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum GameKind {
    /// Five-card draw ("traditional" on the wire).
    #[serde(rename = "traditional")]
    Draw,
    /// Two hole cards plus a shared board ("texas-holdem" on the wire).
    #[serde(rename = "texas-holdem")]
    CommunityCard,
}

impl GameKind {
    /// Number of cards dealt to each seated player, fixed for the hand's
    /// lifetime once the new-game event names the variant.
    pub fn seat_card_count(self) -> usize {
        match self {
            Self::Draw => 5,
            Self::CommunityCard => 2,
        }
    }

    /// Whether the variant deals a shared board.
    pub fn uses_shared_cards(self) -> bool {
        match self {
            Self::Draw => false,
            Self::CommunityCard => true,
        }
    }

    /// Score-category labels, indexed by the category ordinal carried in
    /// [`Score`]. The two variants swap the flush/full-house positions.
    pub fn score_category_labels(self) -> &'static [&'static str; 9] {
        match self {
            Self::Draw => &[
                "Highest card",
                "Pair",
                "Double pair",
                "Three of a kind",
                "Straight",
                "Full house",
                "Flush",
                "Four of a kind",
                "Straight flush",
            ],
            Self::CommunityCard => &[
                "Highest card",
                "Pair",
                "Double pair",
                "Three of a kind",
                "Straight",
                "Flush",
                "Full house",
                "Four of a kind",
                "Straight flush",
            ],
        }
    }
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::Draw => "draw",
            Self::CommunityCard => "community-card",
        };
        write!(f, "{repr}")
    }
}

/// What this client knows about one seat's cards. Other players' cards stay
/// opaque until a showdown; only counts are ever tracked for them.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SeatCards {
    /// Face-down placeholders.
    Hidden(usize),
    /// Cards revealed by the server, either our own assignment or a showdown.
    Revealed(Vec<Card>),
}

impl SeatCards {
    pub fn count(&self) -> usize {
        match self {
            Self::Hidden(n) => *n,
            Self::Revealed(cards) => cards.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_display_uses_letter_ranks() {
        assert_eq!(Card { rank: 14, suit: 3 }.to_string(), "A♥");
        assert_eq!(Card { rank: 1, suit: 0 }.to_string(), "A♠");
        assert_eq!(Card { rank: 12, suit: 1 }.to_string(), "Q♣");
        assert_eq!(Card { rank: 7, suit: 2 }.to_string(), "7♦");
    }

    #[test]
    fn player_accepts_both_field_spellings() {
        let game_side: Player =
            serde_json::from_str(r#"{"id": "p1", "name": "alice", "money": 200}"#).unwrap();
        let lobby_side: Player = serde_json::from_str(
            r#"{"player_id": "p1", "player_name": "alice", "player_money": 200}"#,
        )
        .unwrap();
        assert_eq!(game_side, lobby_side);
    }

    #[test]
    fn seat_card_counts_per_variant() {
        assert_eq!(GameKind::Draw.seat_card_count(), 5);
        assert_eq!(GameKind::CommunityCard.seat_card_count(), 2);
    }

    #[test]
    fn label_tables_have_nine_entries_and_swap_flush_order() {
        let draw = GameKind::Draw.score_category_labels();
        let community = GameKind::CommunityCard.score_category_labels();
        assert_eq!(draw.len(), 9);
        assert_eq!(community.len(), 9);
        assert_eq!(draw[5], "Full house");
        assert_eq!(community[5], "Flush");
    }

    #[test]
    fn game_kind_wire_names() {
        let draw: GameKind = serde_json::from_str(r#""traditional""#).unwrap();
        let community: GameKind = serde_json::from_str(r#""texas-holdem""#).unwrap();
        assert_eq!(draw, GameKind::Draw);
        assert_eq!(community, GameKind::CommunityCard);
    }
}

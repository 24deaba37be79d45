//! Deterministic card-to-sprite encoding.
//!
//! The render layer draws cards by offsetting a CSS sprite sheet; this
//! module computes that offset. It is the only place card validity is
//! enforced: an invalid card yields [`InvalidCard`] and the caller skips
//! that one card without aborting its siblings.

use thiserror::Error;

use crate::game::entities::{Card, SuitCode, Value};

/// The three fixed sprite tiers the render layer ships.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum CardSize {
    Small,
    Medium,
    Large,
}

impl CardSize {
    pub const ALL: [CardSize; 3] = [CardSize::Small, CardSize::Medium, CardSize::Large];

    /// Cell dimensions (width, height) of one card in this tier's sheet.
    pub fn cell(self) -> (i32, i32) {
        match self {
            Self::Small => (24, 40),
            Self::Medium => (45, 75),
            Self::Large => (75, 125),
        }
    }

    /// Sheet resource backing this tier.
    pub fn sheet(self) -> &'static str {
        match self {
            Self::Small => "cards-small.png",
            Self::Medium => "cards-medium.png",
            Self::Large => "cards-large.png",
        }
    }
}

/// A background-position offset into a sprite sheet.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SpritePos {
    pub x: i32,
    pub y: i32,
    pub sheet: &'static str,
}

/// A card the server asserted but the sheet cannot depict. Skipping it is
/// the defined behavior; it is never fatal to the surrounding batch.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum InvalidCard {
    #[error("invalid rank: {0}")]
    Rank(Value),
    #[error("invalid suit: {0}")]
    Suit(SuitCode),
}

/// Encode a card into its sprite-sheet position for the requested tier.
///
/// The suit selects a sheet quadrant, the rank a column within it. Rank 14
/// is the ace's high alias and normalizes to 1, so
/// `encode(Card { rank: 14, .. }, z) == encode(Card { rank: 1, .. }, z)`.
pub fn encode(card: Card, size: CardSize) -> Result<SpritePos, InvalidCard> {
    let (width, height) = size.cell();
    let mut x = 0;
    let mut y = 0;

    match card.suit {
        0 => {
            // Spades
            x -= width;
            y -= height;
        }
        1 => {
            // Clubs
            y -= height;
        }
        2 => {
            // Diamonds
            x -= width;
        }
        3 => {
            // Hearts
        }
        suit => return Err(InvalidCard::Suit(suit)),
    }

    let rank = if card.rank == 14 { 1 } else { card.rank };
    if !(1..=13).contains(&rank) {
        return Err(InvalidCard::Rank(card.rank));
    }

    x -= i32::from(rank - 1) * 2 * width + width;

    Ok(SpritePos {
        x,
        y,
        sheet: size.sheet(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(rank: Value, suit: SuitCode) -> Card {
        Card { rank, suit }
    }

    #[test]
    fn total_over_the_valid_domain() {
        for size in CardSize::ALL {
            for rank in 1..=14u8 {
                for suit in 0..=3u8 {
                    let pos = encode(card(rank, suit), size)
                        .unwrap_or_else(|e| panic!("{rank}/{suit} rejected: {e}"));
                    assert_eq!(pos.sheet, size.sheet());
                }
            }
        }
    }

    #[test]
    fn deterministic() {
        for size in CardSize::ALL {
            for rank in 1..=14u8 {
                for suit in 0..=3u8 {
                    let c = card(rank, suit);
                    assert_eq!(encode(c, size), encode(c, size));
                }
            }
        }
    }

    #[test]
    fn ace_high_aliases_to_ace_low() {
        for size in CardSize::ALL {
            for suit in 0..=3u8 {
                assert_eq!(encode(card(14, suit), size), encode(card(1, suit), size));
            }
        }
    }

    #[test]
    fn invalid_ranks_rejected_in_every_tier() {
        for size in CardSize::ALL {
            for rank in [0u8, 15, 42, 255] {
                assert_eq!(
                    encode(card(rank, 2), size),
                    Err(InvalidCard::Rank(rank)),
                    "rank {rank} should be invalid"
                );
            }
        }
    }

    #[test]
    fn invalid_suits_rejected_in_every_tier() {
        for size in CardSize::ALL {
            for suit in [4u8, 7, 255] {
                assert_eq!(encode(card(10, suit), size), Err(InvalidCard::Suit(suit)));
            }
        }
    }

    #[test]
    fn suit_selects_quadrant() {
        // Ace column, small tier: x starts at -width for the rank offset.
        let (w, h) = CardSize::Small.cell();
        let ace = |suit| encode(card(1, suit), CardSize::Small).unwrap();
        assert_eq!((ace(0).x, ace(0).y), (-2 * w, -h));
        assert_eq!((ace(1).x, ace(1).y), (-w, -h));
        assert_eq!((ace(2).x, ace(2).y), (-2 * w, 0));
        assert_eq!((ace(3).x, ace(3).y), (-w, 0));
    }

    #[test]
    fn rank_advances_two_cells_per_column() {
        let (w, _) = CardSize::Large.cell();
        let two = encode(card(2, 3), CardSize::Large).unwrap();
        let three = encode(card(3, 3), CardSize::Large).unwrap();
        assert_eq!(two.x - three.x, 2 * w);
    }
}

//! # Card Encoding
//!
//! One playing card packed into a single small integer:
//! `code = suit * 13 + rank`, with rank 0–12 (Two through Ace) and suit 0–3
//! (clubs, diamonds, hearts, spades). The packing is a bijection onto 0–51;
//! the circuits prove the decomposition rather than trusting it.
//!
//! The two-character notation used in tests ("Ah", "Td", "2c") follows the
//! usual rank-then-suit convention.

use serde::{Deserialize, Serialize};

use crate::error::WitnessError;

/// Number of distinct ranks.
pub const NUM_RANKS: u8 = 13;

/// Number of distinct suits.
pub const NUM_SUITS: u8 = 4;

/// Number of distinct cards.
pub const DECK_SIZE: u8 = NUM_RANKS * NUM_SUITS;

/// Bit width of the range checks that bound card codes in-circuit.
pub const CARD_BITS: usize = 6;

const RANK_CHARS: &[u8; 13] = b"23456789TJQKA";
const SUIT_CHARS: &[u8; 4] = b"cdhs";

/// One playing card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    rank: u8,
    suit: u8,
}

impl Card {
    /// Build a card from rank (0–12) and suit (0–3).
    pub fn new(rank: u8, suit: u8) -> Result<Self, WitnessError> {
        if rank >= NUM_RANKS {
            return Err(WitnessError::IndexOutOfBounds {
                context: "card rank".to_string(),
                index: rank as usize,
                size: NUM_RANKS as usize,
            });
        }
        if suit >= NUM_SUITS {
            return Err(WitnessError::IndexOutOfBounds {
                context: "card suit".to_string(),
                index: suit as usize,
                size: NUM_SUITS as usize,
            });
        }
        Ok(Self { rank, suit })
    }

    /// Decode a packed card code (0–51).
    pub fn from_code(code: u8) -> Result<Self, WitnessError> {
        if code >= DECK_SIZE {
            return Err(WitnessError::IndexOutOfBounds {
                context: "card code".to_string(),
                index: code as usize,
                size: DECK_SIZE as usize,
            });
        }
        Ok(Self {
            rank: code % NUM_RANKS,
            suit: code / NUM_RANKS,
        })
    }

    /// The packed code, `suit * 13 + rank`.
    pub fn code(&self) -> u8 {
        self.suit * NUM_RANKS + self.rank
    }

    /// Rank 0–12 (Two = 0, Ace = 12).
    pub fn rank(&self) -> u8 {
        self.rank
    }

    /// Suit 0–3 (clubs, diamonds, hearts, spades).
    pub fn suit(&self) -> u8 {
        self.suit
    }
}

impl std::str::FromStr for Card {
    type Err = WitnessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        let (rank_ch, suit_ch) = match bytes {
            [r, s] => (*r, *s),
            _ => {
                return Err(WitnessError::IndexOutOfBounds {
                    context: format!("card notation {s:?}"),
                    index: s.len(),
                    size: 2,
                })
            }
        };
        let rank = RANK_CHARS
            .iter()
            .position(|&c| c == rank_ch)
            .ok_or_else(|| WitnessError::IndexOutOfBounds {
                context: format!("card rank char {:?}", rank_ch as char),
                index: 0,
                size: NUM_RANKS as usize,
            })?;
        let suit = SUIT_CHARS
            .iter()
            .position(|&c| c == suit_ch)
            .ok_or_else(|| WitnessError::IndexOutOfBounds {
                context: format!("card suit char {:?}", suit_ch as char),
                index: 0,
                size: NUM_SUITS as usize,
            })?;
        Ok(Self {
            rank: rank as u8,
            suit: suit as u8,
        })
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{}",
            RANK_CHARS[self.rank as usize] as char,
            SUIT_CHARS[self.suit as usize] as char
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_roundtrip_is_bijective() {
        for code in 0..DECK_SIZE {
            let card = Card::from_code(code).expect("valid code");
            assert_eq!(card.code(), code);
        }
    }

    #[test]
    fn test_rejects_out_of_range() {
        assert!(Card::from_code(52).is_err());
        assert!(Card::new(13, 0).is_err());
        assert!(Card::new(0, 4).is_err());
    }

    #[test]
    fn test_notation() {
        let card: Card = "Ah".parse().expect("valid notation");
        assert_eq!(card.rank(), 12);
        assert_eq!(card.suit(), 2);
        assert_eq!(card.code(), 2 * 13 + 12);
        assert_eq!(card.to_string(), "Ah");

        let card: Card = "2c".parse().expect("valid notation");
        assert_eq!(card.code(), 0);

        assert!("Ax".parse::<Card>().is_err());
        assert!("1h".parse::<Card>().is_err());
        assert!("Ahh".parse::<Card>().is_err());
    }
}

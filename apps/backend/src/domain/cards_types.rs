//! Core card-related types: Card, Rank, Suit

use crate::errors::domain::{DomainError, ValidationKind};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Suit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];

    /// Lowercase name used inside card ids.
    pub const fn name(self) -> &'static str {
        match self {
            Suit::Hearts => "hearts",
            Suit::Diamonds => "diamonds",
            Suit::Clubs => "clubs",
            Suit::Spades => "spades",
        }
    }

    /// Single-letter code used by the compact card encoding.
    pub const fn letter(self) -> char {
        match self {
            Suit::Hearts => 'h',
            Suit::Diamonds => 'd',
            Suit::Clubs => 'c',
            Suit::Spades => 's',
        }
    }

    pub fn from_letter(letter: &str) -> Result<Self, DomainError> {
        match letter {
            "h" => Ok(Suit::Hearts),
            "d" => Ok(Suit::Diamonds),
            "c" => Ok(Suit::Clubs),
            "s" => Ok(Suit::Spades),
            other => Err(DomainError::validation(
                ValidationKind::ParseCard,
                format!("Unknown suit letter: {other}"),
            )),
        }
    }
}

/// Card rank, ordered Two < ... < Ace. Numeric values run 2..=14.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Rank {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    pub const fn value(self) -> u8 {
        self as u8 + 2
    }

    pub fn from_value(value: u8) -> Result<Self, DomainError> {
        if !(2..=14).contains(&value) {
            return Err(DomainError::validation(
                ValidationKind::InvalidRank,
                format!("Rank must be 2..=14, got {value}"),
            ));
        }
        Ok(Self::ALL[(value - 2) as usize])
    }
}

/// A physical card. Identity is the `id`: multi-deck games hold several
/// cards with the same suit and rank.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
    pub id: String,
}

impl Card {
    pub fn new(suit: Suit, rank: Rank, id: impl Into<String>) -> Self {
        Self {
            suit,
            rank,
            id: id.into(),
        }
    }
}

// Ordering is only for stable display sorting: rank first, then suit, then id.
impl Ord for Card {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.rank
            .cmp(&other.rank)
            .then(self.suit.cmp(&other.suit))
            .then_with(|| self.id.cmp(&other.id))
    }
}

impl PartialOrd for Card {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank_values_cover_two_to_ace() {
        assert_eq!(Rank::Two.value(), 2);
        assert_eq!(Rank::Ten.value(), 10);
        assert_eq!(Rank::Ace.value(), 14);
        for rank in Rank::ALL {
            assert_eq!(Rank::from_value(rank.value()).unwrap(), rank);
        }
    }

    #[test]
    fn rank_rejects_out_of_range() {
        assert!(Rank::from_value(1).is_err());
        assert!(Rank::from_value(15).is_err());
    }

    #[test]
    fn suit_letters_round_trip() {
        for suit in Suit::ALL {
            let letter = suit.letter().to_string();
            assert_eq!(Suit::from_letter(&letter).unwrap(), suit);
        }
        assert!(Suit::from_letter("x").is_err());
    }
}

// Proptest generators for domain types.
// Card ids are generated from position so every generated card is unique.

use proptest::prelude::*;

use crate::domain::{Card, Rank, Suit};

/// Generate a random Suit
pub fn suit() -> impl Strategy<Value = Suit> {
    prop_oneof![
        Just(Suit::Hearts),
        Just(Suit::Diamonds),
        Just(Suit::Clubs),
        Just(Suit::Spades),
    ]
}

/// Generate a random Rank
pub fn rank() -> impl Strategy<Value = Rank> {
    (0usize..13).prop_map(|i| Rank::ALL[i])
}

/// Generate a rank that is not 2, 3, 7 or 10
pub fn ordinary_rank() -> impl Strategy<Value = Rank> {
    prop_oneof![
        Just(Rank::Four),
        Just(Rank::Five),
        Just(Rank::Six),
        Just(Rank::Eight),
        Just(Rank::Nine),
        Just(Rank::Jack),
        Just(Rank::Queen),
        Just(Rank::King),
        Just(Rank::Ace),
    ]
}

/// Build cards with unique ids from (suit, rank) pairs.
pub fn tagged(cards: Vec<(Suit, Rank)>, tag: &str) -> Vec<Card> {
    cards
        .into_iter()
        .enumerate()
        .map(|(i, (suit, rank))| Card::new(suit, rank, format!("{tag}-{i}")))
        .collect()
}

/// Generate a discard pile of up to `max` cards
pub fn pile(max: usize) -> impl Strategy<Value = Vec<Card>> {
    prop::collection::vec((suit(), rank()), 0..=max).prop_map(|cs| tagged(cs, "pile"))
}

/// Generate a pile made only of threes
pub fn all_threes_pile(max: usize) -> impl Strategy<Value = Vec<Card>> {
    prop::collection::vec(suit(), 0..=max)
        .prop_map(|suits| tagged(suits.into_iter().map(|s| (s, Rank::Three)).collect(), "g"))
}

/// Generate a same-rank play of 1..=4 cards
pub fn play_of(rank: Rank) -> impl Strategy<Value = Vec<Card>> {
    prop::collection::vec(suit(), 1..=4)
        .prop_map(move |suits| tagged(suits.into_iter().map(|s| (s, rank)).collect(), "play"))
}

/// Generate the out flags for a table of 2..=8 seats
pub fn out_flags() -> impl Strategy<Value = Vec<bool>> {
    prop::collection::vec(any::<bool>(), 2..=8)
}

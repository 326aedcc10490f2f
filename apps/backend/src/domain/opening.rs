//! Who leads once the swap phase ends.

use crate::domain::player::PlayerZones;
use crate::domain::{Card, Rank};

/// The leading seat and the cards it is forced to open with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opening {
    pub seat: usize,
    pub cards: Vec<Card>,
}

/// Ranks searched in order: four through ace, then three, then two.
fn opening_rank_order() -> impl Iterator<Item = Rank> {
    Rank::ALL
        .into_iter()
        .filter(|r| *r >= Rank::Four)
        .chain([Rank::Three, Rank::Two])
}

/// The first seat holding the lowest opening rank leads with every hand
/// card of that rank. With no hand cards at all, seat 0 leads with nothing.
pub fn starting_player_and_cards<P: PlayerZones>(players: &[P]) -> Opening {
    for rank in opening_rank_order() {
        for (seat, player) in players.iter().enumerate() {
            let cards: Vec<Card> = player
                .hand()
                .iter()
                .filter(|c| c.rank == rank)
                .cloned()
                .collect();
            if !cards.is_empty() {
                return Opening { seat, cards };
            }
        }
    }
    Opening {
        seat: 0,
        cards: Vec::new(),
    }
}

//! What a single seat can see when it is asked to act.

use crate::domain::moves::moves_from_cards;
use crate::domain::player::PlayerZones;
use crate::domain::rules::effective_top_card;
use crate::domain::Card;

/// Public information about another seat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpponentView {
    pub seat: usize,
    pub hand_count: usize,
    pub face_up: Vec<Card>,
    pub face_down_count: usize,
    pub is_out: bool,
}

/// Everything visible to the seat whose turn it is. Face-down identities
/// are hidden, including the seat's own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerView {
    pub seat: usize,
    pub hand: Vec<Card>,
    pub face_up: Vec<Card>,
    pub face_down_count: usize,
    pub pile: Vec<Card>,
    pub deck_count: usize,
    pub opponents: Vec<OpponentView>,
}

impl PlayerView {
    /// Build the view for `seat` from any collection of seats.
    pub fn for_seat<P: PlayerZones>(
        seat: usize,
        players: &[P],
        pile: &[Card],
        deck_count: usize,
    ) -> Option<Self> {
        let me = players.get(seat)?;
        let opponents = players
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != seat)
            .map(|(i, p)| OpponentView {
                seat: i,
                hand_count: p.hand().len(),
                face_up: p.face_up().to_vec(),
                face_down_count: p.face_down().len(),
                is_out: p.is_out(),
            })
            .collect();
        Some(Self {
            seat,
            hand: me.hand().to_vec(),
            face_up: me.face_up().to_vec(),
            face_down_count: me.face_down().len(),
            pile: pile.to_vec(),
            deck_count,
            opponents,
        })
    }

    pub fn deck_empty(&self) -> bool {
        self.deck_count == 0
    }

    /// Only unseen face-down cards are left.
    pub fn must_play_blind(&self) -> bool {
        self.hand.is_empty() && self.face_up.is_empty() && self.face_down_count > 0
    }

    /// Cards in the zone this seat currently plays from, if it can see them.
    pub fn playable_cards(&self) -> &[Card] {
        if !self.hand.is_empty() || !self.deck_empty() {
            &self.hand
        } else {
            &self.face_up
        }
    }

    pub fn valid_moves(&self) -> Vec<Vec<Card>> {
        moves_from_cards(self.playable_cards(), &self.pile)
    }

    pub fn effective_top(&self) -> Option<&Card> {
        effective_top_card(&self.pile)
    }
}

//! Player zones and the shared view of them used by rule helpers.

use crate::domain::Card;

/// Cards in each hand from the deal and the refill target while the deck lasts.
pub const HAND_SIZE: usize = 4;

/// A seat in a local match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub id: String,
    pub name: String,
    pub hand: Vec<Card>,
    pub face_up: Vec<Card>,
    pub face_down: Vec<Card>,
    pub is_ai: bool,
    pub is_out: bool,
}

impl Player {
    pub fn new(id: impl Into<String>, name: impl Into<String>, is_ai: bool) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            hand: Vec::new(),
            face_up: Vec::new(),
            face_down: Vec::new(),
            is_ai,
            is_out: false,
        }
    }
}

/// Read access to a seat's three zones.
///
/// Implemented by the local [`Player`] and the stored game document's player
/// entry so seat-order and move helpers work on both.
pub trait PlayerZones {
    fn hand(&self) -> &[Card];
    fn face_up(&self) -> &[Card];
    fn face_down(&self) -> &[Card];
    fn is_out(&self) -> bool;

    fn card_count(&self) -> usize {
        self.hand().len() + self.face_up().len() + self.face_down().len()
    }

    fn holds_no_cards(&self) -> bool {
        self.card_count() == 0
    }
}

impl PlayerZones for Player {
    fn hand(&self) -> &[Card] {
        &self.hand
    }
    fn face_up(&self) -> &[Card] {
        &self.face_up
    }
    fn face_down(&self) -> &[Card] {
        &self.face_down
    }
    fn is_out(&self) -> bool {
        self.is_out
    }
}

impl<T: PlayerZones + ?Sized> PlayerZones for &T {
    fn hand(&self) -> &[Card] {
        (**self).hand()
    }
    fn face_up(&self) -> &[Card] {
        (**self).face_up()
    }
    fn face_down(&self) -> &[Card] {
        (**self).face_down()
    }
    fn is_out(&self) -> bool {
        (**self).is_out()
    }
}

/// Mutable access to a seat's zones for the play primitives.
pub trait PlayerZonesMut: PlayerZones {
    fn hand_mut(&mut self) -> &mut Vec<Card>;
    fn face_up_mut(&mut self) -> &mut Vec<Card>;
    fn face_down_mut(&mut self) -> &mut Vec<Card>;
    fn set_out(&mut self, out: bool);
}

impl PlayerZonesMut for Player {
    fn hand_mut(&mut self) -> &mut Vec<Card> {
        &mut self.hand
    }
    fn face_up_mut(&mut self) -> &mut Vec<Card> {
        &mut self.face_up
    }
    fn face_down_mut(&mut self) -> &mut Vec<Card> {
        &mut self.face_down
    }
    fn set_out(&mut self, out: bool) {
        self.is_out = out;
    }
}

/// A seat is exhausted once every zone is empty and the deck cannot refill it.
pub fn is_exhausted<P: PlayerZones + ?Sized>(player: &P, deck_empty: bool) -> bool {
    deck_empty && player.holds_no_cards()
}

/// Remove the card with `id` from `zone`, preserving the order of the rest.
pub fn take_card(zone: &mut Vec<Card>, id: &str) -> Option<Card> {
    let pos = zone.iter().position(|c| c.id == id)?;
    Some(zone.remove(pos))
}

/// Top the hand back up to [`HAND_SIZE`] from the end of the deck.
pub fn refill_hand(hand: &mut Vec<Card>, deck: &mut Vec<Card>) -> usize {
    let mut drawn = 0;
    while hand.len() < HAND_SIZE {
        match deck.pop() {
            Some(card) => {
                hand.push(card);
                drawn += 1;
            }
            None => break,
        }
    }
    drawn
}

//! Play primitives over one seat and the piles.
//!
//! No turn logic lives here: callers check phase and turn ownership, then
//! apply these and handle the burn, out and next-seat bookkeeping. Both
//! coordinators use the same primitives.

use crate::domain::player::{refill_hand, take_card, PlayerZonesMut};
use crate::domain::rules::{can_play, validate_play, will_burn};
use crate::domain::{BurnCheck, Card};
use crate::errors::domain::{DomainError, ValidationKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayOutcome {
    pub played: Vec<Card>,
    pub burn: BurnCheck,
    pub player_out: bool,
    /// Cards drawn from the deck to refill the hand.
    pub drawn: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlindOutcome {
    pub card: Card,
    pub legal: bool,
    pub burn: BurnCheck,
    /// The reveal was illegal and the pile went into the hand.
    pub must_pickup: bool,
    /// Cards moved into the hand, the revealed card included.
    pub picked_up: usize,
    pub player_out: bool,
}

#[derive(Clone, Copy)]
enum Zone {
    Hand,
    FaceUp,
    FaceDown,
}

fn locate<P: PlayerZonesMut + ?Sized>(player: &P, id: &str) -> Option<(Zone, Card)> {
    let find = |cards: &[Card]| cards.iter().find(|c| c.id == id).cloned();
    find(player.hand())
        .map(|c| (Zone::Hand, c))
        .or_else(|| find(player.face_up()).map(|c| (Zone::FaceUp, c)))
        .or_else(|| find(player.face_down()).map(|c| (Zone::FaceDown, c)))
}

/// Play the cards with `card_ids` onto `pile`.
///
/// Every id must be held exactly once and the set must be legal; on any
/// failure nothing moves. The burn is judged against the pile as it was
/// before the play. The hand is refilled from `deck` afterwards.
pub fn execute_play<P: PlayerZonesMut + ?Sized>(
    player: &mut P,
    card_ids: &[String],
    pile: &mut Vec<Card>,
    deck: &mut Vec<Card>,
) -> Result<PlayOutcome, DomainError> {
    let mut located = Vec::with_capacity(card_ids.len());
    for (i, id) in card_ids.iter().enumerate() {
        if card_ids[..i].contains(id) {
            return Err(DomainError::validation(
                ValidationKind::CardNotHeld,
                format!("Card {id} selected twice"),
            ));
        }
        let found = locate(player, id).ok_or_else(|| {
            DomainError::validation(ValidationKind::CardNotHeld, format!("Card {id} not held"))
        })?;
        located.push(found);
    }

    let cards: Vec<Card> = located.iter().map(|(_, c)| c.clone()).collect();
    validate_play(&cards, pile)?;
    let burn = will_burn(&cards, pile);

    for (zone, card) in &located {
        let from = match zone {
            Zone::Hand => player.hand_mut(),
            Zone::FaceUp => player.face_up_mut(),
            Zone::FaceDown => player.face_down_mut(),
        };
        take_card(from, &card.id);
    }
    pile.extend(cards.iter().cloned());

    let drawn = refill_hand(player.hand_mut(), deck);
    let player_out = deck.is_empty() && player.holds_no_cards();
    if player_out {
        player.set_out(true);
    }

    Ok(PlayOutcome {
        played: cards,
        burn,
        player_out,
        drawn,
    })
}

/// Reveal the face-down card at `index` and play it if it is legal.
///
/// An illegal reveal sends the pile and the revealed card into the hand.
pub fn execute_blind_play<P: PlayerZonesMut + ?Sized>(
    player: &mut P,
    index: usize,
    pile: &mut Vec<Card>,
) -> Result<BlindOutcome, DomainError> {
    let count = player.face_down().len();
    if index >= count {
        return Err(DomainError::validation(
            ValidationKind::InvalidBlindIndex,
            format!("Face-down index {index} out of range for {count} cards"),
        ));
    }

    let card = player.face_down_mut().remove(index);
    let single = std::slice::from_ref(&card);

    if can_play(single, pile) {
        let burn = will_burn(single, pile);
        pile.push(card.clone());
        let player_out = player.holds_no_cards();
        if player_out {
            player.set_out(true);
        }
        return Ok(BlindOutcome {
            card,
            legal: true,
            burn,
            must_pickup: false,
            picked_up: 0,
            player_out,
        });
    }

    let picked_up = pile.len() + 1;
    let hand = player.hand_mut();
    hand.append(pile);
    hand.push(card.clone());
    Ok(BlindOutcome {
        card,
        legal: false,
        burn: BurnCheck::NONE,
        must_pickup: true,
        picked_up,
        player_out: false,
    })
}

/// Move the whole pile into the hand and return what moved.
pub fn execute_pickup<P: PlayerZonesMut + ?Sized>(player: &mut P, pile: &mut Vec<Card>) -> Vec<Card> {
    let taken = std::mem::take(pile);
    player.hand_mut().extend(taken.iter().cloned());
    taken
}

/// Exchange one hand card with one face-up card, keeping positions.
pub fn swap_hand_and_face_up<P: PlayerZonesMut + ?Sized>(
    player: &mut P,
    hand_card_id: &str,
    face_up_card_id: &str,
) -> Result<(), DomainError> {
    let hand_pos = player.hand().iter().position(|c| c.id == hand_card_id);
    let up_pos = player.face_up().iter().position(|c| c.id == face_up_card_id);
    match (hand_pos, up_pos) {
        (Some(h), Some(u)) => {
            let from_face_up = player.face_up()[u].clone();
            let from_hand = std::mem::replace(&mut player.hand_mut()[h], from_face_up);
            player.face_up_mut()[u] = from_hand;
            Ok(())
        }
        _ => Err(DomainError::validation(
            ValidationKind::CardNotHeld,
            format!("Cannot swap {hand_card_id} with {face_up_card_id}"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BurnReason, Player, Rank, Suit};

    fn c(rank: Rank, id: &str) -> Card {
        Card::new(Suit::Spades, rank, id)
    }

    fn ids(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn play_moves_cards_and_refills_hand() {
        // Arrange
        let mut p = Player::new("p", "P", false);
        p.hand = vec![c(Rank::Six, "a"), c(Rank::Six, "b"), c(Rank::Nine, "n")];
        let mut pile = vec![c(Rank::Five, "top")];
        let mut deck = vec![c(Rank::King, "k1"), c(Rank::Queen, "q1"), c(Rank::Jack, "j1")];

        // Act
        let out = execute_play(&mut p, &ids(&["a", "b"]), &mut pile, &mut deck).unwrap();

        // Assert
        assert_eq!(out.played.len(), 2);
        assert_eq!(out.drawn, 3);
        assert_eq!(p.hand.len(), 4);
        assert_eq!(pile.len(), 3);
        assert!(deck.is_empty());
        assert!(!out.burn.burn);
        assert!(!out.player_out);
    }

    #[test]
    fn illegal_play_mutates_nothing() {
        let mut p = Player::new("p", "P", false);
        p.hand = vec![c(Rank::Four, "four")];
        let mut pile = vec![c(Rank::King, "top")];
        let mut deck = vec![c(Rank::Ace, "ace")];
        let before = (p.clone(), pile.clone(), deck.clone());

        let err = execute_play(&mut p, &ids(&["four"]), &mut pile, &mut deck).unwrap_err();

        assert_eq!(err.validation_kind(), Some(&ValidationKind::IllegalPlay));
        assert_eq!((p, pile, deck), before);
    }

    #[test]
    fn unknown_or_repeated_ids_are_not_held() {
        let mut p = Player::new("p", "P", false);
        p.hand = vec![c(Rank::Four, "four")];
        let mut pile = Vec::new();
        let mut deck = Vec::new();

        for request in [ids(&["ghost"]), ids(&["four", "four"])] {
            let err = execute_play(&mut p, &request, &mut pile, &mut deck).unwrap_err();
            assert_eq!(err.validation_kind(), Some(&ValidationKind::CardNotHeld));
        }
        assert_eq!(p.hand.len(), 1);
    }

    #[test]
    fn burn_is_judged_against_the_pre_play_pile() {
        let mut p = Player::new("p", "P", false);
        p.hand = vec![c(Rank::Eight, "mine")];
        let mut pile = vec![c(Rank::Eight, "e1"), c(Rank::Eight, "e2"), c(Rank::Eight, "e3")];
        let mut deck = Vec::new();

        let out = execute_play(&mut p, &ids(&["mine"]), &mut pile, &mut deck).unwrap();

        assert_eq!(out.burn.reason, Some(BurnReason::FourOfAKind));
        assert_eq!(pile.len(), 4);
        assert!(out.player_out);
        assert!(p.is_out);
    }

    #[test]
    fn play_from_face_up_when_hand_is_gone() {
        let mut p = Player::new("p", "P", false);
        p.face_up = vec![c(Rank::Ten, "ten")];
        p.face_down = vec![c(Rank::Two, "fd")];
        let mut pile = vec![c(Rank::Ace, "ace")];
        let mut deck = Vec::new();

        let out = execute_play(&mut p, &ids(&["ten"]), &mut pile, &mut deck).unwrap();

        assert_eq!(out.burn.reason, Some(BurnReason::Ten));
        assert!(p.face_up.is_empty());
        assert!(!p.is_out);
    }

    #[test]
    fn legal_blind_reveal_goes_on_the_pile() {
        let mut p = Player::new("p", "P", false);
        p.face_down = vec![c(Rank::Two, "two"), c(Rank::Four, "four")];
        let mut pile = vec![c(Rank::King, "king")];

        let out = execute_blind_play(&mut p, 0, &mut pile).unwrap();

        assert!(out.legal);
        assert!(!out.must_pickup);
        assert_eq!(pile.last().map(|c| c.id.as_str()), Some("two"));
        assert_eq!(p.face_down.len(), 1);
    }

    #[test]
    fn illegal_blind_reveal_picks_up_pile_and_card() {
        let mut p = Player::new("p", "P", false);
        p.face_down = vec![c(Rank::Four, "four")];
        let mut pile = vec![c(Rank::Nine, "n1"), c(Rank::King, "king")];

        let out = execute_blind_play(&mut p, 0, &mut pile).unwrap();

        assert!(!out.legal);
        assert!(out.must_pickup);
        assert_eq!(out.picked_up, 3);
        assert!(pile.is_empty());
        assert_eq!(p.hand.len(), 3);
        assert!(p.face_down.is_empty());
        assert!(!p.is_out);
    }

    #[test]
    fn blind_index_out_of_range_fails_cleanly() {
        let mut p = Player::new("p", "P", false);
        p.face_down = vec![c(Rank::Four, "four")];
        let mut pile = Vec::new();

        let err = execute_blind_play(&mut p, 3, &mut pile).unwrap_err();

        assert_eq!(err.validation_kind(), Some(&ValidationKind::InvalidBlindIndex));
        assert_eq!(p.face_down.len(), 1);
    }

    #[test]
    fn swap_keeps_positions() {
        let mut p = Player::new("p", "P", false);
        p.hand = vec![c(Rank::Four, "h0"), c(Rank::Five, "h1")];
        p.face_up = vec![c(Rank::Ace, "u0"), c(Rank::Ten, "u1")];

        swap_hand_and_face_up(&mut p, "h1", "u0").unwrap();

        assert_eq!(p.hand[1].id, "u0");
        assert_eq!(p.face_up[0].id, "h1");
        assert!(swap_hand_and_face_up(&mut p, "h1", "u0").is_err());
    }

    #[test]
    fn pickup_takes_the_whole_pile() {
        let mut p = Player::new("p", "P", false);
        let mut pile = vec![c(Rank::Five, "a"), c(Rank::Six, "b")];

        let taken = execute_pickup(&mut p, &mut pile);

        assert_eq!(taken.len(), 2);
        assert!(pile.is_empty());
        assert_eq!(p.hand.len(), 2);
    }
}

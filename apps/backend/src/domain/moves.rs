//! Which zone a seat plays from and the moves available in it.

use crate::domain::dealing::group_by_rank;
use crate::domain::player::PlayerZones;
use crate::domain::rules::can_play_rank;
use crate::domain::Card;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayZone {
    Hand,
    FaceUp,
    FaceDown,
}

/// The hand while it has cards or the deck can refill it, then face-up,
/// then face-down.
pub fn playable_zone<P: PlayerZones + ?Sized>(player: &P, deck_empty: bool) -> PlayZone {
    if !player.hand().is_empty() || !deck_empty {
        PlayZone::Hand
    } else if !player.face_up().is_empty() {
        PlayZone::FaceUp
    } else {
        PlayZone::FaceDown
    }
}

pub fn zone_cards<P: PlayerZones + ?Sized>(player: &P, zone: PlayZone) -> &[Card] {
    match zone {
        PlayZone::Hand => player.hand(),
        PlayZone::FaceUp => player.face_up(),
        PlayZone::FaceDown => player.face_down(),
    }
}

/// True when only face-down cards remain, which are played blind.
pub fn must_play_blind<P: PlayerZones + ?Sized>(player: &P) -> bool {
    player.hand().is_empty() && player.face_up().is_empty() && !player.face_down().is_empty()
}

/// Every legal set from the playable zone: for each playable rank, one
/// candidate per size from a single card up to all held cards of that rank.
///
/// Face-down cards are unknown to their owner, so a blind seat has no
/// enumerable moves.
pub fn find_valid_moves<P: PlayerZones + ?Sized>(
    player: &P,
    pile: &[Card],
    deck_empty: bool,
) -> Vec<Vec<Card>> {
    let zone = playable_zone(player, deck_empty);
    if zone == PlayZone::FaceDown {
        return Vec::new();
    }
    moves_from_cards(zone_cards(player, zone), pile)
}

/// Legal sets drawn from `cards` against `pile`, grouped by ascending rank.
pub fn moves_from_cards(cards: &[Card], pile: &[Card]) -> Vec<Vec<Card>> {
    let mut moves = Vec::new();
    for (rank, group) in group_by_rank(cards) {
        if !can_play_rank(rank, pile) {
            continue;
        }
        for size in 1..=group.len() {
            moves.push(group[..size].to_vec());
        }
    }
    moves
}

pub fn has_valid_move<P: PlayerZones + ?Sized>(player: &P, pile: &[Card], deck_empty: bool) -> bool {
    !find_valid_moves(player, pile, deck_empty).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::player::Player;
    use crate::domain::{Rank, Suit};

    fn cards(ranks: &[Rank], tag: &str) -> Vec<Card> {
        ranks
            .iter()
            .enumerate()
            .map(|(i, &r)| Card::new(Suit::Diamonds, r, format!("{tag}-{i}")))
            .collect()
    }

    #[test]
    fn hand_is_playable_while_deck_remains() {
        let mut p = Player::new("p", "P", false);
        p.face_up = cards(&[Rank::Nine], "u");
        assert_eq!(playable_zone(&p, false), PlayZone::Hand);
        assert_eq!(playable_zone(&p, true), PlayZone::FaceUp);
        p.face_up.clear();
        assert_eq!(playable_zone(&p, true), PlayZone::FaceDown);
    }

    #[test]
    fn moves_enumerate_every_size_of_each_playable_rank() {
        let mut p = Player::new("p", "P", false);
        p.hand = cards(&[Rank::Five, Rank::Nine, Rank::Nine, Rank::Four], "h");
        let pile = cards(&[Rank::Five], "pile");

        let moves = find_valid_moves(&p, &pile, true);
        // Five once, nine as single and pair; four is too low.
        assert_eq!(moves.len(), 3);
        assert!(moves.iter().any(|m| m.len() == 2 && m[0].rank == Rank::Nine));
        assert!(moves.iter().all(|m| m[0].rank != Rank::Four));
    }

    #[test]
    fn blind_seat_has_no_enumerable_moves() {
        let mut p = Player::new("p", "P", false);
        p.face_down = cards(&[Rank::Ace], "d");
        assert!(must_play_blind(&p));
        assert!(!has_valid_move(&p, &[], true));
    }
}

//! Move-selection helpers shared by the AI tiers.

use rand::Rng;

use super::trait_def::AiMove;
use crate::domain::player_view::PlayerView;
use crate::domain::rules::{will_burn, BURN, CAP, GLASS, RESET};
use crate::domain::{BurnReason, Card, Rank};

/// Ranks with an effect beyond their face value.
pub const SPECIAL_RANKS: [Rank; 4] = [RESET, GLASS, CAP, BURN];

pub fn is_special(rank: Rank) -> bool {
    SPECIAL_RANKS.contains(&rank)
}

/// Rank of a candidate set. Candidates are never empty.
fn move_rank(m: &[Card]) -> Option<Rank> {
    m.first().map(|c| c.rank)
}

/// Moves every tier makes identically: a blind flip when only face-down
/// cards remain, and a pickup when nothing is legal.
pub fn forced_move<R: Rng + ?Sized>(view: &PlayerView, rng: &mut R) -> Option<AiMove> {
    if view.must_play_blind() {
        return Some(AiMove::Blind(rng.random_range(0..view.face_down_count)));
    }
    if view.valid_moves().is_empty() {
        return Some(AiMove::Pickup);
    }
    None
}

/// First candidate that completes four of a kind on the pile.
pub fn burn_opportunity(moves: &[Vec<Card>], pile: &[Card]) -> Option<Vec<Card>> {
    moves
        .iter()
        .find(|m| {
            let check = will_burn(m, pile);
            check.burn && check.reason == Some(BurnReason::FourOfAKind)
        })
        .cloned()
}

/// The lowest-ranked candidate, taking as many cards of that rank as held.
pub fn lowest_longest(moves: &[Vec<Card>]) -> Option<Vec<Card>> {
    let lowest = moves.iter().filter_map(|m| move_rank(m)).min()?;
    moves
        .iter()
        .filter(|m| move_rank(m) == Some(lowest))
        .max_by_key(|m| m.len())
        .cloned()
}

/// Candidates without special effects, or the specials when nothing else
/// is playable.
pub fn prefer_normal(moves: &[Vec<Card>]) -> Vec<Vec<Card>> {
    let (normal, special): (Vec<_>, Vec<_>) = moves
        .iter()
        .cloned()
        .partition(|m| move_rank(m).is_some_and(|r| !is_special(r)));
    if normal.is_empty() {
        special
    } else {
        normal
    }
}

/// Longest multi-card candidate, lower rank first on ties.
pub fn best_multi_card(moves: &[Vec<Card>]) -> Option<Vec<Card>> {
    let mut multi: Vec<&Vec<Card>> = moves.iter().filter(|m| m.len() >= 2).collect();
    multi.sort_by(|a, b| {
        b.len()
            .cmp(&a.len())
            .then_with(|| move_rank(a).cmp(&move_rank(b)))
    });
    multi.first().map(|m| (*m).clone())
}

/// Endgame worth of a card left on the table. Specials outrank every
/// ordinary card; ordinary cards weigh their face value.
pub fn card_weight(rank: Rank) -> u8 {
    if is_special(rank) {
        Rank::Ace.value() + rank.value()
    } else {
        rank.value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Suit;

    fn c(rank: Rank, id: &str) -> Card {
        Card::new(Suit::Hearts, rank, id)
    }

    #[test]
    fn lowest_longest_takes_every_card_of_lowest_rank() {
        let moves = vec![
            vec![c(Rank::Five, "a")],
            vec![c(Rank::Five, "a"), c(Rank::Five, "b")],
            vec![c(Rank::Nine, "c")],
        ];
        assert_eq!(lowest_longest(&moves).unwrap().len(), 2);
    }

    #[test]
    fn burn_opportunity_completes_four() {
        let pile = vec![c(Rank::Eight, "p1"), c(Rank::Eight, "p2")];
        let moves = vec![
            vec![c(Rank::Eight, "a")],
            vec![c(Rank::Eight, "a"), c(Rank::Eight, "b")],
        ];
        assert_eq!(burn_opportunity(&moves, &pile).unwrap().len(), 2);
        assert!(burn_opportunity(&moves[..1], &pile).is_none());
    }

    #[test]
    fn tens_are_not_four_of_a_kind_burns() {
        let moves = vec![vec![c(Rank::Ten, "t")]];
        assert!(burn_opportunity(&moves, &[]).is_none());
    }

    #[test]
    fn prefer_normal_falls_back_to_specials() {
        let specials = vec![vec![c(Rank::Two, "a")], vec![c(Rank::Ten, "b")]];
        assert_eq!(prefer_normal(&specials).len(), 2);

        let mut mixed = specials.clone();
        mixed.push(vec![c(Rank::King, "k")]);
        assert_eq!(prefer_normal(&mixed), vec![vec![c(Rank::King, "k")]]);
    }

    #[test]
    fn best_multi_card_breaks_ties_by_rank() {
        let moves = vec![
            vec![c(Rank::Queen, "q1"), c(Rank::Queen, "q2")],
            vec![c(Rank::Six, "s1"), c(Rank::Six, "s2")],
            vec![c(Rank::Four, "f")],
        ];
        assert_eq!(best_multi_card(&moves).unwrap()[0].rank, Rank::Six);
    }

    #[test]
    fn weights_rank_specials_above_ordinary_cards() {
        assert!(card_weight(Rank::Two) > card_weight(Rank::Ace));
        assert!(card_weight(Rank::Ten) > card_weight(Rank::Seven));
        assert!(card_weight(Rank::King) > card_weight(Rank::Four));
        assert_eq!(card_weight(Rank::King), 13);
    }
}

//! Play legality and burn detection against the discard pile.
//!
//! The discard pile is ordered bottom to top; the top card is the last
//! element. Threes are transparent: they never change what may be played
//! next, so most checks look through them.

use crate::domain::{Card, Rank};
use crate::errors::domain::{DomainError, ValidationKind};

/// Resets the pile; always playable.
pub const RESET: Rank = Rank::Two;
/// Glass card; always playable and transparent to the next player.
pub const GLASS: Rank = Rank::Three;
/// Caps the pile: the next play must be seven or lower.
pub const CAP: Rank = Rank::Seven;
/// Burns the pile; always playable.
pub const BURN: Rank = Rank::Ten;
/// Reverses play direction when the optional reverse rule is on.
pub const REVERSE: Rank = Rank::Jack;

/// Ranks that may be played on anything.
pub const ALWAYS_PLAYABLE: [Rank; 3] = [RESET, GLASS, BURN];

/// Identical ranks on top of the pile that burn it.
pub const BURN_COUNT: usize = 4;

/// Why a pile burned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BurnReason {
    Ten,
    FourOfAKind,
}

impl BurnReason {
    pub const fn as_str(self) -> &'static str {
        match self {
            BurnReason::Ten => "ten",
            BurnReason::FourOfAKind => "four_of_a_kind",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BurnCheck {
    pub burn: bool,
    pub reason: Option<BurnReason>,
}

impl BurnCheck {
    pub const NONE: BurnCheck = BurnCheck {
        burn: false,
        reason: None,
    };

    fn burned(reason: BurnReason) -> Self {
        Self {
            burn: true,
            reason: Some(reason),
        }
    }
}

/// The most recent non-three card on the pile.
pub fn effective_top_card(pile: &[Card]) -> Option<&Card> {
    pile.iter().rev().find(|c| c.rank != GLASS)
}

/// True when a seven is the effective top and no two has reset it since.
pub fn is_seven_active(pile: &[Card]) -> bool {
    for card in pile.iter().rev() {
        match card.rank {
            GLASS => continue,
            CAP => return true,
            _ => return false,
        }
    }
    false
}

/// Rank shared by every card in `cards`, rejecting empty or mixed sets.
pub fn uniform_rank(cards: &[Card]) -> Result<Rank, DomainError> {
    let Some(first) = cards.first() else {
        return Err(DomainError::validation(
            ValidationKind::EmptyPlay,
            "No cards selected",
        ));
    };
    if cards.iter().any(|c| c.rank != first.rank) {
        return Err(DomainError::validation(
            ValidationKind::MixedRanks,
            "All played cards must share a rank",
        ));
    }
    Ok(first.rank)
}

/// Whether `rank` may be played on `pile`.
pub fn can_play_rank(rank: Rank, pile: &[Card]) -> bool {
    if ALWAYS_PLAYABLE.contains(&rank) || pile.is_empty() {
        return true;
    }
    if is_seven_active(pile) {
        return rank <= CAP;
    }
    let top = effective_top_card(pile).map(|c| c.rank);
    if rank == CAP {
        return top.is_none_or(|t| t <= CAP);
    }
    top.is_none_or(|t| rank >= t)
}

/// Whether `cards` form a legal play on `pile`.
pub fn can_play(cards: &[Card], pile: &[Card]) -> bool {
    uniform_rank(cards).is_ok_and(|rank| can_play_rank(rank, pile))
}

/// Like [`can_play`], but explains why a play is rejected.
pub fn validate_play(cards: &[Card], pile: &[Card]) -> Result<Rank, DomainError> {
    let rank = uniform_rank(cards)?;
    if !can_play_rank(rank, pile) {
        let detail = match effective_top_card(pile) {
            Some(top) if is_seven_active(pile) => {
                format!("{:?} cannot go on an active {:?}", rank, top.rank)
            }
            Some(top) => format!("{:?} cannot go on {:?}", rank, top.rank),
            None => format!("{rank:?} cannot be played here"),
        };
        return Err(DomainError::validation(ValidationKind::IllegalPlay, detail));
    }
    Ok(rank)
}

/// Whether playing `cards` onto `pile_before` burns the pile.
///
/// A ten always burns. Four or more of a rank on top burns: for threes the
/// run must be strictly consecutive, for any other rank interleaved threes
/// are skipped while counting.
pub fn will_burn(cards: &[Card], pile_before: &[Card]) -> BurnCheck {
    let Some(first) = cards.first() else {
        return BurnCheck::NONE;
    };
    let rank = first.rank;
    if rank == BURN {
        return BurnCheck::burned(BurnReason::Ten);
    }

    let on_pile = if rank == GLASS {
        pile_before
            .iter()
            .rev()
            .take_while(|c| c.rank == GLASS)
            .count()
    } else {
        let mut count = 0;
        for card in pile_before.iter().rev() {
            if card.rank == rank {
                count += 1;
            } else if card.rank != GLASS {
                break;
            }
        }
        count
    };

    if on_pile + cards.len() >= BURN_COUNT {
        BurnCheck::burned(BurnReason::FourOfAKind)
    } else {
        BurnCheck::NONE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Suit;

    fn card(rank: Rank) -> Card {
        Card::new(Suit::Hearts, rank, format!("t-{}", rank.value()))
    }

    fn pile(ranks: &[Rank]) -> Vec<Card> {
        ranks
            .iter()
            .enumerate()
            .map(|(i, &r)| Card::new(Suit::Clubs, r, format!("p-{i}")))
            .collect()
    }

    #[test]
    fn effective_top_skips_threes() {
        assert!(effective_top_card(&[]).is_none());
        assert!(effective_top_card(&pile(&[Rank::Three, Rank::Three])).is_none());
        let p = pile(&[Rank::Nine, Rank::Three, Rank::Three]);
        assert_eq!(effective_top_card(&p).unwrap().rank, Rank::Nine);
    }

    #[test]
    fn seven_activity_cases() {
        assert!(is_seven_active(&pile(&[Rank::Seven])));
        assert!(!is_seven_active(&pile(&[Rank::Seven, Rank::Two])));
        assert!(is_seven_active(&pile(&[Rank::Seven, Rank::Three])));
        assert!(!is_seven_active(&pile(&[Rank::Seven, Rank::Three, Rank::Five])));
        assert!(!is_seven_active(&[]));
    }

    #[test]
    fn empty_and_mixed_sets_are_illegal() {
        assert!(!can_play(&[], &[]));
        let mixed = vec![card(Rank::Five), card(Rank::Six)];
        assert!(!can_play(&mixed, &[]));
        assert_eq!(
            validate_play(&mixed, &[]).unwrap_err().validation_kind(),
            Some(&ValidationKind::MixedRanks)
        );
    }

    #[test]
    fn special_ranks_play_on_anything() {
        let p = pile(&[Rank::Ace]);
        for rank in [Rank::Two, Rank::Three, Rank::Ten] {
            assert!(can_play(&[card(rank)], &p), "{rank:?} on Ace");
        }
        let capped = pile(&[Rank::Seven]);
        assert!(can_play(&[card(Rank::Ten)], &capped));
    }

    #[test]
    fn anything_plays_on_an_empty_pile() {
        for rank in Rank::ALL {
            assert!(can_play(&[card(rank)], &[]));
        }
    }

    #[test]
    fn active_seven_caps_the_next_play() {
        let p = pile(&[Rank::Seven]);
        assert!(!can_play(&[card(Rank::Queen)], &p));
        assert!(can_play(&[card(Rank::Five)], &p));
        assert!(can_play(&[card(Rank::Seven)], &p));
        assert!(!can_play(&[card(Rank::Eight)], &p));
    }

    #[test]
    fn seven_cannot_go_on_higher_cards() {
        assert!(!can_play(&[card(Rank::Seven)], &pile(&[Rank::Nine])));
        assert!(can_play(&[card(Rank::Seven)], &pile(&[Rank::Six])));
        assert!(can_play(&[card(Rank::Seven)], &pile(&[Rank::Three])));
    }

    #[test]
    fn ordinary_ranks_must_match_or_beat_the_effective_top() {
        let p = pile(&[Rank::Nine, Rank::Three]);
        assert!(can_play(&[card(Rank::Nine)], &p));
        assert!(can_play(&[card(Rank::King)], &p));
        assert!(!can_play(&[card(Rank::Eight)], &p));
        // A two resets: anything goes on top of it.
        assert!(can_play(&[card(Rank::Four)], &pile(&[Rank::Ace, Rank::Two])));
    }

    #[test]
    fn ten_always_burns() {
        let check = will_burn(&[card(Rank::Ten)], &[]);
        assert_eq!(check.reason, Some(BurnReason::Ten));
        assert!(will_burn(&[card(Rank::Ten)], &pile(&[Rank::Five])).burn);
    }

    #[test]
    fn four_of_a_kind_burns_through_threes() {
        let p = pile(&[Rank::Eight, Rank::Three, Rank::Eight, Rank::Eight]);
        let check = will_burn(&[card(Rank::Eight)], &p);
        assert!(check.burn);
        assert_eq!(check.reason, Some(BurnReason::FourOfAKind));
    }

    #[test]
    fn four_played_at_once_burn() {
        let set: Vec<Card> = (0..4)
            .map(|i| Card::new(Suit::Spades, Rank::Six, format!("s{i}")))
            .collect();
        assert!(will_burn(&set, &[]).burn);
    }

    #[test]
    fn threes_only_burn_when_strictly_consecutive() {
        let p = pile(&[Rank::Three, Rank::Three, Rank::Three, Rank::Four, Rank::Three]);
        assert!(!will_burn(&[card(Rank::Three)], &p).burn);

        let p = pile(&[Rank::Four, Rank::Three, Rank::Three, Rank::Three]);
        assert!(will_burn(&[card(Rank::Three)], &p).burn);
    }

    #[test]
    fn three_eights_then_one_more_burns() {
        let p = pile(&[Rank::Eight, Rank::Eight, Rank::Eight]);
        assert!(will_burn(&[card(Rank::Eight)], &p).burn);
        assert!(!will_burn(&[card(Rank::Nine)], &p).burn);
    }

    #[test]
    fn burn_reason_strings() {
        assert_eq!(BurnReason::Ten.as_str(), "ten");
        assert_eq!(BurnReason::FourOfAKind.as_str(), "four_of_a_kind");
    }
}

/// Property-based tests for burn detection
use proptest::prelude::*;

use crate::domain::rules::BurnReason;
use crate::domain::{test_gens, test_prelude, will_burn, Card, Rank, Suit};

/// Count the top run of `rank`, looking through threes unless `rank` is three.
fn top_run(pile: &[Card], rank: Rank) -> usize {
    let mut count = 0;
    for card in pile.iter().rev() {
        if card.rank == rank {
            count += 1;
        } else if rank != Rank::Three && card.rank == Rank::Three {
            continue;
        } else {
            break;
        }
    }
    count
}

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Property: playing a ten always burns, whatever the pile.
    #[test]
    fn prop_ten_always_burns(pile in test_gens::pile(12), play in test_gens::play_of(Rank::Ten)) {
        let check = will_burn(&play, &pile);
        prop_assert!(check.burn);
        prop_assert_eq!(check.reason, Some(BurnReason::Ten));
    }

    /// Property: a burn happens exactly when the top run plus the play
    /// reaches four.
    #[test]
    fn prop_burn_matches_run_length(
        pile in test_gens::pile(12),
        rank in test_gens::rank(),
        count in 1usize..=4,
    ) {
        prop_assume!(rank != Rank::Ten);
        let play: Vec<Card> = (0..count)
            .map(|i| Card::new(Suit::Diamonds, rank, format!("x{i}")))
            .collect();
        let expected = top_run(&pile, rank) + count >= 4;
        prop_assert_eq!(will_burn(&play, &pile).burn, expected);
    }

    /// Property: interleaved threes never break an ordinary run.
    #[test]
    fn prop_threes_are_transparent_for_runs(
        rank in test_gens::ordinary_rank(),
        gaps in prop::collection::vec(0usize..=2, 3),
    ) {
        let mut pile = Vec::new();
        for (i, gap) in gaps.iter().enumerate() {
            pile.push(Card::new(Suit::Hearts, rank, format!("r{i}")));
            for j in 0..*gap {
                pile.push(Card::new(Suit::Clubs, Rank::Three, format!("g{i}-{j}")));
            }
        }
        let play = vec![Card::new(Suit::Spades, rank, "last")];
        prop_assert!(will_burn(&play, &pile).burn);
    }
}

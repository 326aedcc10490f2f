/// Property-based tests for play legality
use proptest::prelude::*;

use crate::domain::rules::{can_play_rank, effective_top_card, is_seven_active};
use crate::domain::{can_play, test_gens, test_prelude, Card, Rank};

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Property: any uniform set is legal on an empty pile.
    #[test]
    fn prop_anything_on_empty_pile(
        rank in test_gens::rank(),
        count in 1usize..=4,
    ) {
        let cards: Vec<Card> = (0..count)
            .map(|i| Card::new(crate::domain::Suit::Hearts, rank, format!("c{i}")))
            .collect();
        prop_assert!(can_play(&cards, &[]));
    }

    /// Property: 2, 3 and 10 are legal on every pile.
    #[test]
    fn prop_specials_always_legal(pile in test_gens::pile(12)) {
        for rank in [Rank::Two, Rank::Three, Rank::Ten] {
            prop_assert!(can_play_rank(rank, &pile), "{:?} rejected on {:?}", rank, pile);
        }
    }

    /// Property: without an active seven, an ordinary rank is legal iff it
    /// matches or beats the effective top.
    #[test]
    fn prop_ordinary_rank_against_effective_top(
        pile in test_gens::pile(12),
        rank in test_gens::ordinary_rank(),
    ) {
        prop_assume!(!pile.is_empty() && !is_seven_active(&pile));
        let expected = effective_top_card(&pile).is_none_or(|top| rank >= top.rank);
        prop_assert_eq!(can_play_rank(rank, &pile), expected);
    }

    /// Property: with an active seven, only ranks up to seven are legal.
    #[test]
    fn prop_active_seven_caps(
        mut pile in test_gens::pile(6),
        threes in test_gens::all_threes_pile(3),
        rank in test_gens::rank(),
    ) {
        pile.push(Card::new(crate::domain::Suit::Spades, Rank::Seven, "cap"));
        pile.extend(threes);
        prop_assert!(is_seven_active(&pile));
        prop_assert_eq!(can_play_rank(rank, &pile), rank <= Rank::Seven || rank == Rank::Ten);
    }

    /// Property: the effective top is absent iff the pile is empty or all threes.
    #[test]
    fn prop_effective_top_absent_only_for_threes(pile in test_gens::pile(10)) {
        let all_threes = pile.iter().all(|c| c.rank == Rank::Three);
        prop_assert_eq!(effective_top_card(&pile).is_none(), all_threes);
    }

    /// Property: mixing two ranks is never legal.
    #[test]
    fn prop_mixed_ranks_rejected(
        pile in test_gens::pile(6),
        a in test_gens::rank(),
        b in test_gens::rank(),
    ) {
        prop_assume!(a != b);
        let cards = vec![
            Card::new(crate::domain::Suit::Hearts, a, "a"),
            Card::new(crate::domain::Suit::Clubs, b, "b"),
        ];
        prop_assert!(!can_play(&cards, &pile));
    }
}

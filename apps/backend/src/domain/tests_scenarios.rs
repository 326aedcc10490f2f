// Worked table scenarios run through the pure rule helpers.

use crate::domain::rules::BurnReason;
use crate::domain::{can_play, effective_top_card, is_seven_active, will_burn, Card, Rank, Suit};

fn c(rank: Rank, id: &str) -> Card {
    Card::new(Suit::Hearts, rank, id)
}

#[test]
fn two_players_open_then_reset() {
    // Arrange
    let hand0 = [
        c(Rank::Four, "a4"),
        c(Rank::Five, "a5"),
        c(Rank::Six, "a6"),
        c(Rank::Seven, "a7"),
    ];
    let hand1 = [
        c(Rank::Two, "b2"),
        c(Rank::Nine, "b9"),
        c(Rank::Ten, "b10"),
        c(Rank::Jack, "b11"),
    ];
    let mut pile: Vec<Card> = Vec::new();

    // Act: player 0 plays the four
    let play0 = vec![hand0[0].clone()];
    assert!(can_play(&play0, &pile));
    assert!(!will_burn(&play0, &pile).burn);
    pile.extend(play0);

    // Assert
    assert_eq!(pile.len(), 1);
    assert_eq!(pile[0].rank, Rank::Four);

    // Act: player 1 answers with a two
    let play1 = vec![hand1[0].clone()];
    assert!(can_play(&play1, &pile));
    assert!(!will_burn(&play1, &pile).burn);
    pile.extend(play1);

    // Assert: the two resets the pile, so a four is playable again
    assert_eq!(effective_top_card(&pile).map(|c| c.rank), Some(Rank::Two));
    let four = vec![Card::new(Suit::Spades, Rank::Four, "s4")];
    assert!(can_play(&four, &pile));
    assert!(!can_play(&four, &[hand0[0].clone(), hand1[1].clone()]));
}

#[test]
fn fourth_eight_burns() {
    let pile = vec![c(Rank::Eight, "p1"), c(Rank::Eight, "p2"), c(Rank::Eight, "p3")];
    let check = will_burn(&[c(Rank::Eight, "p4")], &pile);
    assert!(check.burn);
    assert_eq!(check.reason, Some(BurnReason::FourOfAKind));
    assert_eq!(check.reason.map(BurnReason::as_str), Some("four_of_a_kind"));
}

#[test]
fn seven_blocks_queen_but_not_five() {
    let pile = vec![c(Rank::Seven, "p7")];
    assert!(is_seven_active(&pile));
    assert!(!can_play(&[c(Rank::Queen, "q")], &pile));
    assert!(can_play(&[c(Rank::Five, "f")], &pile));
}

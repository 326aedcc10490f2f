/// Property-based tests for seat order
use proptest::prelude::*;

use crate::domain::seats::{count_active, is_game_over, loser_seat};
use crate::domain::{next_active_seat, test_gens, test_prelude, Direction, Player};

fn table(out: &[bool]) -> Vec<Player> {
    out.iter()
        .enumerate()
        .map(|(i, &is_out)| {
            let mut p = Player::new(format!("player-{i}"), format!("P{i}"), false);
            p.is_out = is_out;
            p
        })
        .collect()
}

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Property: with two or more active seats, the next seat is active and
    /// differs from the current one.
    #[test]
    fn prop_next_seat_is_active(
        out in test_gens::out_flags(),
        current_pick in any::<prop::sample::Index>(),
        clockwise in any::<bool>(),
        skip in 1usize..=3,
    ) {
        let players = table(&out);
        prop_assume!(count_active(&players) >= 2);
        let current = current_pick.index(players.len());
        let direction = if clockwise { Direction::Clockwise } else { Direction::CounterClockwise };

        let next = next_active_seat(current, &players, skip, direction);
        prop_assert!(!players[next].is_out);
        if skip == 1 {
            prop_assert_ne!(next, current);
        }
    }

    /// Property: a single active seat ends the game and is the loser.
    #[test]
    fn prop_single_active_is_loser(
        len in 2usize..=8,
        survivor_pick in any::<prop::sample::Index>(),
    ) {
        let survivor = survivor_pick.index(len);
        let out: Vec<bool> = (0..len).map(|i| i != survivor).collect();
        let players = table(&out);
        prop_assert!(is_game_over(&players));
        prop_assert_eq!(loser_seat(&players), Some(survivor));
        prop_assert_eq!(next_active_seat(survivor, &players, 1, Direction::Clockwise), survivor);
    }
}

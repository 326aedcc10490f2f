//! Seat order over players that may have gone out.

use crate::domain::player::PlayerZones;

/// Direction play travels around the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Clockwise,
    CounterClockwise,
}

impl Direction {
    pub fn reversed(self) -> Self {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
        }
    }
}

fn step(seat: usize, len: usize, direction: Direction) -> usize {
    match direction {
        Direction::Clockwise => (seat + 1) % len,
        Direction::CounterClockwise => (seat + len - 1) % len,
    }
}

/// The seat `skip` active players after `current`.
///
/// Out seats are passed over without counting. If the walk returns to
/// `current` before any active seat has been counted, `current` is returned.
pub fn next_active_seat<P: PlayerZones>(
    current: usize,
    players: &[P],
    skip: usize,
    direction: Direction,
) -> usize {
    let len = players.len();
    if len == 0 {
        return current;
    }
    let start = current % len;
    let mut next = start;
    let mut skipped = 0;

    while skipped < skip.max(1) {
        next = step(next, len, direction);
        if !players[next].is_out() {
            skipped += 1;
        } else if next == start && skipped == 0 {
            break;
        }
    }
    next
}

pub fn count_active<P: PlayerZones>(players: &[P]) -> usize {
    players.iter().filter(|p| !p.is_out()).count()
}

/// The game ends once at most one player still holds cards.
pub fn is_game_over<P: PlayerZones>(players: &[P]) -> bool {
    count_active(players) <= 1
}

/// The losing seat: the only player left holding cards.
pub fn loser_seat<P: PlayerZones>(players: &[P]) -> Option<usize> {
    let mut active = players.iter().enumerate().filter(|(_, p)| !p.is_out());
    match (active.next(), active.next()) {
        (Some((seat, _)), None) => Some(seat),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::player::Player;

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

    #[test]
    fn advances_one_seat_when_all_active() {
        let players = table(&[false, false, false]);
        assert_eq!(next_active_seat(0, &players, 1, Direction::Clockwise), 1);
        assert_eq!(next_active_seat(2, &players, 1, Direction::Clockwise), 0);
    }

    #[test]
    fn skips_out_players() {
        let players = table(&[false, true, true, false]);
        assert_eq!(next_active_seat(0, &players, 1, Direction::Clockwise), 3);
        assert_eq!(next_active_seat(3, &players, 1, Direction::Clockwise), 0);
    }

    #[test]
    fn counter_clockwise_walks_backwards() {
        let players = table(&[false, false, true, false]);
        assert_eq!(
            next_active_seat(0, &players, 1, Direction::CounterClockwise),
            3
        );
        assert_eq!(
            next_active_seat(3, &players, 1, Direction::CounterClockwise),
            1
        );
    }

    #[test]
    fn skip_counts_only_active_seats() {
        let players = table(&[false, false, true, false]);
        assert_eq!(next_active_seat(0, &players, 2, Direction::Clockwise), 3);
    }

    #[test]
    fn single_active_player_returns_to_itself() {
        let players = table(&[true, false, true]);
        assert_eq!(next_active_seat(1, &players, 1, Direction::Clockwise), 1);
        assert!(is_game_over(&players));
        assert_eq!(loser_seat(&players), Some(1));
    }

    #[test]
    fn no_active_players_terminates() {
        let players = table(&[true, true]);
        assert_eq!(next_active_seat(0, &players, 1, Direction::Clockwise), 0);
        assert_eq!(loser_seat(&players), None);
    }

    #[test]
    fn direction_reverses() {
        assert_eq!(Direction::Clockwise.reversed(), Direction::CounterClockwise);
        assert_eq!(Direction::CounterClockwise.reversed(), Direction::Clockwise);
    }
}

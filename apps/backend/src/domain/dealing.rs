//! Deck construction, shuffling and the opening deal.

use std::collections::BTreeMap;

use rand::Rng;

use crate::domain::player::{Player, HAND_SIZE};
use crate::domain::{Card, Rank, Suit};
use crate::errors::domain::{DomainError, ValidationKind};

/// Cards placed in each of the face-down and face-up zones.
pub const TABLE_ZONE_SIZE: usize = 4;
/// Cards dealt per player across all three zones.
pub const CARDS_PER_PLAYER: usize = TABLE_ZONE_SIZE * 2 + HAND_SIZE;
pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 8;

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_SUFFIX_LEN: usize = 9;

/// Build one 52-card deck. Ids take the form `{suit}-{rank}-{deck}-{suffix}`.
pub fn create_deck<R: Rng + ?Sized>(deck_number: usize, rng: &mut R) -> Vec<Card> {
    let mut deck = Vec::with_capacity(52);
    for suit in Suit::ALL {
        for rank in Rank::ALL {
            let suffix: String = (0..ID_SUFFIX_LEN)
                .map(|_| ID_ALPHABET[rng.random_range(0..ID_ALPHABET.len())] as char)
                .collect();
            let id = format!("{}-{}-{}-{}", suit.name(), rank.value(), deck_number, suffix);
            deck.push(Card { suit, rank, id });
        }
    }
    deck
}

/// Concatenate `count` decks numbered `0..count`.
pub fn create_multi_deck<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<Card> {
    (0..count).flat_map(|n| create_deck(n, rng)).collect()
}

/// One deck covers up to four players; larger tables need two.
pub fn required_decks(player_count: usize) -> usize {
    if player_count <= 4 {
        1
    } else {
        2
    }
}

/// Fisher-Yates shuffle, uniform over all permutations.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}

/// Result of the opening deal.
#[derive(Debug, Clone)]
pub struct Deal {
    pub deck: Vec<Card>,
    pub players: Vec<Player>,
}

/// Deal four face-down, then four face-up, then four hand cards to every
/// player, round-robin, drawing from the end of `deck`.
///
/// The first `human_count` players are human; the rest are AI. Missing
/// names default to `Player {n}`.
pub fn deal(
    mut deck: Vec<Card>,
    player_count: usize,
    names: &[String],
    human_count: usize,
) -> Result<Deal, DomainError> {
    if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&player_count) {
        return Err(DomainError::validation(
            ValidationKind::InvalidPlayerCount,
            format!("Player count must be {MIN_PLAYERS}..={MAX_PLAYERS}, got {player_count}"),
        ));
    }
    if deck.len() < player_count * CARDS_PER_PLAYER {
        return Err(DomainError::validation(
            ValidationKind::InvalidPlayerCount,
            format!(
                "Deck of {} cards cannot seat {player_count} players",
                deck.len()
            ),
        ));
    }

    let mut players: Vec<Player> = (0..player_count)
        .map(|i| {
            let name = names
                .get(i)
                .cloned()
                .unwrap_or_else(|| format!("Player {}", i + 1));
            Player::new(format!("player-{i}"), name, i >= human_count)
        })
        .collect();

    for zone in 0..3 {
        for _ in 0..TABLE_ZONE_SIZE {
            for player in players.iter_mut() {
                // Length was checked above.
                let Some(card) = deck.pop() else {
                    break;
                };
                match zone {
                    0 => player.face_down.push(card),
                    1 => player.face_up.push(card),
                    _ => player.hand.push(card),
                }
            }
        }
    }

    Ok(Deal { deck, players })
}

/// Group cards by rank, ascending.
pub fn group_by_rank(cards: &[Card]) -> BTreeMap<Rank, Vec<Card>> {
    let mut groups: BTreeMap<Rank, Vec<Card>> = BTreeMap::new();
    for card in cards {
        groups.entry(card.rank).or_default().push(card.clone());
    }
    groups
}

//! Random AI player - makes random legal moves.
//!
//! [`RandomPlayer`] is the easy tier and the reference implementation of the
//! [`AiPlayer`](super::AiPlayer) trait: a seedable RNG behind a `Mutex`,
//! errors instead of panics, and moves drawn only from the enumerated legal
//! sets.

use std::sync::Mutex;

use rand::prelude::*;

use super::strategy::forced_move;
use super::trait_def::{AiError, AiMove, AiPlayer};
use crate::domain::player_view::PlayerView;

/// AI that makes random legal moves.
///
/// # Usage
///
/// ```rust,ignore
/// // Non-deterministic (uses system entropy)
/// let random_ai = RandomPlayer::new(None);
///
/// // Deterministic (uses seed for reproducible behavior)
/// let seeded_ai = RandomPlayer::new(Some(12345));
/// ```
pub struct RandomPlayer {
    /// Wrapped in `Mutex` because `AiPlayer` methods take `&self`.
    rng: Mutex<StdRng>,
}

impl RandomPlayer {
    pub const NAME: &'static str = "RandomPlayer";
    pub const VERSION: &'static str = "1.0.0";

    pub const fn name() -> &'static str {
        Self::NAME
    }

    pub const fn version() -> &'static str {
        Self::VERSION
    }

    /// Create a new `RandomPlayer`.
    ///
    /// * `seed` - `Some(seed)` for reproducible choices, `None` for OS entropy
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_os_rng(),
        };
        Self {
            rng: Mutex::new(rng),
        }
    }
}

impl AiPlayer for RandomPlayer {
    fn choose_move(&self, view: &PlayerView) -> Result<AiMove, AiError> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|e| AiError::Internal(format!("RNG lock poisoned: {e}")))?;

        if let Some(forced) = forced_move(view, &mut *rng) {
            return Ok(forced);
        }

        let moves = view.valid_moves();
        let choice = moves
            .choose(&mut *rng)
            .cloned()
            .ok_or_else(|| AiError::Internal("Failed to choose random move".into()))?;

        Ok(AiMove::Play(choice))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Card, Rank, Suit};

    fn view(hand: Vec<Card>, pile: Vec<Card>) -> PlayerView {
        PlayerView {
            seat: 0,
            hand,
            face_up: Vec::new(),
            face_down_count: 0,
            pile,
            deck_count: 0,
            opponents: Vec::new(),
        }
    }

    #[test]
    fn only_picks_legal_moves() {
        let ai = RandomPlayer::new(Some(42));
        let hand = vec![
            Card::new(Suit::Hearts, Rank::Four, "h4"),
            Card::new(Suit::Hearts, Rank::King, "hk"),
        ];
        let pile = vec![Card::new(Suit::Clubs, Rank::Nine, "c9")];
        for _ in 0..20 {
            match ai.choose_move(&view(hand.clone(), pile.clone())).unwrap() {
                AiMove::Play(cards) => assert_eq!(cards[0].rank, Rank::King),
                other => panic!("unexpected move {other:?}"),
            }
        }
    }

    #[test]
    fn same_seed_same_choices() {
        let hand: Vec<Card> = [Rank::Four, Rank::Six, Rank::Eight, Rank::Jack]
            .iter()
            .enumerate()
            .map(|(i, &r)| Card::new(Suit::Spades, r, format!("s{i}")))
            .collect();
        let a = RandomPlayer::new(Some(7));
        let b = RandomPlayer::new(Some(7));
        for _ in 0..10 {
            let v = view(hand.clone(), Vec::new());
            assert_eq!(a.choose_move(&v).unwrap(), b.choose_move(&v).unwrap());
        }
    }
}

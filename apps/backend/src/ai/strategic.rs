//! Strategic - the hard tier.
//!
//! Play priorities, first match wins:
//! 1. A four-of-a-kind burn.
//! 2. A ten once the pile holds five or more cards.
//! 3. A seven when at least two other low or special cards are held to
//!    follow it.
//! 4. The longest multi-card set, keeping twos back.
//! 5. The lowest ordinary rank.
//! 6. Anything left, twos included.
//!
//! Swaps put the strongest table cards face-up before play starts.

use std::sync::Mutex;

use rand::prelude::*;

use super::strategy::{
    best_multi_card, burn_opportunity, card_weight, forced_move, is_special, lowest_longest,
};
use super::trait_def::{AiError, AiMove, AiPlayer, SwapChoice};
use crate::domain::player_view::PlayerView;
use crate::domain::rules::{BURN, CAP, RESET};
use crate::domain::{Card, Rank};

/// Pile size at which spending a ten is worth it.
const TEN_PILE_THRESHOLD: usize = 5;

pub struct Strategic {
    rng: Mutex<StdRng>,
}

impl Strategic {
    pub const NAME: &'static str = "Strategic";
    pub const VERSION: &'static str = "1.0.0";

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

fn first_of_rank(moves: &[Vec<Card>], rank: Rank) -> Option<Vec<Card>> {
    moves.iter().find(|m| m[0].rank == rank).cloned()
}

/// Sevens cap the next player; play one only with low cards to follow up.
fn seven_play(moves: &[Vec<Card>], hand: &[Card]) -> Option<Vec<Card>> {
    let seven = first_of_rank(moves, CAP)?;
    let low_cards = hand
        .iter()
        .filter(|c| c.rank.value() <= CAP.value() || is_special(c.rank))
        .count();
    (low_cards >= 2).then_some(seven)
}

impl AiPlayer for Strategic {
    fn choose_move(&self, view: &PlayerView) -> Result<AiMove, AiError> {
        {
            let mut rng = self
                .rng
                .lock()
                .map_err(|e| AiError::Internal(format!("RNG lock poisoned: {e}")))?;
            if let Some(forced) = forced_move(view, &mut *rng) {
                return Ok(forced);
            }
        }

        let moves = view.valid_moves();

        if let Some(burn) = burn_opportunity(&moves, &view.pile) {
            return Ok(AiMove::Play(burn));
        }

        if view.pile.len() >= TEN_PILE_THRESHOLD {
            if let Some(ten) = first_of_rank(&moves, BURN) {
                return Ok(AiMove::Play(ten));
            }
        }

        if let Some(seven) = seven_play(&moves, &view.hand) {
            return Ok(AiMove::Play(seven));
        }

        let non_two: Vec<Vec<Card>> = moves.iter().filter(|m| m[0].rank != RESET).cloned().collect();
        let considered = if non_two.is_empty() { moves } else { non_two };

        if let Some(multi) = best_multi_card(&considered) {
            return Ok(AiMove::Play(multi));
        }

        let normal: Vec<Vec<Card>> = considered
            .iter()
            .filter(|m| !is_special(m[0].rank))
            .cloned()
            .collect();
        if let Some(low) = lowest_longest(&normal) {
            return Ok(AiMove::Play(low));
        }

        considered
            .into_iter()
            .next()
            .map(AiMove::Play)
            .ok_or_else(|| AiError::Internal("no candidate after filtering".into()))
    }

    fn choose_swaps(&self, view: &PlayerView) -> Result<Vec<SwapChoice>, AiError> {
        let mut hand: Vec<&Card> = view.hand.iter().collect();
        let mut face_up: Vec<&Card> = view.face_up.iter().collect();
        hand.sort_by_key(|c| std::cmp::Reverse(card_weight(c.rank)));
        face_up.sort_by_key(|c| card_weight(c.rank));

        Ok(hand
            .into_iter()
            .zip(face_up)
            .take_while(|(h, f)| card_weight(h.rank) > card_weight(f.rank))
            .map(|(h, f)| (h.id.clone(), f.id.clone()))
            .collect())
    }
}

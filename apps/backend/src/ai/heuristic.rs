//! Heuristic - the medium tier.
//!
//! Play strategy:
//! - Complete a four-of-a-kind burn whenever a candidate can.
//! - Otherwise hold specials back and shed the lowest ordinary rank, all
//!   copies at once.
//! - Specials only go down when nothing ordinary is playable.
//!
//! The RNG is only consulted for blind flips.

use std::sync::Mutex;

use rand::prelude::*;

use super::strategy::{burn_opportunity, forced_move, lowest_longest, prefer_normal};
use super::trait_def::{AiError, AiMove, AiPlayer};
use crate::domain::player_view::PlayerView;

pub struct Heuristic {
    rng: Mutex<StdRng>,
}

impl Heuristic {
    pub const NAME: &'static str = "Heuristic";
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

impl AiPlayer for Heuristic {
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

        lowest_longest(&prefer_normal(&moves))
            .map(AiMove::Play)
            .ok_or_else(|| AiError::Internal("no candidate after filtering".into()))
    }
}

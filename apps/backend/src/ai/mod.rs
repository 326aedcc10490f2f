//! AI player module - handles automated game decisions.
//!
//! This module provides:
//! - AI trait for different AI implementations
//! - Three difficulty tiers: RandomPlayer (easy), Heuristic (medium) and
//!   Strategic (hard), all seedable for tests
//! - A static registry and construction helpers

mod config;
mod heuristic;
mod random;
pub mod registry;
mod strategic;
pub mod strategy;
mod trait_def;

use std::time::Duration;

pub use config::AiConfig;
pub use heuristic::Heuristic;
pub use random::RandomPlayer;
use rand::Rng;
use serde::{Deserialize, Serialize};
pub use strategic::Strategic;
pub use trait_def::{AiError, AiMove, AiPlayer, SwapChoice};

/// AI strength tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Registered AI implementing this tier.
    pub const fn ai_name(self) -> &'static str {
        match self {
            Difficulty::Easy => RandomPlayer::NAME,
            Difficulty::Medium => Heuristic::NAME,
            Difficulty::Hard => Strategic::NAME,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// Base and jitter of the pause before an AI acts, in milliseconds.
    const fn delay_window_ms(self) -> (u64, u64) {
        match self {
            Difficulty::Easy => (500, 500),
            Difficulty::Medium => (800, 700),
            Difficulty::Hard => (1200, 800),
        }
    }
}

impl std::str::FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty '{other}'")),
        }
    }
}

/// Simulated thinking time before an AI seat acts. Harder tiers take longer.
pub fn thinking_delay<R: Rng + ?Sized>(difficulty: Difficulty, rng: &mut R) -> Duration {
    let (base, jitter) = difficulty.delay_window_ms();
    Duration::from_millis(base + rng.random_range(0..jitter))
}

/// Create the registered AI for the configured tier, seeded from the config.
///
/// Returns `None` if no factory is registered for the tier.
pub fn create_ai(config: &AiConfig) -> Option<Box<dyn AiPlayer>> {
    let factory = registry::by_difficulty(config.difficulty())?;
    let ai: Box<dyn AiPlayer> = (factory.make)(config.seed());
    Some(ai)
}

//! Shared types for the simulator.

use clap::ValueEnum;
use shithead_backend::ai::Difficulty;

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Jsonl,
    Json,
}

/// AI tier selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AiTier {
    Easy,
    Medium,
    Hard,
}

impl From<AiTier> for Difficulty {
    fn from(tier: AiTier) -> Self {
        match tier {
            AiTier::Easy => Difficulty::Easy,
            AiTier::Medium => Difficulty::Medium,
            AiTier::Hard => Difficulty::Hard,
        }
    }
}

//! In-memory AI-vs-AI match runner.
//!
//! Every seat is an AI, so a match is the local coordinator driven to the
//! end with no waits, delays or persistence.

use std::fmt;

use shithead_backend::ai::Difficulty;
use shithead_backend::domain::events::GameEvent;
use shithead_backend::errors::DomainError;
use shithead_backend::services::local_match::{LocalMatch, MatchPhase, MatchRules, MatchSetup};

/// Turn budget before a match is declared stuck.
const MAX_STEPS: usize = 50_000;

#[derive(Debug)]
pub enum SimulatorError {
    Domain(DomainError),
    /// The match did not end within the turn budget.
    Stalled { steps: usize },
    /// Cards went missing or were duplicated.
    CardsLost { dealt: usize, found: usize },
}

impl fmt::Display for SimulatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulatorError::Domain(e) => write!(f, "domain error: {e}"),
            SimulatorError::Stalled { steps } => write!(f, "match still running after {steps} turns"),
            SimulatorError::CardsLost { dealt, found } => {
                write!(f, "card count drifted: dealt {dealt}, found {found}")
            }
        }
    }
}

impl std::error::Error for SimulatorError {}

impl From<DomainError> for SimulatorError {
    fn from(e: DomainError) -> Self {
        SimulatorError::Domain(e)
    }
}

/// Tallies taken from a match's event history.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventCounts {
    pub turns: u32,
    pub plays: u32,
    pub burns: u32,
    pub pickups: u32,
    pub blind_reveals: u32,
}

impl EventCounts {
    pub fn from_history(history: &[GameEvent]) -> Self {
        let mut counts = Self::default();
        for event in history {
            match event {
                GameEvent::TurnStarted { .. } => counts.turns += 1,
                GameEvent::CardsPlayed { .. } => counts.plays += 1,
                GameEvent::Burned { .. } => counts.burns += 1,
                GameEvent::PilePickedUp { .. } => counts.pickups += 1,
                GameEvent::BlindRevealed { .. } => counts.blind_reveals += 1,
                _ => {}
            }
        }
        counts
    }
}

/// Result of simulating a complete match.
#[derive(Debug, Clone)]
pub struct GameResult {
    /// The seat left holding cards, if any.
    pub loser: Option<usize>,
    /// Seats in the order they went out.
    pub finish_order: Vec<usize>,
    pub counts: EventCounts,
}

pub struct Simulator {
    seed: u64,
    tiers: Vec<Difficulty>,
    rules: MatchRules,
}

impl Simulator {
    pub fn new(seed: u64, tiers: Vec<Difficulty>, rules: MatchRules) -> Self {
        Self { seed, tiers, rules }
    }

    /// Play one match to the end.
    pub fn simulate_game(&self) -> Result<GameResult, SimulatorError> {
        let mut game = LocalMatch::new(MatchSetup {
            player_count: self.tiers.len(),
            human_count: 0,
            seat_difficulties: self.tiers.iter().copied().map(Some).collect(),
            seed: Some(self.seed),
            rules: self.rules,
            ..MatchSetup::default()
        })?;
        let dealt = game.dealt_cards();

        game.start_play()?;
        game.run_ai_turns(MAX_STEPS)?;
        if game.phase() != MatchPhase::Ended {
            return Err(SimulatorError::Stalled { steps: MAX_STEPS });
        }

        let found = game.total_cards();
        if found != dealt {
            return Err(SimulatorError::CardsLost { dealt, found });
        }

        let finish_order = game
            .history()
            .iter()
            .filter_map(|event| match event {
                GameEvent::PlayerOut { seat } => Some(*seat),
                _ => None,
            })
            .collect();

        Ok(GameResult {
            loser: game.loser(),
            finish_order,
            counts: EventCounts::from_history(game.history()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_matches_finish_and_repeat() {
        let tiers = vec![Difficulty::Hard, Difficulty::Easy, Difficulty::Medium];
        let first = Simulator::new(11, tiers.clone(), MatchRules::default())
            .simulate_game()
            .unwrap();
        let second = Simulator::new(11, tiers, MatchRules::default())
            .simulate_game()
            .unwrap();

        assert!(first.loser.is_some());
        assert_eq!(first.finish_order.len(), 2);
        assert_eq!(first.loser, second.loser);
        assert_eq!(first.counts, second.counts);
    }

    #[test]
    fn counts_tally_history() {
        let history = [
            GameEvent::TurnStarted { seat: 0 },
            GameEvent::PilePickedUp { seat: 0, count: 3 },
            GameEvent::TurnStarted { seat: 1 },
        ];
        let counts = EventCounts::from_history(&history);
        assert_eq!(counts.turns, 2);
        assert_eq!(counts.pickups, 1);
        assert_eq!(counts.plays, 0);
    }
}

//! Metrics collection and output for AI simulation results.

use serde::Serialize;

use crate::simulator::GameResult;

/// Complete match metrics for output.
#[derive(Debug, Clone, Serialize)]
pub struct GameMetrics {
    pub game_id: u32,
    pub seed: u64,
    pub timestamp: String,
    pub config: MatchConfig,
    pub result: GameResultMetrics,
    pub player_metrics: Vec<PlayerMetrics>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchConfig {
    pub ai_types: Vec<String>,
    pub total_games: u32,
    pub reverse_on_jack: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct GameResultMetrics {
    pub loser: Option<usize>,
    pub finish_order: Vec<usize>,
    pub turns: u32,
    pub burns: u32,
    pub pickups: u32,
    pub blind_reveals: u32,
    pub duration_ms: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerMetrics {
    pub seat: usize,
    pub ai_type: String,
    /// 1 for the first seat out; `None` for the loser.
    pub finish_position: Option<usize>,
    pub lost: bool,
}

/// Flat per-match row for the CSV summary.
#[derive(Debug, Clone, Serialize)]
pub struct CsvSummaryRow {
    pub game_id: u32,
    pub seed: u64,
    pub players: usize,
    pub loser: String,
    pub loser_ai: String,
    pub turns: u32,
    pub burns: u32,
    pub pickups: u32,
    pub ai_types: String,
}

impl From<&GameMetrics> for CsvSummaryRow {
    fn from(m: &GameMetrics) -> Self {
        let loser_ai = m
            .result
            .loser
            .and_then(|seat| m.config.ai_types.get(seat))
            .cloned()
            .unwrap_or_default();
        Self {
            game_id: m.game_id,
            seed: m.seed,
            players: m.config.ai_types.len(),
            loser: m.result.loser.map(|s| s.to_string()).unwrap_or_default(),
            loser_ai,
            turns: m.result.turns,
            burns: m.result.burns,
            pickups: m.result.pickups,
            ai_types: m.config.ai_types.join("|"),
        }
    }
}

/// Build metrics from a finished match.
pub fn build_game_metrics(
    game_id: u32,
    seed: u64,
    ai_types: Vec<String>,
    total_games: u32,
    reverse_on_jack: bool,
    result: &GameResult,
    duration_ms: f64,
) -> GameMetrics {
    let timestamp = time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| String::from("unknown"));

    let player_metrics = ai_types
        .iter()
        .enumerate()
        .map(|(seat, ai_type)| PlayerMetrics {
            seat,
            ai_type: ai_type.clone(),
            finish_position: result
                .finish_order
                .iter()
                .position(|&s| s == seat)
                .map(|pos| pos + 1),
            lost: result.loser == Some(seat),
        })
        .collect();

    GameMetrics {
        game_id,
        seed,
        timestamp,
        config: MatchConfig {
            ai_types,
            total_games,
            reverse_on_jack,
        },
        result: GameResultMetrics {
            loser: result.loser,
            finish_order: result.finish_order.clone(),
            turns: result.counts.turns,
            burns: result.counts.burns,
            pickups: result.counts.pickups,
            blind_reveals: result.counts.blind_reveals,
            duration_ms,
        },
        player_metrics,
    }
}

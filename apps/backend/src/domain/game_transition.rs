// apps/backend/src/domain/game_transition.rs

use std::collections::BTreeSet;

use crate::entities::games::{Game, GameStatus};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameLifecycleView {
    pub status: GameStatus,
    pub turn: Option<String>,
    pub out_players: BTreeSet<String>,
    pub burn_pile_len: usize,
    pub loser_id: Option<String>,
}

impl GameLifecycleView {
    pub fn of(game: &Game) -> Self {
        let turn = match game.status {
            GameStatus::Playing => Some(game.turn_state.player_id.clone()),
            _ => None,
        };
        Self {
            status: game.status,
            turn,
            out_players: game
                .players
                .iter()
                .filter(|(_, p)| p.is_out)
                .map(|(id, _)| id.clone())
                .collect(),
            burn_pile_len: game.burn_pile.len(),
            loser_id: game.loser_id.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameTransition {
    /// Edge-triggered: the turn became a specific player.
    TurnBecame { player_id: String },

    /// Edge-triggered: swapping -> playing
    GameStarted,

    /// Edge-triggered: game moved to ended
    GameEnded { loser_id: Option<String> },

    /// Edge-triggered: a player emptied every zone or was removed
    PlayerOut { player_id: String },

    /// Edge-triggered: cards moved onto the burn pile
    PileBurned { cards: usize },

    /// Explicit: a player took the discard pile into their hand
    PilePickedUp { player_id: String, cards: usize },

    /// Explicit: a disconnected player was removed from play
    PlayerRemoved { player_id: String },
}

/// Derive domain transitions from before/after lifecycle state.
pub fn derive_game_transitions(
    before: &GameLifecycleView,
    after: &GameLifecycleView,
) -> Vec<GameTransition> {
    let mut transitions = Vec::new();

    // 1. Game start
    if before.status == GameStatus::Swapping && after.status == GameStatus::Playing {
        transitions.push(GameTransition::GameStarted);
    }

    // 2. Burn pile growth
    if after.burn_pile_len > before.burn_pile_len {
        transitions.push(GameTransition::PileBurned {
            cards: after.burn_pile_len - before.burn_pile_len,
        });
    }

    // 3. Newly out players
    for player_id in after.out_players.difference(&before.out_players) {
        transitions.push(GameTransition::PlayerOut {
            player_id: player_id.clone(),
        });
    }

    // 4. Turn change
    if let Some(player_id) = &after.turn {
        if before.turn.as_ref() != Some(player_id) {
            transitions.push(GameTransition::TurnBecame {
                player_id: player_id.clone(),
            });
        }
    }

    // 5. Game end
    if before.status != GameStatus::Ended && after.status == GameStatus::Ended {
        transitions.push(GameTransition::GameEnded {
            loser_id: after.loser_id.clone(),
        });
    }

    transitions
}

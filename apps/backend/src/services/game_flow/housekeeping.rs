//! Deadlines, connection tracking and the disconnect sweep.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::turns::{end_game, ensure_player, ensure_status, next_seat, set_turn};
use super::{GameFlowMutationResult, GameFlowService};
use crate::domain::game_transition::GameTransition;
use crate::domain::seats::count_active;
use crate::domain::PlayerZones;
use crate::entities::games::{ConnectionStatus, GameStatus};
use crate::error::AppError;
use crate::errors::domain::{DomainError, ValidationKind};
use crate::services::players::PlayerService;
use crate::store::DocumentStore;

/// Result of a handled turn timeout.
#[derive(Debug, Clone)]
pub struct TimeoutOutcome {
    pub result: GameFlowMutationResult,
    /// A ban was written because the player reached the timeout threshold.
    pub banned: bool,
}

/// What the disconnect sweep did. Empty when nothing was removed or the
/// sweep failed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisconnectSweep {
    pub removed: Vec<String>,
    pub game_ended: bool,
    /// The only seat left in play when the sweep ended the game.
    pub winner: Option<String>,
}

/// One housekeeping pass over a game.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HousekeepingReport {
    pub swap_expired: bool,
    pub timed_out: Option<String>,
    pub sweep: DisconnectSweep,
}

impl<S: DocumentStore + ?Sized> GameFlowService<S> {
    /// Resolve an expired turn: the timed-out player takes the pile and the
    /// turn passes. Reaching the timeout threshold earns a ban.
    pub async fn handle_turn_timeout(
        &self,
        game_id: &str,
        player_id: &str,
    ) -> Result<TimeoutOutcome, AppError> {
        let turn_ms = self.config.turn_timeout_ms();
        let result = self
            .run_mutation(game_id, |game, now| {
                ensure_status(game, GameStatus::Playing)?;
                ensure_player(game, player_id)?;
                if game.current_player_id() != Some(player_id) {
                    return Err(DomainError::validation(
                        ValidationKind::OutOfTurn,
                        "Only the current player can time out",
                    )
                    .into());
                }
                if now < game.turn_state.expires_at {
                    return Err(DomainError::validation(
                        ValidationKind::TurnNotExpired,
                        format!("Turn expires at {}", game.turn_state.expires_at),
                    )
                    .into());
                }

                let seat = game.current_player_index;
                let mut transitions = Vec::new();
                if let Some(player) = game.players.get_mut(player_id) {
                    player.timeouts_this_game += 1;
                    if !game.discard_pile.is_empty() {
                        transitions.push(GameTransition::PilePickedUp {
                            player_id: player_id.to_string(),
                            cards: game.discard_pile.len(),
                        });
                        player.hand.append(&mut game.discard_pile);
                    }
                }
                let next = next_seat(game, seat);
                set_turn(game, next, now, turn_ms);
                Ok(transitions)
            })
            .await?;

        let timeouts = result
            .final_game
            .player(player_id)
            .map_or(0, |p| p.timeouts_this_game);
        info!(game_id, player_id, timeouts, "Turn timed out");

        let mut banned = false;
        if timeouts >= self.config.timeout_ban_threshold {
            let players = PlayerService::new(Arc::clone(&self.store), Arc::clone(&self.clock));
            match players
                .create_ban(player_id, "timeout", Some(game_id), self.config.ban_duration)
                .await
            {
                Ok(_) => {
                    banned = true;
                    warn!(game_id, player_id, timeouts, "Player banned for repeated timeouts");
                }
                Err(e) => warn!(game_id, player_id, error = %e, "Failed to write timeout ban"),
            }
        }

        Ok(TimeoutOutcome { result, banned })
    }

    pub async fn update_connection_status(
        &self,
        game_id: &str,
        player_id: &str,
        status: ConnectionStatus,
    ) -> Result<GameFlowMutationResult, AppError> {
        debug!(game_id, player_id, ?status, "Connection status update");
        self.run_mutation(game_id, |game, now| {
            ensure_player(game, player_id)?;
            if let Some(player) = game.player_mut(player_id) {
                player.connection_status = status;
                player.last_ping_at = now;
            }
            Ok(Vec::new())
        })
        .await
    }

    /// Refresh the player's liveness timestamp.
    pub async fn heartbeat(
        &self,
        game_id: &str,
        player_id: &str,
    ) -> Result<GameFlowMutationResult, AppError> {
        self.run_mutation(game_id, |game, now| {
            ensure_player(game, player_id)?;
            if let Some(player) = game.player_mut(player_id) {
                player.last_ping_at = now;
            }
            Ok(Vec::new())
        })
        .await
    }

    /// Take players who stayed disconnected past the grace period out of
    /// play. Their cards are burned. Never fails: errors are logged and an
    /// empty sweep is returned.
    pub async fn remove_disconnected_players(&self, game_id: &str) -> DisconnectSweep {
        let grace_ms = self.config.disconnect_grace_ms();
        let turn_ms = self.config.turn_timeout_ms();
        let mut sweep = DisconnectSweep::default();

        let outcome = self
            .run_mutation(game_id, |game, now| {
                sweep = DisconnectSweep::default();
                if game.status != GameStatus::Playing {
                    return Ok(Vec::new());
                }

                let stale: Vec<String> = game
                    .player_order
                    .iter()
                    .filter(|id| {
                        game.players.get(*id).is_some_and(|p| {
                            p.connection_status == ConnectionStatus::Disconnected
                                && !p.is_out
                                && now - p.last_ping_at >= grace_ms
                        })
                    })
                    .cloned()
                    .collect();
                if stale.is_empty() {
                    return Ok(Vec::new());
                }

                let current_removed = game
                    .current_player_id()
                    .is_some_and(|id| stale.iter().any(|s| s == id));
                let mut transitions = Vec::new();
                for id in &stale {
                    if let Some(player) = game.players.get_mut(id) {
                        game.burn_pile.append(&mut player.hand);
                        game.burn_pile.append(&mut player.face_up);
                        game.burn_pile.append(&mut player.face_down);
                        player.is_out = true;
                    }
                    transitions.push(GameTransition::PlayerRemoved {
                        player_id: id.clone(),
                    });
                }
                sweep.removed = stale;

                let seats = game.seats();
                if count_active(&seats) <= 1 {
                    sweep.winner = game
                        .player_order
                        .iter()
                        .find(|id| game.players.get(*id).is_some_and(|p| !p.is_out()))
                        .cloned();
                    sweep.game_ended = true;
                    end_game(game, None);
                } else if current_removed {
                    let next = next_seat(game, game.current_player_index);
                    set_turn(game, next, now, turn_ms);
                }
                Ok(transitions)
            })
            .await;

        match outcome {
            Ok(_) => {
                if !sweep.removed.is_empty() {
                    info!(
                        game_id,
                        removed = ?sweep.removed,
                        game_ended = sweep.game_ended,
                        "Removed disconnected players"
                    );
                }
                sweep
            }
            Err(e) => {
                warn!(game_id, error = %e, "Disconnect sweep failed");
                DisconnectSweep::default()
            }
        }
    }

    /// One best-effort pass: expire the swap phase, time out the current
    /// turn, then sweep disconnected players.
    pub async fn run_housekeeping(&self, game_id: &str) -> HousekeepingReport {
        let mut report = HousekeepingReport::default();
        let game = match self.get_game(game_id).await {
            Ok(Some(game)) => game,
            Ok(None) => return report,
            Err(e) => {
                warn!(game_id, error = %e, "Housekeeping could not load game");
                return report;
            }
        };
        let now = self.clock.now_ms();

        match game.status {
            GameStatus::Swapping => {
                let due = game
                    .swap_phase
                    .as_ref()
                    .is_some_and(|phase| now >= phase.expires_at);
                if due {
                    match self.expire_swap_phase(game_id).await {
                        Ok(_) => report.swap_expired = true,
                        Err(e) => debug!(game_id, error = %e, "Swap expiry skipped"),
                    }
                }
            }
            GameStatus::Playing => {
                if now >= game.turn_state.expires_at {
                    let player_id = game.turn_state.player_id.clone();
                    match self.handle_turn_timeout(game_id, &player_id).await {
                        Ok(_) => report.timed_out = Some(player_id),
                        Err(e) => debug!(game_id, error = %e, "Turn timeout skipped"),
                    }
                }
            }
            GameStatus::Ended => return report,
        }

        report.sweep = self.remove_disconnected_players(game_id).await;
        report
    }

    /// Run housekeeping on the configured interval until the game ends or
    /// disappears. Abort the handle to stop it sooner.
    pub fn spawn_housekeeping(self: &Arc<Self>, game_id: &str) -> JoinHandle<()>
    where
        S: 'static,
    {
        let service = Arc::clone(self);
        let game_id = game_id.to_string();
        let period = self.config.housekeeping_interval;
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            loop {
                ticker.tick().await;
                service.run_housekeeping(&game_id).await;
                match service.get_game(&game_id).await {
                    Ok(Some(game)) if game.status != GameStatus::Ended => {}
                    Ok(_) => {
                        debug!(game_id = %game_id, "Housekeeping finished");
                        break;
                    }
                    Err(e) => warn!(game_id = %game_id, error = %e, "Housekeeping poll failed"),
                }
            }
        })
    }
}

//! Game creation and the swap phase.

use std::collections::BTreeMap;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};
use ulid::Ulid;

use super::turns::{ensure_player, ensure_status, finish_turn, set_turn};
use super::{GameFlowMutationResult, GameFlowService};
use crate::domain::{
    create_multi_deck, deal, required_decks, shuffle, starting_player_and_cards, Deal,
};
use crate::entities::games::{
    ConnectionStatus, Game, GamePlayer, GameStatus, SwapPhase, TurnPhase, TurnState,
};
use crate::entities::lobbies::{Lobby, LobbyStatus};
use crate::error::AppError;
use crate::errors::domain::{DomainError, ValidationKind};
use crate::repos::{games, lobbies};
use crate::services::local_match::actions::{execute_play, swap_hand_and_face_up};
use crate::store::{with_txn, DocumentStore, TxnStep};

/// Why a lobby cannot start a game yet, if it cannot.
fn check_startable(lobby: &Lobby, host_player_id: &str) -> Result<(), DomainError> {
    if lobby.status != LobbyStatus::Waiting {
        return Err(DomainError::validation(
            ValidationKind::LobbyNotWaiting,
            format!("Lobby {} is {:?}", lobby.id, lobby.status),
        ));
    }
    if lobby.host_player_id != host_player_id {
        return Err(DomainError::validation(
            ValidationKind::NotHost,
            "Only the host can start the game",
        ));
    }
    if !lobby.is_full() || !lobby.all_ready() {
        return Err(DomainError::validation(
            ValidationKind::LobbyNotReady,
            format!(
                "Lobby needs {} ready players, has {}",
                lobby.target_player_count,
                lobby.players.len()
            ),
        ));
    }
    Ok(())
}

/// Shuffle and deal a fresh game for the lobby's players in join order.
fn build_game(
    game_id: String,
    lobby: &Lobby,
    now: i64,
    swap_ms: i64,
) -> Result<Game, DomainError> {
    let order = lobby.join_order();
    let names: Vec<String> = order
        .iter()
        .map(|id| {
            lobby
                .players
                .get(id)
                .map(|p| p.display_name.clone())
                .unwrap_or_default()
        })
        .collect();

    let mut rng = ChaCha8Rng::from_os_rng();
    let deck_count = required_decks(order.len());
    let mut deck = create_multi_deck(deck_count, &mut rng);
    shuffle(&mut deck, &mut rng);
    let Deal { deck, players } = deal(deck, order.len(), &names, order.len())?;

    let players: BTreeMap<String, GamePlayer> = order
        .iter()
        .zip(players)
        .map(|(id, dealt)| {
            (
                id.clone(),
                GamePlayer {
                    display_name: dealt.name,
                    hand: dealt.hand,
                    face_up: dealt.face_up,
                    face_down: dealt.face_down,
                    is_out: false,
                    connection_status: ConnectionStatus::Connected,
                    last_ping_at: now,
                    timeouts_this_game: 0,
                    swap_confirmed: false,
                },
            )
        })
        .collect();

    let mut game = Game {
        id: game_id,
        lobby_id: lobby.id.clone(),
        status: GameStatus::Swapping,
        created_at: now,
        updated_at: now,
        turn_state: TurnState {
            player_id: order.first().cloned().unwrap_or_default(),
            started_at: now,
            expires_at: now + swap_ms,
            phase: TurnPhase::Swap,
        },
        player_order: order,
        players,
        deck,
        deck_count,
        deck_empty: false,
        discard_pile: Vec::new(),
        burn_pile: Vec::new(),
        current_player_index: 0,
        swap_phase: Some(SwapPhase {
            started_at: now,
            expires_at: now + swap_ms,
            confirmed_players: Vec::new(),
        }),
        loser_id: None,
        reactions: Vec::new(),
    };
    game.sync_deck_empty();
    Ok(game)
}

/// Leave the swap phase: find the opening seat and lead its forced set.
pub(super) fn begin_play(game: &mut Game, now: i64, turn_ms: i64) -> Result<(), AppError> {
    for player in game.players.values_mut() {
        player.swap_confirmed = true;
    }
    game.swap_phase = None;
    game.status = GameStatus::Playing;

    let opening = starting_player_and_cards(&game.seats());
    info!(
        game_id = %game.id,
        seat = opening.seat,
        forced = opening.cards.len(),
        "Swap phase over, play starting"
    );

    if opening.cards.is_empty() {
        set_turn(game, opening.seat, now, turn_ms);
        return Ok(());
    }

    let ids: Vec<String> = opening.cards.iter().map(|c| c.id.clone()).collect();
    let player_id = game.player_order[opening.seat].clone();
    let player = game
        .players
        .get_mut(&player_id)
        .ok_or_else(|| AppError::internal(format!("Opening player {player_id} missing")))?;
    let outcome = execute_play(player, &ids, &mut game.discard_pile, &mut game.deck)?;
    finish_turn(game, opening.seat, outcome.burn, now, turn_ms);
    Ok(())
}

impl<S: DocumentStore + ?Sized> GameFlowService<S> {
    /// Deal a game for a full, ready lobby and move the lobby in-game.
    pub async fn create_game_from_lobby(
        &self,
        lobby_id: &str,
        host_player_id: &str,
    ) -> Result<Game, AppError> {
        let lobby = lobbies::require_lobby(&*self.store, lobby_id).await?;
        check_startable(&lobby, host_player_id)?;

        let now = self.clock.now_ms();
        let game = build_game(
            Ulid::new().to_string(),
            &lobby,
            now,
            self.config.swap_timeout_ms(),
        )?;
        games::create_game(&*self.store, &game).await?;

        // The lobby may have changed since it was read; re-check before
        // pointing it at the new game.
        let game_id = game.id.clone();
        let linked = with_txn(&*self.store, &lobbies::key(lobby_id), |current: Option<Lobby>| {
            let mut lobby = current.ok_or_else(|| lobbies::not_found(lobby_id))?;
            check_startable(&lobby, host_player_id)?;
            lobby.status = LobbyStatus::InGame;
            lobby.game_id = Some(game_id.clone());
            lobby.updated_at = now;
            Ok(TxnStep::Put(lobby, ()))
        })
        .await;

        if let Err(e) = linked {
            warn!(lobby_id, game_id = %game.id, error = %e, "Lobby changed under game creation, discarding game");
            if let Err(cleanup) = self.store.delete(&games::key(&game.id)).await {
                warn!(game_id = %game.id, error = %cleanup, "Failed to discard orphaned game");
            }
            return Err(e);
        }

        info!(
            lobby_id,
            game_id = %game.id,
            players = game.player_order.len(),
            "Game created from lobby"
        );
        Ok(game)
    }

    /// Exchange a hand card with a face-up card during the swap phase.
    pub async fn swap_cards(
        &self,
        game_id: &str,
        player_id: &str,
        hand_card_id: &str,
        face_up_card_id: &str,
    ) -> Result<GameFlowMutationResult, AppError> {
        debug!(game_id, player_id, hand_card_id, face_up_card_id, "Swapping cards");
        self.run_mutation(game_id, |game, _now| {
            ensure_status(game, GameStatus::Swapping)?;
            if ensure_player(game, player_id)?.swap_confirmed {
                return Err(DomainError::validation(
                    ValidationKind::SwapAlreadyConfirmed,
                    "Swaps are locked once confirmed",
                )
                .into());
            }
            let player = game
                .player_mut(player_id)
                .ok_or_else(|| AppError::internal("player vanished mid-transaction"))?;
            swap_hand_and_face_up(player, hand_card_id, face_up_card_id)?;
            Ok(Vec::new())
        })
        .await
    }

    /// Lock in the player's table cards. The last confirmation starts play.
    /// Confirming twice is harmless.
    pub async fn confirm_swap(
        &self,
        game_id: &str,
        player_id: &str,
    ) -> Result<GameFlowMutationResult, AppError> {
        let turn_ms = self.config.turn_timeout_ms();
        self.run_mutation(game_id, |game, now| {
            ensure_status(game, GameStatus::Swapping)?;
            ensure_player(game, player_id)?;

            if let Some(player) = game.player_mut(player_id) {
                player.swap_confirmed = true;
            }
            if let Some(phase) = game.swap_phase.as_mut() {
                if !phase.confirmed_players.iter().any(|id| id == player_id) {
                    phase.confirmed_players.push(player_id.to_string());
                }
            }

            if game.players.values().all(|p| p.swap_confirmed) {
                begin_play(game, now, turn_ms)?;
            }
            Ok(Vec::new())
        })
        .await
    }

    /// Once the swap deadline passes, confirm everyone with the cards they
    /// hold and start play.
    pub async fn expire_swap_phase(&self, game_id: &str) -> Result<GameFlowMutationResult, AppError> {
        let turn_ms = self.config.turn_timeout_ms();
        self.run_mutation(game_id, |game, now| {
            ensure_status(game, GameStatus::Swapping)?;
            let expires_at = game
                .swap_phase
                .as_ref()
                .map_or(game.turn_state.expires_at, |p| p.expires_at);
            if now < expires_at {
                return Err(DomainError::validation(
                    ValidationKind::TurnNotExpired,
                    "Swap phase has not expired yet",
                )
                .into());
            }
            begin_play(game, now, turn_ms)?;
            Ok(Vec::new())
        })
        .await
    }
}

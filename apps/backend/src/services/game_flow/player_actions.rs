use std::collections::BTreeMap;

use tracing::{debug, info};

use super::turns::{ensure_current, ensure_player, ensure_playable_zone, finish_turn};
use super::{GameFlowMutationResult, GameFlowService};
use crate::domain::game_transition::GameTransition;
use crate::domain::moves::must_play_blind;
use crate::domain::BurnCheck;
use crate::entities::games::{GamePlayer, Reaction};
use crate::error::AppError;
use crate::errors::domain::{DomainError, ValidationKind};
use crate::services::local_match::actions::{execute_blind_play, execute_pickup, execute_play};
use crate::store::DocumentStore;

/// Emoji accepted by [`GameFlowService::send_reaction`].
pub const ALLOWED_REACTIONS: [&str; 6] = ["👍", "😂", "😡", "🔥", "💩", "🎉"];

/// Reactions kept on the document; older ones are dropped first.
const MAX_REACTIONS: usize = 50;

/// Borrow the seat's entry from `players` alone, so the piles on the same
/// document stay available to the caller.
fn seat_entry<'a>(
    players: &'a mut BTreeMap<String, GamePlayer>,
    player_id: &str,
) -> Result<&'a mut GamePlayer, AppError> {
    players
        .get_mut(player_id)
        .ok_or_else(|| AppError::internal(format!("Player {player_id} vanished mid-transaction")))
}

impl<S: DocumentStore + ?Sized> GameFlowService<S> {
    /// Play one or more same-rank cards from the player's playable zone.
    pub async fn play_cards(
        &self,
        game_id: &str,
        player_id: &str,
        card_ids: &[String],
    ) -> Result<GameFlowMutationResult, AppError> {
        debug!(game_id, player_id, cards = card_ids.len(), "Playing cards");
        let turn_ms = self.config.turn_timeout_ms();

        let result = self
            .run_mutation(game_id, |game, now| {
                let seat = ensure_current(game, player_id)?;
                ensure_playable_zone(ensure_player(game, player_id)?, card_ids, game.deck_empty)?;

                let player = seat_entry(&mut game.players, player_id)?;
                let outcome =
                    execute_play(player, card_ids, &mut game.discard_pile, &mut game.deck)?;
                finish_turn(game, seat, outcome.burn, now, turn_ms);
                Ok(Vec::new())
            })
            .await?;

        info!(
            game_id,
            player_id,
            cards = card_ids.len(),
            transitions = result.transitions.len(),
            "Cards played"
        );
        Ok(result)
    }

    /// Take the whole discard pile into the hand and pass the turn.
    pub async fn pickup_pile(
        &self,
        game_id: &str,
        player_id: &str,
    ) -> Result<GameFlowMutationResult, AppError> {
        let turn_ms = self.config.turn_timeout_ms();
        self.run_mutation(game_id, |game, now| {
            let seat = ensure_current(game, player_id)?;
            if game.discard_pile.is_empty() {
                return Err(DomainError::validation(
                    ValidationKind::NothingToPickUp,
                    "The discard pile is empty",
                )
                .into());
            }

            let player = seat_entry(&mut game.players, player_id)?;
            let taken = execute_pickup(player, &mut game.discard_pile);
            finish_turn(game, seat, BurnCheck::NONE, now, turn_ms);
            Ok(vec![GameTransition::PilePickedUp {
                player_id: player_id.to_string(),
                cards: taken.len(),
            }])
        })
        .await
    }

    /// Reveal the face-down card at `index`; an illegal reveal picks up
    /// the pile together with the revealed card.
    pub async fn play_blind(
        &self,
        game_id: &str,
        player_id: &str,
        index: usize,
    ) -> Result<GameFlowMutationResult, AppError> {
        let turn_ms = self.config.turn_timeout_ms();
        self.run_mutation(game_id, |game, now| {
            let seat = ensure_current(game, player_id)?;
            if !must_play_blind(ensure_player(game, player_id)?) {
                return Err(DomainError::validation(
                    ValidationKind::WrongZone,
                    "Blind play is only allowed once hand and face-up cards are gone",
                )
                .into());
            }

            let player = seat_entry(&mut game.players, player_id)?;
            let outcome = execute_blind_play(player, index, &mut game.discard_pile)?;
            debug!(
                game_id,
                player_id,
                card = %outcome.card.id,
                legal = outcome.legal,
                "Blind card revealed"
            );
            finish_turn(game, seat, outcome.burn, now, turn_ms);

            if outcome.must_pickup {
                return Ok(vec![GameTransition::PilePickedUp {
                    player_id: player_id.to_string(),
                    cards: outcome.picked_up,
                }]);
            }
            Ok(Vec::new())
        })
        .await
    }

    /// Append a reaction from a player in the game.
    pub async fn send_reaction(
        &self,
        game_id: &str,
        player_id: &str,
        emoji: &str,
    ) -> Result<GameFlowMutationResult, AppError> {
        if !ALLOWED_REACTIONS.contains(&emoji) {
            return Err(DomainError::validation(
                ValidationKind::InvalidEmoji,
                format!("Reaction {emoji:?} is not allowed"),
            )
            .into());
        }
        self.run_mutation(game_id, |game, now| {
            ensure_player(game, player_id)?;
            game.reactions.push(Reaction {
                player_id: player_id.to_string(),
                emoji: emoji.to_string(),
                timestamp: now,
            });
            let excess = game.reactions.len().saturating_sub(MAX_REACTIONS);
            game.reactions.drain(..excess);
            Ok(Vec::new())
        })
        .await
    }
}

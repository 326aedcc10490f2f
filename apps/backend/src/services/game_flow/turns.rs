//! Turn bookkeeping shared by every game-flow mutation.
//!
//! These functions only touch the in-memory document handed to them by
//! [`run_mutation`](super::GameFlowService::run_mutation); persistence is the
//! caller's concern.

use tracing::debug;

use crate::domain::moves::{playable_zone, zone_cards, PlayZone};
use crate::domain::seats::{is_game_over, loser_seat};
use crate::domain::{is_exhausted, next_active_seat, BurnCheck, Direction, PlayerZones};
use crate::entities::games::{Game, GamePlayer, GameStatus, TurnPhase, TurnState};
use crate::errors::domain::{DomainError, NotFoundKind, ValidationKind};

pub(super) fn ensure_status(game: &Game, status: GameStatus) -> Result<(), DomainError> {
    if game.status != status {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            format!("Game is {:?}, expected {status:?}", game.status),
        ));
    }
    Ok(())
}

pub(super) fn ensure_player<'a>(game: &'a Game, player_id: &str) -> Result<&'a GamePlayer, DomainError> {
    game.player(player_id).ok_or_else(|| {
        DomainError::not_found(
            NotFoundKind::Player,
            format!("Player {player_id} is not in game {}", game.id),
        )
    })
}

/// The caller's seat, provided it is their turn in a game being played.
pub(super) fn ensure_current(game: &Game, player_id: &str) -> Result<usize, DomainError> {
    ensure_status(game, GameStatus::Playing)?;
    ensure_player(game, player_id)?;
    match game.seat_of(player_id) {
        Some(seat) if seat == game.current_player_index => Ok(seat),
        _ => Err(DomainError::validation(
            ValidationKind::OutOfTurn,
            "Not your turn",
        )),
    }
}

/// Reject card ids that are not in the zone the player must play from.
pub(super) fn ensure_playable_zone<P: PlayerZones + ?Sized>(
    player: &P,
    card_ids: &[String],
    deck_empty: bool,
) -> Result<(), DomainError> {
    let zone = playable_zone(player, deck_empty);
    if zone == PlayZone::FaceDown {
        return Err(DomainError::validation(
            ValidationKind::WrongZone,
            "Only face-down cards remain; play blind",
        ));
    }
    let allowed = zone_cards(player, zone);
    for id in card_ids {
        if allowed.iter().any(|c| &c.id == id) {
            continue;
        }
        let held = player
            .hand()
            .iter()
            .chain(player.face_up())
            .chain(player.face_down())
            .any(|c| &c.id == id);
        let kind = if held {
            ValidationKind::WrongZone
        } else {
            ValidationKind::CardNotHeld
        };
        return Err(DomainError::validation(
            kind,
            format!("Card {id} is not playable from {zone:?}"),
        ));
    }
    Ok(())
}

/// Hand the turn to `seat` with a fresh deadline.
pub(super) fn set_turn(game: &mut Game, seat: usize, now: i64, turn_ms: i64) {
    game.current_player_index = seat;
    game.turn_state = TurnState {
        player_id: game.player_order.get(seat).cloned().unwrap_or_default(),
        started_at: now,
        expires_at: now + turn_ms,
        phase: TurnPhase::Play,
    };
}

pub(super) fn end_game(game: &mut Game, loser_id: Option<String>) {
    debug!(game_id = %game.id, loser = ?loser_id, "Game ended");
    game.status = GameStatus::Ended;
    game.loser_id = loser_id;
}

/// Seat after `seat`, skipping players who are out.
pub(super) fn next_seat(game: &Game, seat: usize) -> usize {
    next_active_seat(seat, &game.seats(), 1, Direction::Clockwise)
}

/// After an action by `seat`: burn the pile if needed, settle the player's
/// out status, end the game or pass the turn. A burn lets the same seat
/// act again unless it just went out.
pub(super) fn finish_turn(game: &mut Game, seat: usize, burn: BurnCheck, now: i64, turn_ms: i64) {
    if burn.burn {
        game.burn_pile.append(&mut game.discard_pile);
    }
    game.sync_deck_empty();

    let deck_empty = game.deck_empty;
    let player_out = match game
        .player_order
        .get(seat)
        .and_then(|id| game.players.get_mut(id))
    {
        Some(player) => {
            if is_exhausted(&*player, deck_empty) {
                player.is_out = true;
            }
            player.is_out
        }
        None => false,
    };

    let seats = game.seats();
    if is_game_over(&seats) {
        let loser = loser_seat(&seats).and_then(|s| game.player_order.get(s).cloned());
        end_game(game, loser);
        return;
    }

    let next = if burn.burn && !player_out {
        seat
    } else {
        next_seat(game, seat)
    };
    set_turn(game, next, now, turn_ms);
}

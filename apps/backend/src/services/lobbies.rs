//! Lobby service - pre-game rooms, join codes and matchmaking.

use std::collections::BTreeMap;
use std::sync::Arc;

use rand::Rng;
use tracing::{debug, info, warn};
use ulid::Ulid;

use crate::domain::display_name::validate_display_name;
use crate::entities::lobbies::{
    Lobby, LobbyPlayer, LobbyStatus, LobbyType, MAX_TARGET_PLAYERS, MIN_TARGET_PLAYERS,
};
use crate::error::AppError;
use crate::errors::domain::{ConflictKind, DomainError, ValidationKind};
use crate::errors::ErrorCode;
use crate::infra::clock::Clock;
use crate::repos::lobbies;
use crate::services::players::PlayerService;
use crate::store::{with_txn, DocumentStore, Subscription, TxnStep};

/// Code characters, without the look-alikes 0, O, 1 and I.
const CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";
const CODE_LEN: usize = 6;
const CODE_ATTEMPTS: usize = 10;

pub fn generate_lobby_code<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..CODE_LEN)
        .map(|_| CODE_ALPHABET[rng.random_range(0..CODE_ALPHABET.len())] as char)
        .collect()
}

fn in_lobby<'a>(lobby: &'a mut Lobby, player_id: &str) -> Result<&'a mut LobbyPlayer, DomainError> {
    let lobby_id = &lobby.id;
    lobby.players.get_mut(player_id).ok_or_else(|| {
        DomainError::validation(
            ValidationKind::NotInLobby,
            format!("Player {player_id} is not in lobby {lobby_id}"),
        )
    })
}

fn ensure_waiting(lobby: &Lobby) -> Result<(), DomainError> {
    if lobby.status != LobbyStatus::Waiting {
        return Err(DomainError::validation(
            ValidationKind::LobbyNotWaiting,
            format!("Lobby {} is no longer accepting players", lobby.id),
        ));
    }
    Ok(())
}

/// The lobby filled up or stopped waiting between listing and joining.
fn seat_gone(err: &AppError) -> bool {
    matches!(err, AppError::NotFound { .. })
        || matches!(err.code(), ErrorCode::LobbyFull | ErrorCode::LobbyNotWaiting)
}

pub struct LobbyService<S: DocumentStore + ?Sized> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
}

impl<S: DocumentStore + ?Sized> Clone for LobbyService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<S: DocumentStore + ?Sized> LobbyService<S> {
    pub fn new(store: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    async fn ensure_not_banned(&self, player_id: &str) -> Result<(), AppError> {
        let players = PlayerService::new(Arc::clone(&self.store), Arc::clone(&self.clock));
        if let Some(ban) = players.check_ban(player_id).await? {
            return Err(DomainError::validation(
                ValidationKind::Banned,
                format!("Player {player_id} is banned until {}", ban.expires_at),
            )
            .into());
        }
        Ok(())
    }

    /// A code no waiting lobby is using.
    async fn unique_code(&self) -> Result<String, AppError> {
        for _ in 0..CODE_ATTEMPTS {
            let code = generate_lobby_code(&mut rand::rng());
            if lobbies::find_waiting_by_code(&*self.store, &code).await?.is_none() {
                return Ok(code);
            }
            debug!(code, "Lobby code taken, retrying");
        }
        Err(DomainError::conflict(
            ConflictKind::JoinCodeConflict,
            "Could not generate a unique lobby code",
        )
        .into())
    }

    /// Open a lobby with the caller as host. Private lobbies get a join code.
    pub async fn create_lobby(
        &self,
        host_player_id: &str,
        display_name: &str,
        lobby_type: LobbyType,
        target_player_count: usize,
    ) -> Result<Lobby, AppError> {
        if !(MIN_TARGET_PLAYERS..=MAX_TARGET_PLAYERS).contains(&target_player_count) {
            return Err(DomainError::validation(
                ValidationKind::InvalidPlayerCount,
                format!(
                    "Target must be {MIN_TARGET_PLAYERS}..={MAX_TARGET_PLAYERS}, got {target_player_count}"
                ),
            )
            .into());
        }
        let display_name = validate_display_name(display_name)?;
        self.ensure_not_banned(host_player_id).await?;

        let code = match lobby_type {
            LobbyType::Private => Some(self.unique_code().await?),
            LobbyType::Random => None,
        };
        let now = self.clock.now_ms();
        let lobby = Lobby {
            id: Ulid::new().to_string(),
            host_player_id: host_player_id.to_string(),
            lobby_type,
            code,
            target_player_count,
            status: LobbyStatus::Waiting,
            created_at: now,
            updated_at: now,
            game_id: None,
            players: BTreeMap::from([(
                host_player_id.to_string(),
                LobbyPlayer {
                    display_name,
                    joined_at: now,
                    ready: false,
                    is_host: true,
                },
            )]),
        };
        lobbies::create_lobby(&*self.store, &lobby).await?;

        info!(
            lobby_id = %lobby.id,
            host_player_id,
            ?lobby_type,
            target_player_count,
            "Lobby created"
        );
        Ok(lobby)
    }

    pub async fn get_lobby(&self, lobby_id: &str) -> Result<Option<Lobby>, AppError> {
        lobbies::find_by_id(&*self.store, lobby_id).await
    }

    /// The waiting lobby using `code`, in any letter case.
    pub async fn find_by_code(&self, code: &str) -> Result<Option<Lobby>, AppError> {
        lobbies::find_waiting_by_code(&*self.store, code).await
    }

    /// Random lobbies of this size that still have a free seat, oldest first.
    pub async fn find_available_lobbies(
        &self,
        target_player_count: usize,
    ) -> Result<Vec<Lobby>, AppError> {
        lobbies::find_open_random(&*self.store, Some(target_player_count)).await
    }

    pub async fn join_lobby(
        &self,
        lobby_id: &str,
        player_id: &str,
        display_name: &str,
    ) -> Result<Lobby, AppError> {
        let display_name = validate_display_name(display_name)?;
        self.ensure_not_banned(player_id).await?;
        let now = self.clock.now_ms();

        let lobby = with_txn(&*self.store, &lobbies::key(lobby_id), |current: Option<Lobby>| {
            let mut lobby = current.ok_or_else(|| lobbies::not_found(lobby_id))?;
            ensure_waiting(&lobby)?;
            if lobby.is_full() {
                return Err(DomainError::validation(
                    ValidationKind::LobbyFull,
                    format!("Lobby {lobby_id} is full"),
                )
                .into());
            }
            if lobby.players.contains_key(player_id) {
                return Err(DomainError::validation(
                    ValidationKind::AlreadyJoined,
                    format!("Player {player_id} already joined"),
                )
                .into());
            }
            lobby.players.insert(
                player_id.to_string(),
                LobbyPlayer {
                    display_name: display_name.clone(),
                    joined_at: now,
                    ready: false,
                    is_host: false,
                },
            );
            lobby.updated_at = now;
            Ok(TxnStep::Put(lobby.clone(), lobby))
        })
        .await?;

        info!(lobby_id, player_id, players = lobby.players.len(), "Player joined lobby");
        Ok(lobby)
    }

    /// Remove the player. The last one out deletes the lobby; a departing
    /// host hands over to the earliest remaining joiner.
    ///
    /// Returns the lobby as left behind, or `None` once it is gone.
    pub async fn leave_lobby(&self, lobby_id: &str, player_id: &str) -> Result<Option<Lobby>, AppError> {
        let now = self.clock.now_ms();
        let remaining = with_txn(&*self.store, &lobbies::key(lobby_id), |current: Option<Lobby>| {
            let Some(mut lobby) = current else {
                return Ok(TxnStep::Keep(None));
            };
            if lobby.players.remove(player_id).is_none() {
                return Ok(TxnStep::Keep(Some(lobby)));
            }
            if lobby.players.is_empty() {
                return Ok(TxnStep::Delete(None));
            }

            if lobby.host_player_id == player_id {
                if let Some(next_host) = lobby.join_order().into_iter().next() {
                    if let Some(entry) = lobby.players.get_mut(&next_host) {
                        entry.is_host = true;
                    }
                    lobby.host_player_id = next_host;
                }
            }
            lobby.updated_at = now;
            Ok(TxnStep::Put(lobby.clone(), Some(lobby)))
        })
        .await?;

        match &remaining {
            Some(lobby) => debug!(lobby_id, player_id, host = %lobby.host_player_id, "Player left lobby"),
            None => info!(lobby_id, player_id, "Last player left, lobby deleted"),
        }
        Ok(remaining)
    }

    pub async fn set_ready(&self, lobby_id: &str, player_id: &str, ready: bool) -> Result<Lobby, AppError> {
        let now = self.clock.now_ms();
        with_txn(&*self.store, &lobbies::key(lobby_id), |current: Option<Lobby>| {
            let mut lobby = current.ok_or_else(|| lobbies::not_found(lobby_id))?;
            ensure_waiting(&lobby)?;
            in_lobby(&mut lobby, player_id)?.ready = ready;
            lobby.updated_at = now;
            Ok(TxnStep::Put(lobby.clone(), lobby))
        })
        .await
    }

    /// Close the lobby to new players. Only the host may close it.
    pub async fn close_lobby(&self, lobby_id: &str, host_player_id: &str) -> Result<Lobby, AppError> {
        let now = self.clock.now_ms();
        let lobby = with_txn(&*self.store, &lobbies::key(lobby_id), |current: Option<Lobby>| {
            let mut lobby = current.ok_or_else(|| lobbies::not_found(lobby_id))?;
            if lobby.host_player_id != host_player_id {
                return Err(DomainError::validation(
                    ValidationKind::NotHost,
                    "Only the host can close the lobby",
                )
                .into());
            }
            if lobby.status == LobbyStatus::Closed {
                return Ok(TxnStep::Keep(lobby));
            }
            lobby.status = LobbyStatus::Closed;
            lobby.updated_at = now;
            Ok(TxnStep::Put(lobby.clone(), lobby))
        })
        .await?;
        info!(lobby_id, "Lobby closed");
        Ok(lobby)
    }

    /// Join the oldest open random lobby of this size, or open a new one.
    ///
    /// A lobby that fills between listing and joining is skipped.
    pub async fn quick_match(
        &self,
        player_id: &str,
        display_name: &str,
        target_player_count: usize,
    ) -> Result<Lobby, AppError> {
        for candidate in self.find_available_lobbies(target_player_count).await? {
            match self.join_lobby(&candidate.id, player_id, display_name).await {
                Ok(lobby) => return Ok(lobby),
                Err(e) if seat_gone(&e) => {
                    debug!(lobby_id = %candidate.id, error = %e, "Quick match candidate rejected");
                }
                Err(e) => return Err(e),
            }
        }
        self.create_lobby(player_id, display_name, LobbyType::Random, target_player_count)
            .await
    }

    /// Call `callback` with every committed version of the lobby, or `None`
    /// once it is deleted.
    pub fn subscribe_lobby(
        &self,
        lobby_id: &str,
        callback: impl Fn(Option<Lobby>) + Send + Sync + 'static,
    ) -> Subscription {
        let id = lobby_id.to_string();
        self.store.subscribe(
            &lobbies::key(lobby_id),
            Arc::new(move |value| match value {
                Some(value) => match serde_json::from_value::<Lobby>(value.clone()) {
                    Ok(lobby) => callback(Some(lobby)),
                    Err(e) => warn!(lobby_id = %id, error = %e, "Undecodable lobby update skipped"),
                },
                None => callback(None),
            }),
        )
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    #[test]
    fn codes_use_the_unambiguous_alphabet() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        for _ in 0..200 {
            let code = generate_lobby_code(&mut rng);
            assert_eq!(code.len(), CODE_LEN);
            assert!(code.bytes().all(|b| CODE_ALPHABET.contains(&b)));
            assert!(!code.contains(['0', 'O', '1', 'I']));
        }
    }
}

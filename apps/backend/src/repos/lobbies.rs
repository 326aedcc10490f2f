//! Lobby document repository functions.

use crate::entities::lobbies::{self, Lobby, LobbyStatus, LobbyType};
use crate::error::AppError;
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::store::{get_doc, DocKey, DocumentStore};

pub fn key(lobby_id: &str) -> DocKey {
    DocKey::new(lobbies::COLLECTION, lobby_id)
}

pub async fn find_by_id<S: DocumentStore + ?Sized>(
    store: &S,
    lobby_id: &str,
) -> Result<Option<Lobby>, AppError> {
    get_doc(store, &key(lobby_id)).await
}

pub async fn require_lobby<S: DocumentStore + ?Sized>(
    store: &S,
    lobby_id: &str,
) -> Result<Lobby, AppError> {
    find_by_id(store, lobby_id)
        .await?
        .ok_or_else(|| not_found(lobby_id).into())
}

pub async fn create_lobby<S: DocumentStore + ?Sized>(store: &S, lobby: &Lobby) -> Result<(), AppError> {
    store
        .create(&key(&lobby.id), serde_json::to_value(lobby)?)
        .await
}

/// Every lobby document, ordered by id.
pub async fn list_all<S: DocumentStore + ?Sized>(store: &S) -> Result<Vec<Lobby>, AppError> {
    store
        .list(lobbies::COLLECTION)
        .await?
        .into_iter()
        .map(|(_, value)| serde_json::from_value(value).map_err(AppError::from))
        .collect()
}

/// A waiting lobby with this join code. Codes compare case-insensitively.
pub async fn find_waiting_by_code<S: DocumentStore + ?Sized>(
    store: &S,
    code: &str,
) -> Result<Option<Lobby>, AppError> {
    let wanted = code.trim().to_ascii_uppercase();
    Ok(list_all(store).await?.into_iter().find(|lobby| {
        lobby.status == LobbyStatus::Waiting
            && lobby
                .code
                .as_deref()
                .is_some_and(|c| c.eq_ignore_ascii_case(&wanted))
    }))
}

/// Open random lobbies with a free seat, oldest first.
pub async fn find_open_random<S: DocumentStore + ?Sized>(
    store: &S,
    target_player_count: Option<usize>,
) -> Result<Vec<Lobby>, AppError> {
    let mut open: Vec<Lobby> = list_all(store)
        .await?
        .into_iter()
        .filter(|lobby| {
            lobby.lobby_type == LobbyType::Random
                && lobby.status == LobbyStatus::Waiting
                && !lobby.is_full()
                && target_player_count.is_none_or(|t| lobby.target_player_count == t)
        })
        .collect();
    open.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
    Ok(open)
}

pub fn not_found(lobby_id: &str) -> DomainError {
    DomainError::not_found(NotFoundKind::Lobby, format!("Lobby {lobby_id} not found"))
}

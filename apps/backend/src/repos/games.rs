//! Game document repository functions.

use crate::entities::games::{self, Game};
use crate::error::AppError;
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::store::{get_doc, DocKey, DocumentStore};

pub fn key(game_id: &str) -> DocKey {
    DocKey::new(games::COLLECTION, game_id)
}

pub async fn find_by_id<S: DocumentStore + ?Sized>(
    store: &S,
    game_id: &str,
) -> Result<Option<Game>, AppError> {
    get_doc(store, &key(game_id)).await
}

pub async fn require_game<S: DocumentStore + ?Sized>(
    store: &S,
    game_id: &str,
) -> Result<Game, AppError> {
    find_by_id(store, game_id)
        .await?
        .ok_or_else(|| not_found(game_id).into())
}

/// Store a new game document; fails if the id is taken.
pub async fn create_game<S: DocumentStore + ?Sized>(store: &S, game: &Game) -> Result<(), AppError> {
    store
        .create(&key(&game.id), serde_json::to_value(game)?)
        .await
}

pub fn not_found(game_id: &str) -> DomainError {
    DomainError::not_found(NotFoundKind::Game, format!("Game {game_id} not found"))
}

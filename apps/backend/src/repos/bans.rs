//! Ban document repository functions. Bans are keyed by player id.

use crate::entities::bans::{self, Ban};
use crate::error::AppError;
use crate::store::{get_doc, DocKey, DocumentStore};

pub fn key(player_id: &str) -> DocKey {
    DocKey::new(bans::COLLECTION, player_id)
}

pub async fn find_by_player<S: DocumentStore + ?Sized>(
    store: &S,
    player_id: &str,
) -> Result<Option<Ban>, AppError> {
    get_doc(store, &key(player_id)).await
}

/// Write or replace the player's ban.
pub async fn put_ban<S: DocumentStore + ?Sized>(
    store: &S,
    player_id: &str,
    ban: &Ban,
) -> Result<(), AppError> {
    store.put(&key(player_id), serde_json::to_value(ban)?).await
}

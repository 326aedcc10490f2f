//! Game flow service - applies player actions to shared game documents.
//!
//! Every mutating operation is a transaction over one `games/{id}`
//! document: the freshest copy is re-validated (status, turn, possession,
//! deadlines), the complete next document is computed, and the store commits
//! it atomically or re-runs the step after a concurrent write. Callers get
//! back the final document plus the derived [`GameTransition`]s.
//!
//! [`GameTransition`]: crate::domain::game_transition::GameTransition

mod housekeeping;
mod mutation;
mod player_actions;
mod setup;
mod turns;

use std::sync::Arc;

use tracing::warn;

pub use housekeeping::{DisconnectSweep, HousekeepingReport, TimeoutOutcome};
pub use mutation::GameFlowMutationResult;
pub use player_actions::ALLOWED_REACTIONS;

use crate::config::GameConfig;
use crate::entities::games::Game;
use crate::error::AppError;
use crate::infra::clock::Clock;
use crate::repos::games;
use crate::store::{DocumentStore, Subscription};

/// Game flow service over an injected document store and clock.
pub struct GameFlowService<S: DocumentStore + ?Sized> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
    config: GameConfig,
}

impl<S: DocumentStore + ?Sized> Clone for GameFlowService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            clock: Arc::clone(&self.clock),
            config: self.config.clone(),
        }
    }
}

impl<S: DocumentStore + ?Sized> GameFlowService<S> {
    pub fn new(store: Arc<S>, clock: Arc<dyn Clock>, config: GameConfig) -> Self {
        Self {
            store,
            clock,
            config,
        }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub async fn get_game(&self, game_id: &str) -> Result<Option<Game>, AppError> {
        games::find_by_id(&*self.store, game_id).await
    }

    /// Call `callback` with every committed version of the game, or `None`
    /// once it is deleted. No call is made for the current state.
    pub fn subscribe_game(
        &self,
        game_id: &str,
        callback: impl Fn(Option<Game>) + Send + Sync + 'static,
    ) -> Subscription {
        let id = game_id.to_string();
        self.store.subscribe(
            &games::key(game_id),
            Arc::new(move |value| match value {
                Some(value) => match serde_json::from_value::<Game>(value.clone()) {
                    Ok(game) => callback(Some(game)),
                    Err(e) => warn!(game_id = %id, error = %e, "Undecodable game update skipped"),
                },
                None => callback(None),
            }),
        )
    }
}

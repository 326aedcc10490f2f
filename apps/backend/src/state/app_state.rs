use std::sync::Arc;

use crate::config::GameConfig;
use crate::error::AppError;
use crate::infra::clock::{Clock, SystemClock};
use crate::services::game_flow::GameFlowService;
use crate::services::lobbies::LobbyService;
use crate::services::players::PlayerService;
use crate::store::{DocumentStore, InMemoryStore};

/// Services sharing one store, clock and config.
pub struct AppState<S: DocumentStore> {
    pub store: Arc<S>,
    pub clock: Arc<dyn Clock>,
    pub games: GameFlowService<S>,
    pub lobbies: LobbyService<S>,
    pub players: PlayerService<S>,
}

impl<S: DocumentStore> AppState<S> {
    pub fn new(store: Arc<S>, clock: Arc<dyn Clock>, config: GameConfig) -> Self {
        Self {
            games: GameFlowService::new(Arc::clone(&store), Arc::clone(&clock), config),
            lobbies: LobbyService::new(Arc::clone(&store), Arc::clone(&clock)),
            players: PlayerService::new(Arc::clone(&store), Arc::clone(&clock)),
            store,
            clock,
        }
    }

    pub fn config(&self) -> &GameConfig {
        self.games.config()
    }
}

impl AppState<InMemoryStore> {
    /// Services over a fresh in-memory store sized by `config`.
    pub fn in_memory(config: GameConfig, clock: Arc<dyn Clock>) -> Self {
        let store = Arc::new(InMemoryStore::from_config(&config));
        Self::new(store, clock, config)
    }

    /// Wire the in-memory stack from `SHED_*` variables and the system clock.
    pub fn from_env() -> Result<Self, AppError> {
        let config = GameConfig::from_env()?;
        Ok(Self::in_memory(config, Arc::new(SystemClock)))
    }
}

#[cfg(test)]
mod tests {
    use std::env;
    use std::time::Duration;

    use serial_test::serial;

    use super::*;

    #[test]
    #[serial]
    fn from_env_carries_config_into_store_and_services() {
        env::set_var("SHED_TXN_MAX_ATTEMPTS", "9");
        env::set_var("SHED_TURN_TIMEOUT_SECS", "12");
        let state = AppState::from_env();
        env::remove_var("SHED_TXN_MAX_ATTEMPTS");
        env::remove_var("SHED_TURN_TIMEOUT_SECS");

        let state = state.unwrap();
        assert_eq!(state.store.max_attempts(), 9);
        assert_eq!(state.config().turn_timeout, Duration::from_secs(12));
    }

    #[test]
    #[serial]
    fn from_env_surfaces_config_errors() {
        env::set_var("SHED_TXN_MAX_ATTEMPTS", "0");
        let result = AppState::from_env();
        env::remove_var("SHED_TXN_MAX_ATTEMPTS");

        assert!(matches!(result, Err(AppError::Config { .. })));
    }
}

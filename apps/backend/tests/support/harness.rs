//! Services wired over one in-memory store and a manual clock.

use std::sync::Arc;
use std::time::Duration;

use backend_test_support::unique_helpers::unique_player_ids;
use shithead_backend::entities::games::Game;
use shithead_backend::entities::lobbies::{Lobby, LobbyType};
use shithead_backend::error::AppError;
use shithead_backend::repos::games;
use shithead_backend::{
    AppState, Clock, GameConfig, GameFlowService, InMemoryStore, LobbyService, ManualClock,
    PlayerService,
};

/// Fixed start instant shared by every harness.
pub const START_MS: i64 = 1_700_000_000_000;

pub struct Harness {
    pub store: Arc<InMemoryStore>,
    pub clock: Arc<ManualClock>,
    pub flow: GameFlowService<InMemoryStore>,
    pub lobbies: LobbyService<InMemoryStore>,
    pub players: PlayerService<InMemoryStore>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(GameConfig::default())
    }

    pub fn with_config(config: GameConfig) -> Self {
        let clock = Arc::new(ManualClock::at_epoch_ms(START_MS));
        let AppState {
            store,
            games,
            lobbies,
            players,
            ..
        } = AppState::in_memory(config, clock.clone());
        Self {
            store,
            clock,
            flow: games,
            lobbies,
            players,
        }
    }

    pub fn advance(&self, by: Duration) {
        self.clock.advance(by);
    }

    pub fn now_ms(&self) -> i64 {
        self.clock.now_ms()
    }

    /// A private lobby holding `count` players, all ready. The first id is
    /// the host.
    pub async fn ready_lobby(&self, count: usize) -> Result<(Lobby, Vec<String>), AppError> {
        let ids = unique_player_ids(count);
        let lobby = self
            .lobbies
            .create_lobby(&ids[0], "Host", LobbyType::Private, count)
            .await?;
        for (n, id) in ids.iter().enumerate().skip(1) {
            self.lobbies
                .join_lobby(&lobby.id, id, &format!("Player {n}"))
                .await?;
            self.lobbies.set_ready(&lobby.id, id, true).await?;
        }
        let lobby = self
            .lobbies
            .get_lobby(&lobby.id)
            .await?
            .ok_or_else(|| AppError::internal("lobby vanished"))?;
        Ok((lobby, ids))
    }

    /// A freshly dealt game still in its swap phase.
    pub async fn swapping_game(&self, count: usize) -> Result<(Game, Vec<String>), AppError> {
        let (lobby, ids) = self.ready_lobby(count).await?;
        let game = self.flow.create_game_from_lobby(&lobby.id, &ids[0]).await?;
        Ok((game, ids))
    }

    /// A dealt game where everyone has confirmed their swap.
    pub async fn playing_game(&self, count: usize) -> Result<(Game, Vec<String>), AppError> {
        let (game, ids) = self.swapping_game(count).await?;
        let mut latest = game;
        for id in &ids {
            latest = self.flow.confirm_swap(&latest.id, id).await?.final_game;
        }
        Ok((latest, ids))
    }

    /// Write a hand-built game document.
    pub async fn insert_game(&self, game: &Game) -> Result<(), AppError> {
        games::create_game(&*self.store, game).await
    }

    pub async fn game(&self, game_id: &str) -> Game {
        self.flow
            .get_game(game_id)
            .await
            .expect("load game")
            .expect("game exists")
    }
}

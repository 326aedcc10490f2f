use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const COLLECTION: &str = "lobbies";

pub const MIN_TARGET_PLAYERS: usize = 2;
pub const MAX_TARGET_PLAYERS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LobbyType {
    Random,
    Private,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LobbyStatus {
    Waiting,
    Starting,
    InGame,
    Closed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LobbyPlayer {
    pub display_name: String,
    pub joined_at: i64,
    pub ready: bool,
    pub is_host: bool,
}

/// A pre-game room stored at `lobbies/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lobby {
    pub id: String,
    pub host_player_id: String,
    #[serde(rename = "type")]
    pub lobby_type: LobbyType,
    pub code: Option<String>,
    pub target_player_count: usize,
    pub status: LobbyStatus,
    pub created_at: i64,
    pub updated_at: i64,
    pub game_id: Option<String>,
    pub players: BTreeMap<String, LobbyPlayer>,
}

impl Lobby {
    pub fn is_full(&self) -> bool {
        self.players.len() >= self.target_player_count
    }

    /// Everyone except the host has marked ready.
    pub fn all_ready(&self) -> bool {
        self.players.values().all(|p| p.ready || p.is_host)
    }

    /// Player ids ordered by join time, ties broken by id.
    pub fn join_order(&self) -> Vec<String> {
        let mut entries: Vec<(&String, &LobbyPlayer)> = self.players.iter().collect();
        entries.sort_by(|a, b| a.1.joined_at.cmp(&b.1.joined_at).then(a.0.cmp(b.0)));
        entries.into_iter().map(|(id, _)| id.clone()).collect()
    }
}

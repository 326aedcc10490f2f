use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::player::{PlayerZones, PlayerZonesMut};
use crate::domain::Card;

pub const COLLECTION: &str = "games";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    Swapping,
    Playing,
    Ended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionStatus {
    Connected,
    Disconnected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnPhase {
    Swap,
    Play,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GamePlayer {
    pub display_name: String,
    pub hand: Vec<Card>,
    pub face_up: Vec<Card>,
    pub face_down: Vec<Card>,
    pub is_out: bool,
    pub connection_status: ConnectionStatus,
    pub last_ping_at: i64,
    pub timeouts_this_game: u32,
    #[serde(default)]
    pub swap_confirmed: bool,
}

impl PlayerZones for GamePlayer {
    fn hand(&self) -> &[Card] {
        &self.hand
    }
    fn face_up(&self) -> &[Card] {
        &self.face_up
    }
    fn face_down(&self) -> &[Card] {
        &self.face_down
    }
    fn is_out(&self) -> bool {
        self.is_out
    }
}

impl PlayerZonesMut for GamePlayer {
    fn hand_mut(&mut self) -> &mut Vec<Card> {
        &mut self.hand
    }
    fn face_up_mut(&mut self) -> &mut Vec<Card> {
        &mut self.face_up
    }
    fn face_down_mut(&mut self) -> &mut Vec<Card> {
        &mut self.face_down
    }
    fn set_out(&mut self, out: bool) {
        self.is_out = out;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnState {
    pub player_id: String,
    pub started_at: i64,
    pub expires_at: i64,
    pub phase: TurnPhase,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapPhase {
    pub started_at: i64,
    pub expires_at: i64,
    pub confirmed_players: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reaction {
    pub player_id: String,
    pub emoji: String,
    pub timestamp: i64,
}

/// The shared online game document stored at `games/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub id: String,
    pub lobby_id: String,
    pub status: GameStatus,
    pub created_at: i64,
    pub updated_at: i64,
    pub player_order: Vec<String>,
    pub players: BTreeMap<String, GamePlayer>,
    pub deck: Vec<Card>,
    /// Decks shuffled together at the deal; fixed for the game.
    pub deck_count: usize,
    pub deck_empty: bool,
    pub discard_pile: Vec<Card>,
    pub burn_pile: Vec<Card>,
    pub current_player_index: usize,
    pub turn_state: TurnState,
    pub swap_phase: Option<SwapPhase>,
    pub loser_id: Option<String>,
    #[serde(default)]
    pub reactions: Vec<Reaction>,
}

impl Game {
    pub fn player(&self, player_id: &str) -> Option<&GamePlayer> {
        self.players.get(player_id)
    }

    pub fn player_mut(&mut self, player_id: &str) -> Option<&mut GamePlayer> {
        self.players.get_mut(player_id)
    }

    /// Seat index of `player_id` in play order.
    pub fn seat_of(&self, player_id: &str) -> Option<usize> {
        self.player_order.iter().position(|id| id == player_id)
    }

    pub fn current_player_id(&self) -> Option<&str> {
        self.player_order
            .get(self.current_player_index)
            .map(String::as_str)
    }

    /// Players in seat order. Ids missing from `players` are skipped.
    pub fn seats(&self) -> Vec<&GamePlayer> {
        self.player_order
            .iter()
            .filter_map(|id| self.players.get(id))
            .collect()
    }

    /// Keep the denormalised `deck_empty` flag in step with the deck.
    pub fn sync_deck_empty(&mut self) {
        self.deck_empty = self.deck.is_empty();
    }

    /// Every card in the document, across all zones and piles.
    pub fn total_cards(&self) -> usize {
        self.players.values().map(|p| p.card_count()).sum::<usize>()
            + self.deck.len()
            + self.discard_pile.len()
            + self.burn_pile.len()
    }
}

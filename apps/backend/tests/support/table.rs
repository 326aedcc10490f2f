//! Hand-built game documents for deterministic scenarios.

use std::collections::BTreeMap;

use shithead_backend::domain::{Card, Rank, Suit};
use shithead_backend::entities::games::{
    ConnectionStatus, Game, GamePlayer, GameStatus, TurnPhase, TurnState,
};

pub fn card(rank: Rank, id: &str) -> Card {
    Card::new(Suit::Spades, rank, id)
}

pub fn ids(cards: &[&str]) -> Vec<String> {
    cards.iter().map(|s| s.to_string()).collect()
}

/// A connected seat with the given zones.
pub fn seat(hand: Vec<Card>, face_up: Vec<Card>, face_down: Vec<Card>) -> GamePlayer {
    GamePlayer {
        display_name: "Seat".into(),
        hand,
        face_up,
        face_down,
        is_out: false,
        connection_status: ConnectionStatus::Connected,
        last_ping_at: 0,
        timeouts_this_game: 0,
        swap_confirmed: true,
    }
}

/// Builder for a game already in the playing phase, deck empty unless set.
pub struct TableBuilder {
    game: Game,
}

impl TableBuilder {
    pub fn new(game_id: &str, now: i64, turn_ms: i64) -> Self {
        Self {
            game: Game {
                id: game_id.to_string(),
                lobby_id: format!("lobby-{game_id}"),
                status: GameStatus::Playing,
                created_at: now,
                updated_at: now,
                player_order: Vec::new(),
                players: BTreeMap::new(),
                deck: Vec::new(),
                deck_count: 1,
                deck_empty: true,
                discard_pile: Vec::new(),
                burn_pile: Vec::new(),
                current_player_index: 0,
                turn_state: TurnState {
                    player_id: String::new(),
                    started_at: now,
                    expires_at: now + turn_ms,
                    phase: TurnPhase::Play,
                },
                swap_phase: None,
                loser_id: None,
                reactions: Vec::new(),
            },
        }
    }

    pub fn seat(mut self, player_id: &str, mut player: GamePlayer) -> Self {
        player.last_ping_at = self.game.created_at;
        self.game.player_order.push(player_id.to_string());
        self.game.players.insert(player_id.to_string(), player);
        self
    }

    pub fn pile(mut self, cards: Vec<Card>) -> Self {
        self.game.discard_pile = cards;
        self
    }

    pub fn deck(mut self, cards: Vec<Card>) -> Self {
        self.game.deck = cards;
        self
    }

    pub fn current(mut self, seat: usize) -> Self {
        self.game.current_player_index = seat;
        self
    }

    pub fn build(mut self) -> Game {
        let seat = self.game.current_player_index;
        self.game.turn_state.player_id = self.game.player_order[seat].clone();
        self.game.sync_deck_empty();
        self.game
    }
}

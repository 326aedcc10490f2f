pub mod game_flow;
pub mod lobbies;
pub mod local_match;
pub mod players;

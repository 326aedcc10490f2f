pub mod bans;
pub mod games;
pub mod lobbies;

pub use bans::Ban;
pub use games::{Game, GamePlayer, GameStatus};
pub use lobbies::{Lobby, LobbyPlayer, LobbyStatus, LobbyType};

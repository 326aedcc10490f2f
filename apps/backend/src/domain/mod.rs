//! Domain layer: pure game logic types and helpers.

pub mod cards_serde;
pub mod cards_types;
pub mod dealing;
pub mod display_name;
pub mod events;
pub mod moves;
pub mod opening;
pub mod player;
pub mod player_view;
pub mod seats;

pub mod game_transition;
pub mod rules;
pub mod seed_derivation;

#[cfg(test)]
mod test_gens;
#[cfg(test)]
mod test_prelude;
#[cfg(test)]
mod tests_props_burn;
#[cfg(test)]
mod tests_props_legality;
#[cfg(test)]
mod tests_props_seats;
#[cfg(test)]
mod tests_scenarios;

// Re-exports for ergonomics
pub use cards_types::{Card, Rank, Suit};
pub use dealing::{create_deck, create_multi_deck, deal, required_decks, shuffle, Deal};
pub use moves::{find_valid_moves, has_valid_move, playable_zone, PlayZone};
pub use opening::{starting_player_and_cards, Opening};
pub use player::{is_exhausted, Player, PlayerZones, PlayerZonesMut};
pub use rules::{can_play, effective_top_card, is_seven_active, will_burn, BurnCheck, BurnReason};
pub use seats::{next_active_seat, Direction};
pub use seed_derivation::{derive_ai_seed, derive_dealing_seed};

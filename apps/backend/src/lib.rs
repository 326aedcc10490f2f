#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod ai;
pub mod config;
pub mod domain;
pub mod entities;
pub mod error;
pub mod errors;
pub mod infra;
pub mod repos;
pub mod services;
pub mod state;
pub mod store;
pub mod telemetry;

#[cfg(test)]
pub mod test_bootstrap;

// Re-exports for public API
pub use config::GameConfig;
pub use error::AppError;
pub use errors::{DomainError, ErrorCode};
pub use infra::clock::{Clock, ManualClock, SystemClock};
pub use services::game_flow::{GameFlowMutationResult, GameFlowService};
pub use services::lobbies::LobbyService;
pub use services::local_match::LocalMatch;
pub use services::players::PlayerService;
pub use state::AppState;
pub use store::{DocumentStore, InMemoryStore, Subscription};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}

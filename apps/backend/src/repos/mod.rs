//! Typed document access over a [`DocumentStore`](crate::store::DocumentStore).

pub mod bans;
pub mod games;
pub mod lobbies;

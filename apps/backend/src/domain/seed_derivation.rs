//! RNG seed derivation utilities for deterministic match behavior.
//!
//! A single match seed fans out into independent seeds for the deck shuffle
//! and for each AI seat, so a seeded match replays identically.

/// Derive the seed used to build and shuffle the deck.
pub fn derive_dealing_seed(match_seed: u64) -> u64 {
    match_seed.wrapping_mul(6364136223846793005).wrapping_add(2)
}

/// Derive the seed for the AI sitting at `seat`.
///
/// Different seats get different seeds so two AIs of the same tier do not
/// mirror each other's random choices.
pub fn derive_ai_seed(match_seed: u64, seat: usize) -> u64 {
    match_seed
        .wrapping_add((seat as u64).wrapping_mul(1_000_003))
        .wrapping_add(1)
}

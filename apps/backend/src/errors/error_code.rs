//! Error codes for the Shithead backend.
//!
//! This module defines all error codes used throughout the application.
//! Add new codes here; never pass ad-hoc strings as error codes.
//!
//! All error codes are SCREAMING_SNAKE_CASE and are the strings clients
//! see when an operation is rejected.

use core::fmt;

/// Centralized error codes for the Shithead backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Move validation
    /// Submitted card set was empty
    EmptyPlay,
    /// Submitted cards do not share a rank
    MixedRanks,
    /// Cards cannot go on the current pile
    IllegalPlay,
    /// Player does not hold one of the cards
    CardNotHeld,
    /// Cards are held but not in the playable zone
    WrongZone,
    /// Out of turn
    OutOfTurn,
    /// Phase mismatch
    PhaseMismatch,
    /// Blind index outside the face-down zone
    InvalidBlindIndex,
    /// Pickup requested on an empty pile
    NothingToPickUp,
    /// Timeout reported before the deadline
    TurnNotExpired,
    /// Swap after confirming
    SwapAlreadyConfirmed,
    /// Parse card error
    ParseCard,
    /// Rank outside 2..=14
    InvalidRank,
    /// Player count outside the supported range
    InvalidPlayerCount,

    // Lobby and player validation
    /// Lobby is not accepting players
    LobbyNotWaiting,
    /// Lobby already full
    LobbyFull,
    /// Not every player is ready or the lobby is not full
    LobbyNotReady,
    /// Player already in the lobby
    AlreadyJoined,
    /// Player is not in the lobby
    NotInLobby,
    /// Only the host may do this
    NotHost,
    /// Player is temporarily banned
    Banned,
    /// Display name rejected
    InvalidDisplayName,
    /// Reaction emoji not in the allowed set
    InvalidEmoji,
    /// General validation error
    ValidationError,

    // Resource Not Found
    /// Game not found
    GameNotFound,
    /// Lobby not found
    LobbyNotFound,
    /// Player not found
    PlayerNotFound,
    /// Ban not found
    BanNotFound,
    /// General not found error
    NotFound,

    // Business Logic Conflicts
    /// Lobby code generation exhausted its attempts
    JoinCodeConflict,
    /// Optimistic lock conflict
    OptimisticLock,
    /// Generic conflict (fallback for unmatched conflicts)
    Conflict,

    // System Errors
    /// Backing store unavailable
    StoreUnavailable,
    /// Store operation timed out
    StoreTimeout,
    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
    /// Data corruption detected
    DataCorruption,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::EmptyPlay => "EMPTY_PLAY",
            Self::MixedRanks => "MIXED_RANKS",
            Self::IllegalPlay => "ILLEGAL_PLAY",
            Self::CardNotHeld => "CARD_NOT_HELD",
            Self::WrongZone => "WRONG_ZONE",
            Self::OutOfTurn => "OUT_OF_TURN",
            Self::PhaseMismatch => "PHASE_MISMATCH",
            Self::InvalidBlindIndex => "INVALID_BLIND_INDEX",
            Self::NothingToPickUp => "NOTHING_TO_PICK_UP",
            Self::TurnNotExpired => "TURN_NOT_EXPIRED",
            Self::SwapAlreadyConfirmed => "SWAP_ALREADY_CONFIRMED",
            Self::ParseCard => "PARSE_CARD",
            Self::InvalidRank => "INVALID_RANK",
            Self::InvalidPlayerCount => "INVALID_PLAYER_COUNT",

            Self::LobbyNotWaiting => "LOBBY_NOT_WAITING",
            Self::LobbyFull => "LOBBY_FULL",
            Self::LobbyNotReady => "LOBBY_NOT_READY",
            Self::AlreadyJoined => "ALREADY_JOINED",
            Self::NotInLobby => "NOT_IN_LOBBY",
            Self::NotHost => "NOT_HOST",
            Self::Banned => "BANNED",
            Self::InvalidDisplayName => "INVALID_DISPLAY_NAME",
            Self::InvalidEmoji => "INVALID_EMOJI",
            Self::ValidationError => "VALIDATION_ERROR",

            Self::GameNotFound => "GAME_NOT_FOUND",
            Self::LobbyNotFound => "LOBBY_NOT_FOUND",
            Self::PlayerNotFound => "PLAYER_NOT_FOUND",
            Self::BanNotFound => "BAN_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::JoinCodeConflict => "JOIN_CODE_CONFLICT",
            Self::OptimisticLock => "OPTIMISTIC_LOCK",
            Self::Conflict => "CONFLICT",

            Self::StoreUnavailable => "STORE_UNAVAILABLE",
            Self::StoreTimeout => "STORE_TIMEOUT",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
            Self::DataCorruption => "DATA_CORRUPTION",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

//! AI player trait definition.

use std::fmt;

use crate::domain::player_view::PlayerView;
use crate::domain::Card;
use crate::error::AppError;

/// Errors that can occur during AI decision-making.
#[derive(Debug)]
pub enum AiError {
    /// AI failed to make a decision within timeout
    Timeout,
    /// AI encountered an internal error
    Internal(String),
    /// AI produced an invalid move
    InvalidMove(String),
}

impl fmt::Display for AiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AiError::Timeout => write!(f, "AI decision timeout"),
            AiError::Internal(msg) => write!(f, "AI internal error: {msg}"),
            AiError::InvalidMove(msg) => write!(f, "AI invalid move: {msg}"),
        }
    }
}

impl std::error::Error for AiError {}

impl From<AiError> for AppError {
    fn from(err: AiError) -> Self {
        AppError::internal(format!("AI error: {err}"))
    }
}

/// A move chosen by an AI for its turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AiMove {
    /// Play these cards from the current zone.
    Play(Vec<Card>),
    /// Take the discard pile into hand.
    Pickup,
    /// Flip the face-down card at this index.
    Blind(usize),
}

/// A hand card id and a face-up card id to exchange during the swap phase.
pub type SwapChoice = (String, String);

/// Trait for AI players.
///
/// Implementations receive the view of the seat whose turn it is and must
/// choose a legal action. Legal sets are enumerated by
/// [`PlayerView::valid_moves`].
pub trait AiPlayer: Send + Sync {
    /// Choose the action for this turn.
    fn choose_move(&self, view: &PlayerView) -> Result<AiMove, AiError>;

    /// Choose hand/face-up exchanges before play starts. Defaults to none.
    fn choose_swaps(&self, _view: &PlayerView) -> Result<Vec<SwapChoice>, AiError> {
        Ok(Vec::new())
    }
}

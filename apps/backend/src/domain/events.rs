//! Semantic events emitted as a local match progresses.
//!
//! Presentation layers map each event to a sound or animation through
//! [`GameEvent::cue`]; nothing here knows how cues are rendered.

use crate::domain::rules::{BurnReason, CAP, GLASS, RESET};
use crate::domain::{Card, Rank};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// `deck_count` decks shuffled together and dealt.
    Dealt { players: usize, deck_count: usize },
    /// Swap phase ended; `seat` leads.
    PlayStarted { seat: usize },
    CardsPlayed { seat: usize, cards: Vec<Card> },
    /// A face-down card was revealed.
    BlindRevealed { seat: usize, card: Card, legal: bool },
    Burned { seat: usize, reason: BurnReason },
    PilePickedUp { seat: usize, count: usize },
    DirectionReversed,
    TurnStarted { seat: usize },
    PlayerOut { seat: usize },
    GameOver { loser: Option<usize> },
}

impl GameEvent {
    /// Cue name for this event.
    pub fn cue(&self) -> &'static str {
        match self {
            GameEvent::Dealt { .. } => "card-shuffle",
            GameEvent::PlayStarted { .. } => "card-play",
            GameEvent::CardsPlayed { cards, .. } => {
                cards.first().map_or("card-play", |c| rank_cue(c.rank))
            }
            GameEvent::BlindRevealed { card, legal, .. } => {
                if *legal {
                    rank_cue(card.rank)
                } else {
                    "pile-pickup"
                }
            }
            GameEvent::Burned {
                reason: BurnReason::Ten,
                ..
            } => "special-burn",
            GameEvent::Burned {
                reason: BurnReason::FourOfAKind,
                ..
            } => "burn-combo",
            GameEvent::PilePickedUp { .. } => "pile-pickup",
            GameEvent::DirectionReversed => "card-play",
            GameEvent::TurnStarted { .. } => "your-turn",
            GameEvent::PlayerOut { .. } => "player-out",
            GameEvent::GameOver { .. } => "game-over",
        }
    }

    /// Outcome cue from the point of view of `viewer`.
    pub fn outcome_cue(&self, viewer: usize) -> Option<&'static str> {
        match self {
            GameEvent::GameOver { loser } if *loser == Some(viewer) => Some("game-lose"),
            GameEvent::GameOver { .. } => Some("game-win"),
            _ => None,
        }
    }
}

fn rank_cue(rank: Rank) -> &'static str {
    match rank {
        RESET => "special-reset",
        GLASS => "special-glass",
        CAP => "special-cap",
        _ => "card-play",
    }
}

//! Single-device match against AI seats.
//!
//! A [`LocalMatch`] owns every zone and pile of one game and drives it
//! synchronously: the caller submits human actions, then lets the AI seats
//! catch up with [`LocalMatch::run_ai_turns`]. Each action returns the
//! [`GameEvent`]s it produced; subscribers receive the same events.

pub mod actions;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use self::actions::{execute_blind_play, execute_pickup, execute_play, swap_hand_and_face_up};
use crate::ai::{create_ai, AiConfig, AiMove, AiPlayer, Difficulty};
use crate::domain::events::GameEvent;
use crate::domain::moves::{must_play_blind, zone_cards};
use crate::domain::player_view::PlayerView;
use crate::domain::rules::REVERSE;
use crate::domain::seats::{is_game_over, loser_seat};
use crate::domain::{
    create_multi_deck, deal, derive_ai_seed, derive_dealing_seed, find_valid_moves, is_exhausted,
    next_active_seat, playable_zone, required_decks, shuffle, starting_player_and_cards,
    BurnCheck, Card, Deal, Direction, PlayZone, Player, PlayerZones,
};
use crate::errors::domain::{DomainError, InfraErrorKind, NotFoundKind, ValidationKind};

/// Optional table rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchRules {
    /// A played Jack reverses the direction of play.
    pub reverse_on_jack: bool,
}

#[derive(Debug, Clone)]
pub struct MatchSetup {
    pub player_names: Vec<String>,
    pub player_count: usize,
    /// Seats `0..human_count` are human, the rest AI.
    pub human_count: usize,
    pub difficulty: Difficulty,
    /// Per-seat overrides of `difficulty`, indexed by seat.
    pub seat_difficulties: Vec<Option<Difficulty>>,
    pub seed: Option<u64>,
    pub rules: MatchRules,
}

impl Default for MatchSetup {
    fn default() -> Self {
        Self {
            player_names: Vec::new(),
            player_count: 2,
            human_count: 1,
            difficulty: Difficulty::default(),
            seat_difficulties: Vec::new(),
            seed: None,
            rules: MatchRules::default(),
        }
    }
}

impl MatchSetup {
    pub fn difficulty_for(&self, seat: usize) -> Difficulty {
        self.seat_difficulties
            .get(seat)
            .copied()
            .flatten()
            .unwrap_or(self.difficulty)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPhase {
    Swapping,
    Playing,
    Ended,
}

/// Token returned by [`LocalMatch::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&GameEvent) + Send>;

struct AiSeat {
    difficulty: Difficulty,
    player: Box<dyn AiPlayer>,
}

pub struct LocalMatch {
    players: Vec<Player>,
    deck: Vec<Card>,
    discard: Vec<Card>,
    burned: Vec<Card>,
    current: usize,
    direction: Direction,
    phase: MatchPhase,
    swap_confirmed: Vec<bool>,
    ais: Vec<Option<AiSeat>>,
    rules: MatchRules,
    loser: Option<usize>,
    dealt_cards: usize,
    history: Vec<GameEvent>,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: u64,
}

impl LocalMatch {
    /// Shuffle, deal and seat the AIs. The match starts in the swap phase.
    pub fn new(setup: MatchSetup) -> Result<Self, DomainError> {
        if setup.human_count > setup.player_count {
            return Err(DomainError::validation(
                ValidationKind::InvalidPlayerCount,
                format!(
                    "{} humans cannot sit at a table of {}",
                    setup.human_count, setup.player_count
                ),
            ));
        }

        let mut rng = match setup.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(derive_dealing_seed(seed)),
            None => ChaCha8Rng::from_os_rng(),
        };
        let deck_count = required_decks(setup.player_count);
        let mut deck = create_multi_deck(deck_count, &mut rng);
        shuffle(&mut deck, &mut rng);
        let dealt_cards = deck.len();

        let Deal { deck, players } = deal(
            deck,
            setup.player_count,
            &setup.player_names,
            setup.human_count,
        )?;

        let mut ais = Vec::with_capacity(players.len());
        for (seat, p) in players.iter().enumerate() {
            if !p.is_ai {
                ais.push(None);
                continue;
            }
            let difficulty = setup.difficulty_for(seat);
            let seed = setup.seed.map(|s| derive_ai_seed(s, seat));
            let config = AiConfig::for_tier(difficulty, seed);
            let player = create_ai(&config).ok_or_else(|| {
                DomainError::infra(
                    InfraErrorKind::Other("ai registry".into()),
                    format!("no AI registered for {}", difficulty.as_str()),
                )
            })?;
            ais.push(Some(AiSeat { difficulty, player }));
        }

        info!(
            players = setup.player_count,
            humans = setup.human_count,
            deck = deck.len(),
            "Local match dealt"
        );

        let event = GameEvent::Dealt {
            players: players.len(),
            deck_count,
        };
        Ok(Self {
            swap_confirmed: vec![false; players.len()],
            players,
            deck,
            discard: Vec::new(),
            burned: Vec::new(),
            current: 0,
            direction: Direction::default(),
            phase: MatchPhase::Swapping,
            ais,
            rules: setup.rules,
            loser: None,
            dealt_cards,
            history: vec![event],
            listeners: Vec::new(),
            next_listener: 0,
        })
    }

    // ----- swap phase -----

    /// Exchange a hand card with a face-up card before play starts.
    pub fn swap_cards(
        &mut self,
        seat: usize,
        hand_card_id: &str,
        face_up_card_id: &str,
    ) -> Result<(), DomainError> {
        self.ensure_phase(MatchPhase::Swapping)?;
        self.ensure_seat(seat)?;
        if self.swap_confirmed[seat] {
            return Err(DomainError::validation(
                ValidationKind::SwapAlreadyConfirmed,
                format!("Seat {seat} already confirmed its swaps"),
            ));
        }
        swap_hand_and_face_up(&mut self.players[seat], hand_card_id, face_up_card_id)
    }

    /// Lock in a seat's table cards. Play starts once every human confirms.
    pub fn confirm_swap(&mut self, seat: usize) -> Result<Vec<GameEvent>, DomainError> {
        self.ensure_phase(MatchPhase::Swapping)?;
        self.ensure_seat(seat)?;
        self.swap_confirmed[seat] = true;

        let humans_done = self
            .players
            .iter()
            .zip(&self.swap_confirmed)
            .all(|(p, confirmed)| p.is_ai || *confirmed);
        if humans_done {
            self.start_play()
        } else {
            Ok(Vec::new())
        }
    }

    /// End the swap phase: AI seats make their swaps, the opening seat is
    /// found and leads with its forced set.
    pub fn start_play(&mut self) -> Result<Vec<GameEvent>, DomainError> {
        self.ensure_phase(MatchPhase::Swapping)?;

        for seat in 0..self.players.len() {
            if self.swap_confirmed[seat] {
                continue;
            }
            self.swap_confirmed[seat] = true;
            let Some(view) = self.view_for(seat) else {
                continue;
            };
            let Some(ai) = self.ais[seat].as_ref() else {
                continue;
            };
            let swaps = match ai.player.choose_swaps(&view) {
                Ok(swaps) => swaps,
                Err(e) => {
                    warn!(seat, error = %e, "AI swap choice failed, keeping dealt cards");
                    continue;
                }
            };
            for (hand_id, up_id) in swaps {
                if let Err(e) = swap_hand_and_face_up(&mut self.players[seat], &hand_id, &up_id) {
                    warn!(seat, error = %e, "AI proposed an invalid swap");
                }
            }
        }

        let opening = starting_player_and_cards(&self.players);
        self.phase = MatchPhase::Playing;
        self.current = opening.seat;
        info!(
            seat = opening.seat,
            forced = opening.cards.len(),
            "Local match play started"
        );

        let mut events = vec![GameEvent::PlayStarted { seat: opening.seat }];
        if opening.cards.is_empty() {
            events.push(GameEvent::TurnStarted { seat: opening.seat });
        } else {
            let ids: Vec<String> = opening.cards.iter().map(|c| c.id.clone()).collect();
            events.extend(self.apply_play(opening.seat, &ids)?);
        }
        Ok(self.emit(events))
    }

    // ----- turn actions -----

    /// Play the given cards from the seat's current zone.
    pub fn play(&mut self, seat: usize, card_ids: &[String]) -> Result<Vec<GameEvent>, DomainError> {
        self.ensure_turn(seat)?;
        let events = self.apply_play(seat, card_ids)?;
        Ok(self.emit(events))
    }

    /// Reveal the face-down card at `index`.
    pub fn play_blind(&mut self, seat: usize, index: usize) -> Result<Vec<GameEvent>, DomainError> {
        self.ensure_turn(seat)?;
        if !must_play_blind(&self.players[seat]) {
            return Err(DomainError::validation(
                ValidationKind::WrongZone,
                "Face-down cards are played only once hand and face-up are empty",
            ));
        }

        let outcome = execute_blind_play(&mut self.players[seat], index, &mut self.discard)?;
        debug!(seat, card = %outcome.card.id, legal = outcome.legal, "Blind reveal");

        let mut events = vec![GameEvent::BlindRevealed {
            seat,
            card: outcome.card.clone(),
            legal: outcome.legal,
        }];
        if outcome.must_pickup {
            events.push(GameEvent::PilePickedUp {
                seat,
                count: outcome.picked_up,
            });
        }
        let played = outcome.legal.then(|| vec![outcome.card]);
        self.finish_turn(seat, played.as_deref(), outcome.burn, &mut events);
        Ok(self.emit(events))
    }

    /// Take the discard pile into hand.
    pub fn pickup(&mut self, seat: usize) -> Result<Vec<GameEvent>, DomainError> {
        self.ensure_turn(seat)?;
        if self.discard.is_empty() {
            return Err(DomainError::validation(
                ValidationKind::NothingToPickUp,
                "The discard pile is empty",
            ));
        }

        let taken = execute_pickup(&mut self.players[seat], &mut self.discard);
        debug!(seat, count = taken.len(), "Pile picked up");
        let mut events = vec![GameEvent::PilePickedUp {
            seat,
            count: taken.len(),
        }];
        self.finish_turn(seat, None, BurnCheck::NONE, &mut events);
        Ok(self.emit(events))
    }

    // ----- AI -----

    pub fn is_ai_turn(&self) -> bool {
        self.phase == MatchPhase::Playing && self.ais.get(self.current).is_some_and(Option::is_some)
    }

    /// Let the AI at the current seat take its turn.
    ///
    /// A failed or illegal AI decision falls back to the simplest legal move.
    pub fn step_ai(&mut self) -> Result<Vec<GameEvent>, DomainError> {
        self.ensure_phase(MatchPhase::Playing)?;
        let seat = self.current;
        let view = self
            .view_for(seat)
            .ok_or_else(|| DomainError::not_found(NotFoundKind::Player, format!("Seat {seat}")))?;
        let decision = match self.ais[seat].as_ref() {
            Some(ai) => ai.player.choose_move(&view),
            None => {
                return Err(DomainError::validation(
                    ValidationKind::OutOfTurn,
                    format!("Seat {seat} is not an AI seat"),
                ))
            }
        };

        let result = match decision {
            Ok(AiMove::Play(cards)) => {
                let ids: Vec<String> = cards.into_iter().map(|c| c.id).collect();
                self.play(seat, &ids)
            }
            Ok(AiMove::Pickup) => self.pickup(seat),
            Ok(AiMove::Blind(index)) => self.play_blind(seat, index),
            Err(e) => Err(DomainError::validation_other(e.to_string())),
        };

        match result {
            Ok(events) => Ok(events),
            Err(e) => {
                warn!(seat, error = %e, "AI move rejected, using fallback");
                self.fallback_move(seat)
            }
        }
    }

    /// Run AI turns until a human must act, the game ends, or `max_steps`
    /// turns have been taken.
    pub fn run_ai_turns(&mut self, max_steps: usize) -> Result<Vec<GameEvent>, DomainError> {
        let mut events = Vec::new();
        for _ in 0..max_steps {
            if !self.is_ai_turn() {
                break;
            }
            events.extend(self.step_ai()?);
        }
        Ok(events)
    }

    /// Tier of the AI at `seat`, or `None` for a human seat.
    pub fn ai_difficulty(&self, seat: usize) -> Option<Difficulty> {
        self.ais.get(seat)?.as_ref().map(|ai| ai.difficulty)
    }

    fn fallback_move(&mut self, seat: usize) -> Result<Vec<GameEvent>, DomainError> {
        if must_play_blind(&self.players[seat]) {
            return self.play_blind(seat, 0);
        }
        let moves = find_valid_moves(&self.players[seat], &self.discard, self.deck.is_empty());
        match moves.first() {
            Some(first) => {
                let ids: Vec<String> = first.iter().map(|c| c.id.clone()).collect();
                self.play(seat, &ids)
            }
            None => self.pickup(seat),
        }
    }

    // ----- events -----

    /// Receive every event emitted from now on.
    pub fn subscribe(&mut self, listener: impl FnMut(&GameEvent) + Send + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Stop a listener. Returns false when it was already gone.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    fn emit(&mut self, events: Vec<GameEvent>) -> Vec<GameEvent> {
        for event in &events {
            for (_, listener) in self.listeners.iter_mut() {
                listener(event);
            }
        }
        self.history.extend(events.iter().cloned());
        events
    }

    // ----- queries -----

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn current_seat(&self) -> usize {
        self.current
    }

    pub fn discard_pile(&self) -> &[Card] {
        &self.discard
    }

    pub fn burn_pile(&self) -> &[Card] {
        &self.burned
    }

    pub fn deck_len(&self) -> usize {
        self.deck.len()
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn loser(&self) -> Option<usize> {
        self.loser
    }

    pub fn history(&self) -> &[GameEvent] {
        &self.history
    }

    /// Cards shuffled into the match at the start.
    pub fn dealt_cards(&self) -> usize {
        self.dealt_cards
    }

    /// Cards currently in zones, deck and piles. Always equals
    /// [`dealt_cards`](Self::dealt_cards).
    pub fn total_cards(&self) -> usize {
        self.players.iter().map(PlayerZones::card_count).sum::<usize>()
            + self.deck.len()
            + self.discard.len()
            + self.burned.len()
    }

    pub fn view_for(&self, seat: usize) -> Option<PlayerView> {
        PlayerView::for_seat(seat, &self.players, &self.discard, self.deck.len())
    }

    // ----- internals -----

    fn ensure_phase(&self, phase: MatchPhase) -> Result<(), DomainError> {
        if self.phase != phase {
            return Err(DomainError::validation(
                ValidationKind::PhaseMismatch,
                format!("Expected {phase:?}, match is {:?}", self.phase),
            ));
        }
        Ok(())
    }

    fn ensure_seat(&self, seat: usize) -> Result<(), DomainError> {
        if seat >= self.players.len() {
            return Err(DomainError::not_found(
                NotFoundKind::Player,
                format!("Seat {seat} does not exist"),
            ));
        }
        Ok(())
    }

    fn ensure_turn(&self, seat: usize) -> Result<(), DomainError> {
        self.ensure_phase(MatchPhase::Playing)?;
        self.ensure_seat(seat)?;
        if seat != self.current {
            return Err(DomainError::validation(
                ValidationKind::OutOfTurn,
                format!("Seat {seat} acted on seat {}'s turn", self.current),
            ));
        }
        Ok(())
    }

    fn apply_play(&mut self, seat: usize, card_ids: &[String]) -> Result<Vec<GameEvent>, DomainError> {
        let player = &self.players[seat];
        let zone = playable_zone(player, self.deck.is_empty());
        if zone == PlayZone::FaceDown {
            return Err(DomainError::validation(
                ValidationKind::WrongZone,
                "Only face-down cards remain; play blind",
            ));
        }
        let allowed = zone_cards(player, zone);
        if let Some(id) = card_ids.iter().find(|id| !allowed.iter().any(|c| &c.id == *id)) {
            let held = player
                .hand
                .iter()
                .chain(&player.face_up)
                .chain(&player.face_down)
                .any(|c| &c.id == id);
            let kind = if held {
                ValidationKind::WrongZone
            } else {
                ValidationKind::CardNotHeld
            };
            return Err(DomainError::validation(
                kind,
                format!("Card {id} is not playable from {zone:?}"),
            ));
        }

        let outcome = execute_play(
            &mut self.players[seat],
            card_ids,
            &mut self.discard,
            &mut self.deck,
        )?;
        debug!(
            seat,
            cards = outcome.played.len(),
            drawn = outcome.drawn,
            burn = outcome.burn.burn,
            "Cards played"
        );

        let mut events = vec![GameEvent::CardsPlayed {
            seat,
            cards: outcome.played.clone(),
        }];
        self.finish_turn(seat, Some(&outcome.played), outcome.burn, &mut events);
        Ok(events)
    }

    /// Burn, reverse, out and game-over bookkeeping, then pass the turn.
    fn finish_turn(
        &mut self,
        seat: usize,
        played: Option<&[Card]>,
        burn: BurnCheck,
        events: &mut Vec<GameEvent>,
    ) {
        if let (true, Some(reason)) = (burn.burn, burn.reason) {
            self.burned.append(&mut self.discard);
            events.push(GameEvent::Burned { seat, reason });
        }

        let jack = played.is_some_and(|cards| cards.first().is_some_and(|c| c.rank == REVERSE));
        if self.rules.reverse_on_jack && jack {
            self.direction = self.direction.reversed();
            events.push(GameEvent::DirectionReversed);
        }

        let deck_empty = self.deck.is_empty();
        let player = &mut self.players[seat];
        if !player.is_out && is_exhausted(&*player, deck_empty) {
            player.is_out = true;
        }
        if self.players[seat].is_out && !self.history_has_out(seat, events) {
            info!(seat, "Player out");
            events.push(GameEvent::PlayerOut { seat });
        }

        if is_game_over(&self.players) {
            self.phase = MatchPhase::Ended;
            self.loser = loser_seat(&self.players);
            info!(loser = ?self.loser, "Local match over");
            events.push(GameEvent::GameOver { loser: self.loser });
            return;
        }

        self.current = if burn.burn && !self.players[seat].is_out {
            seat
        } else {
            next_active_seat(seat, &self.players, 1, self.direction)
        };
        events.push(GameEvent::TurnStarted { seat: self.current });
    }

    fn history_has_out(&self, seat: usize, pending: &[GameEvent]) -> bool {
        let out = GameEvent::PlayerOut { seat };
        self.history.contains(&out) || pending.contains(&out)
    }
}

//! The turn resolution engine.
//!
//! `GameEngine` owns one game session: players, decks, round and phase,
//! turn order, table-wide effects and the game log. Drivers (a local UI,
//! a network relay) call its operations one at a time and render the
//! [`GameSnapshot`] it hands back.
//!
//! ## Phases
//!
//! ```text
//! Priority --determine_turn_order--> Action --end_round--> Action (next round)
//!                                           |-----------> Priority (re-roll mode)
//!                                           `-----------> GameOver
//! ```
//!
//! Operations called in the wrong phase fail with `WrongPhase`; every
//! mutating call fails with `GameOver` once a winner is known. A failed
//! call never changes state.
//!
//! ## Randomness
//!
//! All dice, shuffles, discards and event draws come from the engine's
//! [`RandomSource`]. Inject a [`ScriptedRng`](crate::core::ScriptedRng)
//! to fix die faces in tests.

mod actions;
mod cards;
mod round;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::cards::{ship_template, Card, DeckKind, Decks, ShipId};
use crate::core::{
    DicePair, GameConfig, GameLog, GameRng, GameSnapshot, LogEntry, Phase, Player, PlayerId,
    RandomSource,
};
use crate::effects::GlobalEffect;
use crate::error::EngineError;
use crate::rules::victory::{self, Victory};

/// A seat at the table, as supplied by the lobby.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSetup {
    pub id: PlayerId,
    pub name: String,
    #[serde(rename = "shipId")]
    pub ship: ShipId,
}

impl PlayerSetup {
    #[must_use]
    pub fn new(id: impl Into<PlayerId>, name: impl Into<String>, ship: ShipId) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ship,
        }
    }
}

/// A priority roll: both dice and their sum.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityRoll {
    #[serde(flatten)]
    pub dice: DicePair,
    pub total: u8,
}

/// What happened at the end of a round.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum RoundOutcome {
    /// Play continues in `round`; `event` is the card drawn, if any.
    Continue { round: u32, event: Option<Card> },
    GameOver { victory: Victory },
}

impl RoundOutcome {
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        matches!(self, RoundOutcome::GameOver { .. })
    }
}

/// Result of handing the turn on.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TurnAdvance {
    /// The named player acts next.
    NextPlayer { player: PlayerId },
    /// Everyone acted; the round was closed.
    RoundEnded { outcome: RoundOutcome },
}

/// One game session.
///
/// ```
/// use broadside::cards::ShipId;
/// use broadside::core::{ActionKind, GameConfig, Phase};
/// use broadside::rules::{GameEngine, PlayerSetup};
///
/// let mut engine = GameEngine::with_seed(GameConfig::default(), 7);
/// engine
///     .initialize_game(&[
///         PlayerSetup::new("a", "Anne", ShipId::BlackSerpent),
///         PlayerSetup::new("b", "Bart", ShipId::Stormrider),
///     ])
///     .unwrap();
/// engine.roll_priority(&"a".into()).unwrap();
/// engine.roll_priority(&"b".into()).unwrap();
/// engine.determine_turn_order().unwrap();
/// assert_eq!(engine.phase(), Phase::Action);
///
/// let first = engine.current_player().unwrap().id.clone();
/// engine.perform_action(&first, ActionKind::Reload, None).unwrap();
/// ```
#[derive(Clone, Debug)]
pub struct GameEngine<R = GameRng> {
    config: GameConfig,
    rng: R,
    players: Vec<Player>,
    seats: FxHashMap<PlayerId, usize>,
    round: u32,
    phase: Phase,
    turn_order: Vec<PlayerId>,
    current_index: usize,
    priority_rolled: bool,
    decks: Decks,
    active_effects: Vec<GlobalEffect>,
    current_event: Option<Card>,
    log: GameLog,
}

impl GameEngine<GameRng> {
    /// Engine driven by a seeded [`GameRng`].
    #[must_use]
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::new(config, GameRng::new(seed))
    }
}

impl<R: RandomSource> GameEngine<R> {
    /// Create an engine with no players. Call
    /// [`initialize_game`](Self::initialize_game) next.
    #[must_use]
    pub fn new(config: GameConfig, rng: R) -> Self {
        Self {
            config,
            rng,
            players: Vec::new(),
            seats: FxHashMap::default(),
            round: 1,
            phase: Phase::Priority,
            turn_order: Vec::new(),
            current_index: 0,
            priority_rolled: false,
            decks: Decks::default(),
            active_effects: Vec::new(),
            current_event: None,
            log: GameLog::new(),
        }
    }

    /// Rebuild an engine from a snapshot received from a relay or a save.
    ///
    /// The snapshot only carries the recent log window, so older entries
    /// are gone.
    pub fn restore(snapshot: GameSnapshot, config: GameConfig, rng: R) -> Result<Self, EngineError> {
        let seats = seat_index(snapshot.players.iter().map(|p| &p.id))?;
        log::debug!(
            "restoring round {} ({}) with {} players",
            snapshot.current_round,
            snapshot.current_phase,
            snapshot.players.len()
        );
        Ok(Self {
            config,
            rng,
            players: snapshot.players,
            seats,
            round: snapshot.current_round,
            phase: snapshot.current_phase,
            turn_order: snapshot.turn_order,
            current_index: snapshot.current_player_index,
            priority_rolled: snapshot.priority_rolled,
            decks: snapshot.decks,
            active_effects: snapshot.active_effects,
            current_event: snapshot.current_event,
            log: snapshot.game_log,
        })
    }

    // === Setup ===

    /// Seat the players, shuffle the decks and deal starter hands.
    pub fn initialize_game(&mut self, setups: &[PlayerSetup]) -> Result<(), EngineError> {
        if !self.players.is_empty() {
            return Err(EngineError::AlreadyInitialized);
        }
        if setups.is_empty() {
            return Err(EngineError::NoPlayers);
        }
        let seats = seat_index(setups.iter().map(|s| &s.id))?;

        self.decks = Decks::new(self.config.deck_copies, &mut self.rng);
        self.players = setups
            .iter()
            .map(|setup| {
                let mut player = Player::new(setup.id.clone(), setup.name.clone(), ship_template(setup.ship));
                player.ammunition = self.config.starting_ammunition;
                player.gold = self.config.starting_gold;
                player
            })
            .collect();
        self.seats = seats;

        for seat in 0..self.players.len() {
            for _ in 0..self.config.starting_hand_size {
                self.draw_into_hand(seat, DeckKind::Starter);
            }
        }

        self.record("Game initialized! All captains prepare for battle!");
        Ok(())
    }

    // === Priority ===

    /// Roll two dice for a player's turn priority. Rolling again replaces
    /// the previous roll.
    pub fn roll_priority(&mut self, id: &PlayerId) -> Result<PriorityRoll, EngineError> {
        self.require_phase(Phase::Priority)?;
        let seat = self.seat(id)?;
        self.require_afloat(seat)?;

        let dice = DicePair::roll(&mut self.rng);
        let total = dice.total();
        self.players[seat].priority_roll = total;

        let name = &self.players[seat].name;
        let message = format!("{} rolled {} + {} = {} for priority", name, dice.die1, dice.die2, total);
        self.record(message);
        Ok(PriorityRoll { dice, total })
    }

    /// Every living player has rolled for priority.
    #[must_use]
    pub fn all_priority_rolled(&self) -> bool {
        self.players
            .iter()
            .filter(|p| p.is_alive())
            .all(|p| p.priority_roll > 0)
    }

    /// Order living players by descending priority roll (stable on ties)
    /// and open the action phase.
    pub fn determine_turn_order(&mut self) -> Result<&[PlayerId], EngineError> {
        self.require_phase(Phase::Priority)?;
        if self.players.is_empty() {
            return Err(EngineError::NoPlayers);
        }
        let pending = self
            .players
            .iter()
            .filter(|p| p.is_alive() && p.priority_roll == 0)
            .count();
        if pending > 0 {
            return Err(EngineError::PriorityPending(pending));
        }

        let mut order: Vec<&Player> = self.players.iter().filter(|p| p.is_alive()).collect();
        order.sort_by_key(|p| std::cmp::Reverse(p.priority_roll));
        let names: Vec<&str> = order.iter().map(|p| p.name.as_str()).collect();
        let message = format!("Turn order: {}", names.join(" → "));
        self.turn_order = order.into_iter().map(|p| p.id.clone()).collect();

        self.current_index = 0;
        self.priority_rolled = true;
        self.set_phase(Phase::Action);
        self.record(message);
        Ok(&self.turn_order)
    }

    // === Queries ===

    /// Player whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> Option<&Player> {
        let id = self.turn_order.get(self.current_index)?;
        self.player(id)
    }

    #[must_use]
    pub fn player(&self, id: &PlayerId) -> Option<&Player> {
        self.seats.get(id).map(|&seat| &self.players[seat])
    }

    /// All players in seating order.
    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Players whose ships are still afloat.
    pub fn alive_players(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| p.is_alive())
    }

    #[must_use]
    pub fn round(&self) -> u32 {
        self.round
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn turn_order(&self) -> &[PlayerId] {
        &self.turn_order
    }

    #[must_use]
    pub fn current_event(&self) -> Option<&Card> {
        self.current_event.as_ref()
    }

    /// Table-wide effects in play.
    #[must_use]
    pub fn active_effects(&self) -> &[GlobalEffect] {
        &self.active_effects
    }

    #[must_use]
    pub fn decks(&self) -> &Decks {
        &self.decks
    }

    /// The full game log.
    #[must_use]
    pub fn log(&self) -> &GameLog {
        &self.log
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The random source, e.g. to queue more scripted dice.
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Evaluate the win conditions against the current state.
    #[must_use]
    pub fn check_win_conditions(&self) -> Option<Victory> {
        victory::evaluate(&self.players, &self.config)
    }

    /// Independent copy of the game state with the recent log window.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            players: self.players.clone(),
            current_round: self.round,
            current_phase: self.phase,
            turn_order: self.turn_order.clone(),
            current_player_index: self.current_index,
            priority_rolled: self.priority_rolled,
            decks: self.decks.clone(),
            active_effects: self.active_effects.clone(),
            current_event: self.current_event.clone(),
            game_log: self.log.tail(self.config.log_window),
        }
    }

    // === Internals shared by the submodules ===

    fn seat(&self, id: &PlayerId) -> Result<usize, EngineError> {
        self.seats
            .get(id)
            .copied()
            .ok_or_else(|| EngineError::UnknownPlayer(id.clone()))
    }

    fn require_phase(&self, expected: Phase) -> Result<(), EngineError> {
        match self.phase {
            Phase::GameOver => Err(EngineError::GameOver),
            actual if actual != expected => Err(EngineError::WrongPhase { expected, actual }),
            _ => Ok(()),
        }
    }

    fn require_afloat(&self, seat: usize) -> Result<(), EngineError> {
        let player = &self.players[seat];
        if player.is_alive() {
            Ok(())
        } else {
            Err(EngineError::ShipSunk(player.id.clone()))
        }
    }

    /// Seat of a living opponent of `actor`.
    fn living_target(&self, actor: usize, target: Option<&PlayerId>) -> Result<usize, EngineError> {
        let id = target.ok_or(EngineError::TargetRequired)?;
        match self.seats.get(id) {
            Some(&seat) if seat != actor && self.players[seat].is_alive() => Ok(seat),
            _ => Err(EngineError::InvalidTarget),
        }
    }

    fn set_phase(&mut self, phase: Phase) {
        log::debug!("phase {} -> {}", self.phase, phase);
        self.phase = phase;
    }

    /// Append to the game log and mirror it to the `log` facade.
    fn record(&mut self, message: impl Into<String>) {
        let message = message.into();
        log::info!("[round {}] {}", self.round, message);
        self.log.push(LogEntry::now(self.round, message));
    }

    /// Move the top card of a deck into a hand. Refused when the deck is
    /// empty or the hand is full; the card then stays in the deck.
    fn draw_into_hand(&mut self, seat: usize, kind: DeckKind) -> Option<Card> {
        let player = &mut self.players[seat];
        if player.hand.len() >= self.config.max_hand_size {
            log::warn!("{}'s hand is full", player.name);
            return None;
        }
        let Some(card) = self.decks.get_mut(kind).draw() else {
            log::warn!("{} deck is empty", kind);
            return None;
        };
        log::debug!("{} draws {} from the {} deck", player.name, card.id, kind);
        player.hand.push(card.clone());
        Some(card)
    }

    /// Two distinct players, mutably.
    fn pair_mut(players: &mut [Player], a: usize, b: usize) -> (&mut Player, &mut Player) {
        debug_assert_ne!(a, b);
        if a < b {
            let (left, right) = players.split_at_mut(b);
            (&mut left[a], &mut right[0])
        } else {
            let (left, right) = players.split_at_mut(a);
            (&mut right[0], &mut left[b])
        }
    }
}

/// Map each ID to its seat, rejecting duplicates.
fn seat_index<'a>(
    ids: impl Iterator<Item = &'a PlayerId>,
) -> Result<FxHashMap<PlayerId, usize>, EngineError> {
    let mut seats = FxHashMap::default();
    for (seat, id) in ids.enumerate() {
        if seats.insert(id.clone(), seat).is_some() {
            return Err(EngineError::DuplicatePlayer(id.clone()));
        }
    }
    Ok(seats)
}

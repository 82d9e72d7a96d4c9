//! Core engine types: players, dice, RNG, configuration, actions, state.
//!
//! This module contains the building blocks every other module uses.
//! Rules live in `rules`; content lives in `cards`.

pub mod player;
pub mod rng;
pub mod dice;
pub mod config;
pub mod action;
pub mod state;

pub use player::{Crew, CrewToken, Player, PlayerId};
pub use rng::{GameRng, GameRngState, RandomSource, ScriptedRng};
pub use dice::DicePair;
pub use config::{DeckCopies, GameConfig};
pub use action::{ActionKind, ActionOutcome, CardOutcome, ShotReport};
pub use state::{GameLog, GameSnapshot, LogEntry, Phase};

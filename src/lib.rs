//! # broadside
//!
//! Turn resolution engine for a multiplayer naval combat card game.
//!
//! Captains command ships, roll for turn priority, and each turn take one
//! of five actions (fire, repair, plunder, reload, maneuver) while playing
//! cards that bend the odds. A game ends when one ship is left afloat, a
//! captain assembles the treasure map, or someone hoards enough gold.
//!
//! ## Design Principles
//!
//! 1. **Owned session**: one `GameEngine` value per game. No globals.
//!
//! 2. **Closed effect model**: card effects, player effects and table
//!    effects are enums matched exhaustively.
//!
//! 3. **Data-driven captains**: ship buffs live in a traits table, not in
//!    scattered name checks.
//!
//! 4. **Injectable randomness**: every die roll flows through
//!    `RandomSource`, so games replay from a seed and tests script dice.
//!
//! ## Modules
//!
//! - `core`: Players, dice, RNG, configuration, actions, state snapshot
//! - `cards`: Card definitions, ship catalog, card pools, decks
//! - `effects`: Card effect descriptors, player effects, table effects
//! - `rules`: Damage resolution, win conditions, the engine
//! - `error`: `EngineError`

pub mod core;
pub mod cards;
pub mod effects;
pub mod rules;
pub mod error;

// Re-export commonly used types
pub use crate::core::{
    ActionKind, ActionOutcome, CardOutcome, DicePair, GameConfig, GameLog, GameRng, GameRngState,
    GameSnapshot, Phase, Player, PlayerId, RandomSource, ScriptedRng, ShotReport,
};

pub use crate::cards::{Card, CardCatalog, CardId, Deck, DeckKind, Decks, Ship, ShipId};

pub use crate::effects::{ActiveEffect, CardEffect, GlobalEffect};

pub use crate::rules::{
    GameEngine, PlayerSetup, PriorityRoll, RoundOutcome, TurnAdvance, Victory, WinKind,
};

pub use crate::error::EngineError;

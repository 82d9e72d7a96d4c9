//! Game rules: damage maths, win conditions and the engine that runs a
//! session.
//!
//! - `combat`: pure damage resolution for one shot
//! - `victory`: win-condition evaluation
//! - `GameEngine`: phases, turns, actions, cards, rounds and events

pub mod combat;
pub mod victory;
mod engine;

pub use combat::{resolve_damage, DamageInputs};
pub use victory::{evaluate, Victory, WinKind};
pub use engine::{GameEngine, PlayerSetup, PriorityRoll, RoundOutcome, TurnAdvance};

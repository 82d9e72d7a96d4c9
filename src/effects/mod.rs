//! Effect model.
//!
//! - `CardEffect`: the descriptor printed on a card
//! - `ActiveEffect` / `EffectList`: modifiers attached to a player, with
//!   one-shot and round-timed lifecycles
//! - `GlobalEffect`: table-wide modifiers created by events
//!
//! Effects are closed sum types. Adding a new kind means adding a variant,
//! and the compiler points at every match that must handle it.

mod effect;
mod active;
mod global;

pub use effect::{CardEffect, EventCondition};
pub use active::{ActiveEffect, BurnTick, EffectList};
pub use global::{attack_bonus, attack_reduction, GlobalEffect, PlunderTally};

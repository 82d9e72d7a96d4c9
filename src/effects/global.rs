//! Table-wide effects created by event cards.
//!
//! Only present when event effects are enabled in `GameConfig`.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// Plunders counted toward a merchant bounty.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlunderTally {
    pub player: PlayerId,
    pub count: u32,
}

/// An effect that applies to every ship.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GlobalEffect {
    /// Added to every attack.
    GlobalDamageBonus { value: i32, duration: u32 },
    /// Fraction removed from every attack.
    GlobalDamageReduction { value: f64, duration: u32 },
    /// At round end, ships that are not maneuvering take `damage`.
    StormFront { damage: i32 },
    /// First player to plunder `plunders_needed` times collects `gold`.
    PlunderBounty {
        gold: u32,
        #[serde(rename = "plundersNeeded")]
        plunders_needed: u32,
        #[serde(default)]
        tallies: Vec<PlunderTally>,
    },
}

impl GlobalEffect {
    /// Whether the effect survives the round-end tick. Decrements timed
    /// effects; the storm always resolves at the round end.
    pub fn tick(&mut self) -> bool {
        match self {
            GlobalEffect::GlobalDamageBonus { duration, .. }
            | GlobalEffect::GlobalDamageReduction { duration, .. } => {
                *duration = duration.saturating_sub(1);
                *duration > 0
            }
            GlobalEffect::StormFront { .. } => false,
            GlobalEffect::PlunderBounty { .. } => true,
        }
    }
}

/// Sum of the additive attack bonuses in effect.
#[must_use]
pub fn attack_bonus(effects: &[GlobalEffect]) -> i32 {
    effects
        .iter()
        .map(|e| match e {
            GlobalEffect::GlobalDamageBonus { value, .. } => *value,
            _ => 0,
        })
        .sum()
}

/// Combined fractional reduction applied to every attack, if any.
#[must_use]
pub fn attack_reduction(effects: &[GlobalEffect]) -> Option<f64> {
    effects
        .iter()
        .filter_map(|e| match e {
            GlobalEffect::GlobalDamageReduction { value, .. } => Some(*value),
            _ => None,
        })
        .reduce(|kept, next| 1.0 - (1.0 - kept) * (1.0 - next))
}

//! Player actions and their results.
//!
//! A turn is exactly one of five actions. The engine reports what happened
//! through [`ActionOutcome`]; failures come back as [`EngineError`].

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::dice::DicePair;
use super::player::PlayerId;
use crate::cards::Card;
use crate::error::EngineError;

/// The five turn actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Fire,
    Repair,
    Plunder,
    Reload,
    Maneuver,
}

impl ActionKind {
    /// All actions in menu order.
    pub const ALL: [ActionKind; 5] = [
        ActionKind::Fire,
        ActionKind::Repair,
        ActionKind::Plunder,
        ActionKind::Reload,
        ActionKind::Maneuver,
    ];

    /// Wire name of the action.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ActionKind::Fire => "fire",
            ActionKind::Repair => "repair",
            ActionKind::Plunder => "plunder",
            ActionKind::Reload => "reload",
            ActionKind::Maneuver => "maneuver",
        }
    }

    /// Whether the action needs a target player.
    #[must_use]
    pub const fn needs_target(self) -> bool {
        matches!(self, ActionKind::Fire)
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionKind {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActionKind::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| EngineError::UnknownAction(s.to_string()))
    }
}

/// Everything a successful Fire produced.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShotReport {
    pub target: PlayerId,
    pub dice: DicePair,
    /// Final damage after every modifier.
    pub damage: i32,
    /// Damage the shooter took back from the target's captain buff.
    pub retaliation: i32,
    /// Damage the shooter took from its own powder keg.
    pub recoil: i32,
    /// Burn `(damage, duration)` passed to the target.
    pub burn: Option<(i32, u32)>,
}

/// Result of a successful [`perform_action`](crate::rules::GameEngine::perform_action).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ActionOutcome {
    /// The player was trapped; the turn is spent without acting.
    Skipped,
    Fired(ShotReport),
    Repaired { healed: i32, dice: DicePair },
    Plundered { cards: Vec<Card>, bounty: Option<u32> },
    Reloaded { gained: u32, total: u32 },
    Maneuvered { dice: DicePair, critical: bool },
}

impl ActionOutcome {
    /// Short message for the driver to show.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            ActionOutcome::Skipped => "Turn skipped".to_string(),
            ActionOutcome::Fired(shot) => format!("Dealt {} damage!", shot.damage),
            ActionOutcome::Repaired { healed, .. } => format!("Repaired {} HP!", healed),
            ActionOutcome::Plundered { .. } => "Drew loot!".to_string(),
            ActionOutcome::Reloaded { gained, .. } => format!("Gained {} ammunition!", gained),
            ActionOutcome::Maneuvered { critical: true, .. } => {
                "Critical maneuver! Enhanced defense!".to_string()
            }
            ActionOutcome::Maneuvered { .. } => "Maneuvering for defense!".to_string(),
        }
    }

    /// Dice rolled for the action, if any.
    #[must_use]
    pub fn dice(&self) -> Option<DicePair> {
        match self {
            ActionOutcome::Fired(shot) => Some(shot.dice),
            ActionOutcome::Repaired { dice, .. } | ActionOutcome::Maneuvered { dice, .. } => {
                Some(*dice)
            }
            _ => None,
        }
    }
}

/// Result of a successful [`play_card`](crate::rules::GameEngine::play_card).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardOutcome {
    pub card: Card,
    pub message: String,
    pub dice: Option<DicePair>,
}

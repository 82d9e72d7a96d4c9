//! Card effect descriptors.
//!
//! Every card carries one `CardEffect`. Descriptors are data only; the
//! rules engine matches on them exhaustively when a card is played or an
//! event is drawn. The serialized form is an object tagged by `"type"`
//! (`{"type":"damageBonus","value":10,"recoil":5}`).

use serde::{Deserialize, Serialize};

use crate::core::ActionKind;

/// What playing (or drawing) a card does.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CardEffect {
    // === Attack modifiers (held until the next Fire) ===
    /// Adds `value` to the next attack; optional recoil hurts the shooter.
    DamageBonus {
        value: i32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        recoil: Option<i32>,
    },
    /// Multiplies the next attack.
    DamageMultiplier { value: f64 },
    /// Subtracts from the next attack.
    DamagePenalty { value: i32, duration: u32 },
    /// Next attack sets the target on fire.
    Burn {
        damage: i32,
        duration: u32,
        #[serde(rename = "bonusDamage")]
        bonus_damage: i32,
    },

    // === Defence ===
    /// Fractional reduction of the next incoming hit.
    DamageReduction { value: f64, duration: u32 },
    PerfectManeuver { duration: u32 },
    CancelAttack,
    NegateDebuff { duration: u32 },
    /// Grants the critical maneuver bonus. `value` is informational.
    ManeuverBonus { value: f64, duration: u32 },

    // === Immediate ===
    Heal { value: i32 },
    HealAndCleanse { value: i32 },
    /// Self-inflicted damage.
    Damage { value: i32 },
    MaxHpIncrease { value: i32 },
    Ammunition { value: u32 },
    Gold { value: u32 },
    AddCrew { value: u32 },
    MapFragment,
    PeekLoot { count: u32 },
    Discard,

    // === Targeted ===
    SkipTurn { duration: u32 },
    DiscardRandom,
    DisableAction { action: ActionKind, duration: u32 },
    DisableManeuver {
        #[serde(default)]
        global: bool,
        duration: u32,
    },
    Undodgeable { duration: u32 },
    DisableRerolls { duration: u32 },

    // === Events ===
    ConditionalDamage { damage: i32, condition: EventCondition },
    RandomDamage { damage: i32 },
    PlunderReward {
        gold: u32,
        #[serde(rename = "plundersNeeded")]
        plunders_needed: u32,
    },
    GlobalDamageBonus { value: i32, duration: u32 },
    GlobalDamageReduction { value: f64, duration: u32 },
}

/// Who an event's conditional damage spares.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EventCondition {
    /// Ships that are maneuvering when the round ends are spared.
    NotManeuvering,
}

impl CardEffect {
    /// Whether playing the card needs a target player.
    #[must_use]
    pub fn needs_target(&self) -> bool {
        matches!(
            self,
            CardEffect::SkipTurn { .. }
                | CardEffect::DiscardRandom
                | CardEffect::DisableAction { .. }
        )
    }
}

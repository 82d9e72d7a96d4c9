//! Modifiers attached to a player.
//!
//! Two lifecycles:
//! - **One-shot**: attack modifiers and damage reduction are removed the
//!   moment they affect a shot.
//! - **Timed**: anything carrying a `duration` is decremented at round end
//!   and dropped when it reaches zero.
//!
//! A loaded fire shot (`BurnShot`) is timed like a burn and scorches its
//! holder at every round end until the next Fire hands what is left of it
//! to the target as a `Burn`.

use serde::{Deserialize, Serialize};

use crate::core::ActionKind;

/// A modifier currently attached to a player.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ActiveEffect {
    DamageBonus {
        value: i32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        recoil: Option<i32>,
    },
    DamageMultiplier { value: f64 },
    DamagePenalty { value: i32, duration: u32 },
    DamageReduction { value: f64, duration: u32 },
    /// Loaded incendiary. Burns the holder at round end until the next
    /// Fire transfers it to the target as `Burn`.
    BurnShot {
        damage: i32,
        duration: u32,
        #[serde(rename = "bonusDamage")]
        bonus_damage: i32,
    },
    /// Damage over time, applied at round end.
    Burn { damage: i32, duration: u32 },
    #[serde(rename = "disableAction")]
    ActionDisabled { action: ActionKind, duration: u32 },
}

impl ActiveEffect {
    /// Rounds left for timed effects; `None` for one-shot effects.
    #[must_use]
    pub fn duration(&self) -> Option<u32> {
        match self {
            ActiveEffect::DamagePenalty { duration, .. }
            | ActiveEffect::DamageReduction { duration, .. }
            | ActiveEffect::Burn { duration, .. }
            | ActiveEffect::BurnShot { duration, .. }
            | ActiveEffect::ActionDisabled { duration, .. } => Some(*duration),
            ActiveEffect::DamageBonus { .. } | ActiveEffect::DamageMultiplier { .. } => None,
        }
    }

    fn duration_mut(&mut self) -> Option<&mut u32> {
        match self {
            ActiveEffect::DamagePenalty { duration, .. }
            | ActiveEffect::DamageReduction { duration, .. }
            | ActiveEffect::Burn { duration, .. }
            | ActiveEffect::BurnShot { duration, .. }
            | ActiveEffect::ActionDisabled { duration, .. } => Some(duration),
            ActiveEffect::DamageBonus { .. } | ActiveEffect::DamageMultiplier { .. } => None,
        }
    }

    /// Negative effects removed by a cleanse.
    #[must_use]
    pub fn is_debuff(&self) -> bool {
        matches!(
            self,
            ActiveEffect::Burn { .. }
                | ActiveEffect::BurnShot { .. }
                | ActiveEffect::DamagePenalty { .. }
                | ActiveEffect::ActionDisabled { .. }
        )
    }

    /// `(damage, duration)` of anything that burns at round end.
    fn burning(&self) -> Option<(i32, u32)> {
        match *self {
            ActiveEffect::Burn { damage, duration }
            | ActiveEffect::BurnShot { damage, duration, .. } => Some((damage, duration)),
            _ => None,
        }
    }
}

/// Burn damage applied by a round-end tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BurnTick {
    pub damage: i32,
    /// Rounds left after this tick. Zero means the burn has ended.
    pub remaining: u32,
}

/// Ordered list of a player's active effects.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EffectList(Vec<ActiveEffect>);

impl EffectList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, effect: ActiveEffect) {
        self.0.push(effect);
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActiveEffect> {
        self.0.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Remove and return the first effect matching `pred`.
    fn take_first(&mut self, pred: impl Fn(&ActiveEffect) -> bool) -> Option<ActiveEffect> {
        let index = self.0.iter().position(pred)?;
        Some(self.0.remove(index))
    }

    /// Consume a damage bonus: `(value, recoil)`.
    pub fn take_damage_bonus(&mut self) -> Option<(i32, Option<i32>)> {
        match self.take_first(|e| matches!(e, ActiveEffect::DamageBonus { .. }))? {
            ActiveEffect::DamageBonus { value, recoil } => Some((value, recoil)),
            _ => None,
        }
    }

    /// Consume a damage multiplier.
    pub fn take_damage_multiplier(&mut self) -> Option<f64> {
        match self.take_first(|e| matches!(e, ActiveEffect::DamageMultiplier { .. }))? {
            ActiveEffect::DamageMultiplier { value } => Some(value),
            _ => None,
        }
    }

    /// Consume a damage penalty.
    pub fn take_damage_penalty(&mut self) -> Option<i32> {
        match self.take_first(|e| matches!(e, ActiveEffect::DamagePenalty { .. }))? {
            ActiveEffect::DamagePenalty { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Consume an incoming-damage reduction.
    pub fn take_damage_reduction(&mut self) -> Option<f64> {
        match self.take_first(|e| matches!(e, ActiveEffect::DamageReduction { .. }))? {
            ActiveEffect::DamageReduction { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Consume a loaded fire shot: `(damage, duration)` of the burn it carries.
    pub fn take_burn_shot(&mut self) -> Option<(i32, u32)> {
        match self.take_first(|e| matches!(e, ActiveEffect::BurnShot { .. }))? {
            ActiveEffect::BurnShot { damage, duration, .. } => Some((damage, duration)),
            _ => None,
        }
    }

    /// Set the player on fire. Burns stack: a running one keeps burning
    /// first while the new one counts down behind it.
    pub fn ignite(&mut self, damage: i32, duration: u32) {
        self.0.push(ActiveEffect::Burn { damage, duration });
    }

    /// The burn `(damage, duration)` that scorches this player at the next
    /// round end, loaded fire shots included.
    #[must_use]
    pub fn burn(&self) -> Option<(i32, u32)> {
        self.0.iter().find_map(ActiveEffect::burning)
    }

    /// Whether an action is currently disabled.
    #[must_use]
    pub fn is_disabled(&self, action: ActionKind) -> bool {
        self.0
            .iter()
            .any(|e| matches!(e, ActiveEffect::ActionDisabled { action: a, .. } if *a == action))
    }

    /// Strip every debuff: burns, loaded fire shots, damage penalties and
    /// disabled actions.
    /// Returns how many effects were removed.
    pub fn cleanse(&mut self) -> usize {
        let before = self.0.len();
        self.0.retain(|e| !e.is_debuff());
        before - self.0.len()
    }

    /// Round-end processing: decrement every timed effect once and drop the
    /// ones reaching zero. Returns the damage of the first burn, the only
    /// one that hurts this round.
    pub fn tick(&mut self) -> Option<BurnTick> {
        let burn = self.burn().map(|(damage, duration)| BurnTick {
            damage,
            remaining: duration.saturating_sub(1),
        });
        for effect in &mut self.0 {
            if let Some(duration) = effect.duration_mut() {
                *duration = duration.saturating_sub(1);
            }
        }
        self.0.retain(|e| e.duration().map_or(true, |d| d > 0));
        burn
    }
}

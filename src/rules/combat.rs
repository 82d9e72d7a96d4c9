//! Damage resolution for a single shot.
//!
//! Pure arithmetic over already-collected modifiers. The engine consumes
//! one-shot effects, gathers the numbers into [`DamageInputs`] and calls
//! [`resolve_damage`].
//!
//! ## Order
//!
//! 1. `base = dice + attack bonus`
//! 2. `(base + bonus) * multiplier`, where `bonus` already nets out penalties
//! 3. target defense, as a percentage
//! 4. maneuver reduction, if the target is maneuvering
//! 5. the target's one-shot damage reduction
//! 6. table-wide reduction from events
//! 7. floor, never below zero

use crate::core::DicePair;

/// Every number that feeds a shot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DamageInputs {
    pub dice: DicePair,
    /// Shooter's ship attack bonus.
    pub attack_bonus: i32,
    /// Additive bonus from cards and events, minus penalties.
    pub bonus: i32,
    pub multiplier: f64,
    /// Target's defense percentage.
    pub defense: i32,
    /// Fraction removed because the target is maneuvering.
    pub maneuver_reduction: Option<f64>,
    /// Fraction removed by the target's damage reduction effect.
    pub damage_reduction: Option<f64>,
    /// Fraction removed by table-wide effects.
    pub global_reduction: Option<f64>,
}

impl DamageInputs {
    /// A plain shot: no modifiers, no defense.
    #[must_use]
    pub fn new(dice: DicePair, attack_bonus: i32) -> Self {
        Self {
            dice,
            attack_bonus,
            bonus: 0,
            multiplier: 1.0,
            defense: 0,
            maneuver_reduction: None,
            damage_reduction: None,
            global_reduction: None,
        }
    }

    #[must_use]
    pub fn with_bonus(mut self, bonus: i32) -> Self {
        self.bonus = bonus;
        self
    }

    #[must_use]
    pub fn with_multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier;
        self
    }

    #[must_use]
    pub fn with_defense(mut self, defense: i32) -> Self {
        self.defense = defense;
        self
    }

    #[must_use]
    pub fn with_maneuver(mut self, reduction: f64) -> Self {
        self.maneuver_reduction = Some(reduction);
        self
    }

    #[must_use]
    pub fn with_damage_reduction(mut self, reduction: f64) -> Self {
        self.damage_reduction = Some(reduction);
        self
    }

    #[must_use]
    pub fn with_global_reduction(mut self, reduction: f64) -> Self {
        self.global_reduction = Some(reduction);
        self
    }

    /// Dice total plus the ship's attack bonus.
    #[must_use]
    pub fn base_damage(&self) -> i32 {
        i32::from(self.dice.total()) + self.attack_bonus
    }
}

/// Final damage of a shot.
///
/// ```
/// use broadside::core::DicePair;
/// use broadside::rules::{resolve_damage, DamageInputs};
///
/// // Black Serpent (+2) into a maneuvering Stormrider (defense 5, 40%).
/// let shot = DamageInputs::new(DicePair::new(4, 5), 2)
///     .with_defense(5)
///     .with_maneuver(0.4);
/// assert_eq!(resolve_damage(&shot), 6);
/// ```
#[must_use]
pub fn resolve_damage(inputs: &DamageInputs) -> i32 {
    let mut total = f64::from(inputs.base_damage() + inputs.bonus) * inputs.multiplier;
    total *= 1.0 - f64::from(inputs.defense) / 100.0;

    for reduction in [
        inputs.maneuver_reduction,
        inputs.damage_reduction,
        inputs.global_reduction,
    ]
    .into_iter()
    .flatten()
    {
        total *= 1.0 - reduction;
    }

    let damage = total.floor().max(0.0) as i32;
    log::debug!("shot {:?} -> {} damage", inputs, damage);
    damage
}

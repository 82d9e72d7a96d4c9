//! Two-die rolls.

use serde::{Deserialize, Serialize};

use super::rng::RandomSource;

/// A pair of six-sided dice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DicePair {
    pub die1: u8,
    pub die2: u8,
}

impl DicePair {
    #[must_use]
    pub const fn new(die1: u8, die2: u8) -> Self {
        Self { die1, die2 }
    }

    /// Roll two independent dice.
    pub fn roll<R: RandomSource + ?Sized>(rng: &mut R) -> Self {
        let die1 = rng.roll_die();
        let die2 = rng.roll_die();
        Self { die1, die2 }
    }

    #[must_use]
    pub const fn total(self) -> u8 {
        self.die1 + self.die2
    }
}

impl std::fmt::Display for DicePair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}+{}", self.die1, self.die2)
    }
}

//! Ship catalog and captain buffs.
//!
//! Each ship has a template (stats + flavour) and a [`ShipTraits`] record
//! describing its captain buff as data. The rules engine consults the
//! traits table instead of branching on ship names.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::RandomSource;
use crate::error::EngineError;

/// Ship identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ShipId {
    BlackSerpent,
    Stormrider,
    GoldenHarpoon,
    CrimsonKraken,
    AzureWave,
    SilentCorsair,
}

impl ShipId {
    /// Every ship in catalog order.
    pub const ALL: [ShipId; 6] = [
        ShipId::BlackSerpent,
        ShipId::Stormrider,
        ShipId::GoldenHarpoon,
        ShipId::CrimsonKraken,
        ShipId::AzureWave,
        ShipId::SilentCorsair,
    ];

    /// Wire identifier (`"blackSerpent"`, ...).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ShipId::BlackSerpent => "blackSerpent",
            ShipId::Stormrider => "stormrider",
            ShipId::GoldenHarpoon => "goldenHarpoon",
            ShipId::CrimsonKraken => "crimsonKraken",
            ShipId::AzureWave => "azureWave",
            ShipId::SilentCorsair => "silentCorsair",
        }
    }

    /// Captain buff rules for this ship.
    #[must_use]
    pub const fn traits(self) -> ShipTraits {
        let base = ShipTraits::NONE;
        match self {
            ShipId::BlackSerpent => base,
            ShipId::Stormrider => ShipTraits {
                maneuver_reduction: Some(0.4),
                ..base
            },
            ShipId::GoldenHarpoon => ShipTraits {
                plunder_draws: 2,
                ..base
            },
            ShipId::CrimsonKraken => ShipTraits {
                retaliation_damage: 3,
                ..base
            },
            ShipId::AzureWave => ShipTraits {
                repair_bonus: 2,
                ..base
            },
            ShipId::SilentCorsair => ShipTraits {
                event_shield: true,
                ..base
            },
        }
    }
}

impl std::fmt::Display for ShipId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShipId {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ShipId::ALL
            .into_iter()
            .find(|ship| ship.as_str() == s)
            .ok_or_else(|| EngineError::UnknownShip(s.to_string()))
    }
}

/// Mechanical side of a captain buff.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShipTraits {
    /// Replaces the base maneuver reduction when this ship maneuvers.
    pub maneuver_reduction: Option<f64>,
    /// Loot cards drawn per Plunder.
    pub plunder_draws: usize,
    /// Added to the Repair roll.
    pub repair_bonus: i32,
    /// Damage dealt back to anyone who hits this ship.
    pub retaliation_damage: i32,
    /// Ignore the first harmful event effect of the game.
    pub event_shield: bool,
}

impl ShipTraits {
    /// A ship with no mechanical buff.
    pub const NONE: ShipTraits = ShipTraits {
        maneuver_reduction: None,
        plunder_draws: 1,
        repair_bonus: 0,
        retaliation_damage: 0,
        event_shield: false,
    };
}

/// Display text of a captain buff.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptainBuff {
    pub name: String,
    pub description: String,
}

/// A ship. The catalog holds templates; every player owns a clone.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ship {
    pub id: ShipId,
    pub name: String,
    pub hp: i32,
    pub max_hp: i32,
    pub attack_bonus: i32,
    /// Percentage of incoming damage ignored.
    pub defense: i32,
    pub crew_capacity: u32,
    pub captain_buff: CaptainBuff,
    pub description: String,
}

impl Ship {
    /// Captain buff rules for this ship.
    #[must_use]
    pub fn traits(&self) -> ShipTraits {
        self.id.traits()
    }
}

struct ShipStats {
    name: &'static str,
    hp: i32,
    attack_bonus: i32,
    defense: i32,
    crew_capacity: u32,
    buff_name: &'static str,
    buff_description: &'static str,
    description: &'static str,
}

const fn stats(id: ShipId) -> ShipStats {
    match id {
        ShipId::BlackSerpent => ShipStats {
            name: "Black Serpent",
            hp: 100,
            attack_bonus: 2,
            defense: 0,
            crew_capacity: 3,
            buff_name: "Savvy Captain",
            buff_description: "Once per attack, reroll one die without spending a crew token.",
            description: "Balanced attacker with reliable rerolls.",
        },
        ShipId::Stormrider => ShipStats {
            name: "Stormrider",
            hp: 110,
            attack_bonus: 0,
            defense: 5,
            crew_capacity: 4,
            buff_name: "Wave Master",
            buff_description: "When you choose Maneuver, reduce incoming damage by 40% instead of 20%.",
            description: "Durable defender, less offensive punch.",
        },
        ShipId::GoldenHarpoon => ShipStats {
            name: "Golden Harpoon",
            hp: 90,
            attack_bonus: 3,
            defense: 0,
            crew_capacity: 2,
            buff_name: "Treasure Fiend",
            buff_description: "When you Plunder, draw two Loot cards.",
            description: "Fast, fragile, loot-focused.",
        },
        ShipId::CrimsonKraken => ShipStats {
            name: "Crimson Kraken",
            hp: 100,
            attack_bonus: 1,
            defense: 10,
            crew_capacity: 3,
            buff_name: "Vengeful Wrath",
            buff_description: "Whenever you take damage, the attacker suffers 3 damage.",
            description: "Moderate stats with reactive damage.",
        },
        ShipId::AzureWave => ShipStats {
            name: "Azure Wave",
            hp: 95,
            attack_bonus: 2,
            defense: 5,
            crew_capacity: 4,
            buff_name: "Master Surgeon",
            buff_description: "When you Repair, add 2 to the repair roll.",
            description: "Mixed offense/defense with enhanced healing.",
        },
        ShipId::SilentCorsair => ShipStats {
            name: "Silent Corsair",
            hp: 85,
            attack_bonus: 3,
            defense: 0,
            crew_capacity: 3,
            buff_name: "Shadow Veil",
            buff_description: "Once per game, ignore the effect of an Event card.",
            description: "High risk, high reward with a one-time escape.",
        },
    }
}

/// Fresh ship instance from the catalog.
#[must_use]
pub fn ship_template(id: ShipId) -> Ship {
    let s = stats(id);
    Ship {
        id,
        name: s.name.to_string(),
        hp: s.hp,
        max_hp: s.hp,
        attack_bonus: s.attack_bonus,
        defense: s.defense,
        crew_capacity: s.crew_capacity,
        captain_buff: CaptainBuff {
            name: s.buff_name.to_string(),
            description: s.buff_description.to_string(),
        },
        description: s.description.to_string(),
    }
}

/// Look up a ship template by wire identifier.
pub fn ship_by_id(id: &str) -> Result<Ship, EngineError> {
    id.parse().map(ship_template)
}

/// Pick a ship uniformly at random.
pub fn random_ship<R: RandomSource + ?Sized>(rng: &mut R) -> Ship {
    ship_template(ShipId::ALL[rng.gen_index(ShipId::ALL.len())])
}

//! Player identification and per-player state.
//!
//! ## PlayerId
//!
//! Opaque identifier handed in by the driver (lobby or network room).
//!
//! ## Player
//!
//! Everything the engine tracks for one captain: the owned ship instance,
//! hand, resources, crew tokens, active effects and the per-turn flags
//! the action rules consult.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::action::ActionKind;
use crate::cards::{Card, CardId, Ship};
use crate::effects::EffectList;

/// Player identifier.
///
/// The engine never interprets the contents; it only compares them.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub String);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for PlayerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A crew token. Inactive tokens were spent on repairs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrewToken {
    pub active: bool,
}

/// Crew tokens in the order they were gained.
///
/// Ships carry 2-4 tokens, so the inline capacity covers every ship
/// until extra crew cards push it past four.
pub type Crew = SmallVec<[CrewToken; 4]>;

/// Per-player game state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Owned ship instance, cloned from the catalog template.
    pub ship: Ship,
    pub hand: Vec<Card>,
    pub ammunition: u32,
    pub gold: u32,
    pub map_fragments: u32,
    pub crew: Crew,
    pub effects: EffectList,

    // === Per-turn / per-round flags ===
    pub last_action: Option<ActionKind>,
    /// Damage from the most recent hit this round. Reset at round end.
    pub last_damage_taken: i32,
    /// Sum of the priority dice. Zero means "not rolled".
    pub priority_roll: u8,
    pub skip_next_turn: bool,
    /// Declared Maneuver this round.
    pub maneuvering: bool,
    /// Critical maneuver: extra reduction on the next incoming shot.
    pub has_maneuver_bonus: bool,
    /// Round of the last repair, 0 if never repaired.
    pub last_repair_round: u32,
    pub cannot_maneuver_next: bool,
    /// Round in which `cannot_maneuver_next` was set.
    #[serde(default)]
    pub reload_round: u32,
    /// Captain buff that shrugs off one event has been spent.
    #[serde(default)]
    pub event_shield_used: bool,
}

impl Player {
    /// Create a player around a ship instance with full crew.
    #[must_use]
    pub fn new(id: PlayerId, name: impl Into<String>, ship: Ship) -> Self {
        let crew = (0..ship.crew_capacity)
            .map(|_| CrewToken { active: true })
            .collect();
        Self {
            id,
            name: name.into(),
            ship,
            hand: Vec::new(),
            ammunition: 0,
            gold: 0,
            map_fragments: 0,
            crew,
            effects: EffectList::default(),
            last_action: None,
            last_damage_taken: 0,
            priority_roll: 0,
            skip_next_turn: false,
            maneuvering: false,
            has_maneuver_bonus: false,
            last_repair_round: 0,
            cannot_maneuver_next: false,
            reload_round: 0,
            event_shield_used: false,
        }
    }

    /// A ship with HP above zero is still in the fight.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.ship.hp > 0
    }

    /// Apply damage, clamped at 0. Returns the HP actually lost.
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        let before = self.ship.hp;
        self.ship.hp = (self.ship.hp - amount.max(0)).clamp(0, self.ship.max_hp);
        before - self.ship.hp
    }

    /// Restore HP, clamped at max. Returns the HP actually gained.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let before = self.ship.hp;
        self.ship.hp = (self.ship.hp + amount.max(0)).clamp(0, self.ship.max_hp);
        self.ship.hp - before
    }

    /// Number of active crew tokens.
    #[must_use]
    pub fn active_crew(&self) -> usize {
        self.crew.iter().filter(|c| c.active).count()
    }

    /// Deactivate the last active crew token. Returns false if none was active.
    pub fn deactivate_crew(&mut self) -> bool {
        match self.crew.iter_mut().rev().find(|c| c.active) {
            Some(token) => {
                token.active = false;
                true
            }
            None => false,
        }
    }

    /// Add one crew token, active only while below ship capacity.
    pub fn add_crew(&mut self) -> bool {
        let active = self.active_crew() < self.ship.crew_capacity as usize;
        self.crew.push(CrewToken { active });
        active
    }

    /// Position of a card in hand.
    #[must_use]
    pub fn find_card(&self, card: &CardId) -> Option<usize> {
        self.hand.iter().position(|c| &c.id == card)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{ship_template, ShipId};

    fn player(ship: ShipId) -> Player {
        Player::new(PlayerId::new("p1"), "Anne", ship_template(ship))
    }

    #[test]
    fn test_player_id_basics() {
        let id = PlayerId::from("abc");
        assert_eq!(id.as_str(), "abc");
        assert_eq!(format!("{}", id), "abc");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc\"");
    }

    #[test]
    fn test_new_player_has_full_crew() {
        let p = player(ShipId::Stormrider);
        assert_eq!(p.crew.len(), 4);
        assert_eq!(p.active_crew(), 4);
        assert!(p.is_alive());
    }

    #[test]
    fn test_damage_and_heal_clamp() {
        let mut p = player(ShipId::BlackSerpent);
        assert_eq!(p.take_damage(30), 30);
        assert_eq!(p.ship.hp, 70);
        assert_eq!(p.heal(50), 30);
        assert_eq!(p.ship.hp, 100);
        assert_eq!(p.take_damage(500), 100);
        assert_eq!(p.ship.hp, 0);
        assert!(!p.is_alive());
        assert_eq!(p.take_damage(-5), 0);
    }

    #[test]
    fn test_crew_deactivation_takes_last_active() {
        let mut p = player(ShipId::GoldenHarpoon);
        assert!(p.deactivate_crew());
        assert_eq!(p.crew[1], CrewToken { active: false });
        assert!(p.crew[0].active);
        assert!(p.deactivate_crew());
        assert!(!p.deactivate_crew());
        assert_eq!(p.active_crew(), 0);
    }

    #[test]
    fn test_add_crew_respects_capacity() {
        let mut p = player(ShipId::GoldenHarpoon);
        assert!(!p.add_crew());
        assert_eq!(p.crew.len(), 3);
        p.deactivate_crew();
        p.deactivate_crew();
        assert!(p.add_crew());
        assert_eq!(p.active_crew(), 1);
        assert_eq!(p.crew.len(), 4);
    }
}

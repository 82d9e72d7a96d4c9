//! Game configuration.
//!
//! `GameConfig` carries every tunable number the rules consult: starting
//! resources, hand limits, win thresholds, maneuver maths, deck sizes and
//! the event draw chance. Defaults reproduce the standard game.
//!
//! Drivers can override any subset from JSON:
//!
//! ```
//! use broadside::core::GameConfig;
//!
//! let config = GameConfig::from_json(r#"{ "goldWinThreshold": 30 }"#).unwrap();
//! assert_eq!(config.gold_win_threshold, 30);
//! assert_eq!(config.max_hand_size, 10);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// How many copies of each card pool go into a deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckCopies {
    pub action: usize,
    pub loot: usize,
    pub event: usize,
    pub starter: usize,
}

impl Default for DeckCopies {
    fn default() -> Self {
        Self {
            action: 3,
            loot: 5,
            event: 2,
            starter: 1,
        }
    }
}

/// Complete rules configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameConfig {
    pub starting_ammunition: u32,
    pub starting_gold: u32,
    /// Starter cards dealt to each player.
    pub starting_hand_size: usize,
    pub max_hand_size: usize,
    pub reload_amount: u32,

    /// Incoming damage reduction while maneuvering (fraction).
    pub base_maneuver_reduction: f64,
    /// Maneuver dice total that counts as critical.
    pub critical_maneuver_threshold: u8,
    /// Extra reduction granted by a critical maneuver (fraction).
    pub critical_maneuver_bonus: f64,

    pub gold_win_threshold: u32,
    pub map_fragments_to_win: u32,

    /// Chance of drawing an event card when a new round starts.
    pub event_chance: f64,
    pub deck_copies: DeckCopies,
    /// Log entries included in a snapshot.
    pub log_window: usize,

    /// Apply event card effects instead of only announcing them.
    pub apply_event_effects: bool,
    /// Return to the priority phase at the start of every round.
    pub reroll_priority_each_round: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_ammunition: 3,
            starting_gold: 0,
            starting_hand_size: 3,
            max_hand_size: 10,
            reload_amount: 2,
            base_maneuver_reduction: 0.2,
            critical_maneuver_threshold: 10,
            critical_maneuver_bonus: 0.1,
            gold_win_threshold: 20,
            map_fragments_to_win: 3,
            event_chance: 0.2,
            deck_copies: DeckCopies::default(),
            log_window: 20,
            apply_event_effects: false,
            reroll_priority_each_round: false,
        }
    }
}

impl GameConfig {
    /// Standard configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a (possibly partial) JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set the event draw chance.
    #[must_use]
    pub fn with_event_chance(mut self, chance: f64) -> Self {
        self.event_chance = chance;
        self
    }

    /// Set the deck copy counts.
    #[must_use]
    pub fn with_deck_copies(mut self, copies: DeckCopies) -> Self {
        self.deck_copies = copies;
        self
    }

    /// Set the maximum hand size.
    #[must_use]
    pub fn with_max_hand_size(mut self, max: usize) -> Self {
        self.max_hand_size = max;
        self
    }

    /// Set the number of starter cards dealt.
    #[must_use]
    pub fn with_starting_hand_size(mut self, size: usize) -> Self {
        self.starting_hand_size = size;
        self
    }

    /// Apply event effects mechanically.
    #[must_use]
    pub fn with_event_effects(mut self) -> Self {
        self.apply_event_effects = true;
        self
    }

    /// Re-roll priority every round.
    #[must_use]
    pub fn with_priority_each_round(mut self) -> Self {
        self.reroll_priority_each_round = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::default();
        assert_eq!(config.starting_ammunition, 3);
        assert_eq!(config.starting_hand_size, 3);
        assert_eq!(config.max_hand_size, 10);
        assert_eq!(config.reload_amount, 2);
        assert_eq!(config.gold_win_threshold, 20);
        assert_eq!(config.map_fragments_to_win, 3);
        assert_eq!(config.deck_copies, DeckCopies { action: 3, loot: 5, event: 2, starter: 1 });
        assert_eq!(config.log_window, 20);
        assert!(!config.apply_event_effects);
    }

    #[test]
    fn test_partial_json() {
        let config = GameConfig::from_json(
            r#"{ "mapFragmentsToWin": 5, "deckCopies": { "loot": 1 }, "applyEventEffects": true }"#,
        )
        .unwrap();
        assert_eq!(config.map_fragments_to_win, 5);
        assert_eq!(config.deck_copies.loot, 1);
        assert_eq!(config.deck_copies.action, 3);
        assert!(config.apply_event_effects);
        assert_eq!(config.starting_ammunition, 3);
    }

    #[test]
    fn test_bad_json() {
        assert!(matches!(
            GameConfig::from_json("{ nope"),
            Err(EngineError::Encoding(_))
        ));
    }

    #[test]
    fn test_builders() {
        let config = GameConfig::new()
            .with_event_chance(0.0)
            .with_max_hand_size(4)
            .with_starting_hand_size(1)
            .with_event_effects()
            .with_priority_each_round();
        assert!((config.event_chance - 0.0).abs() < f64::EPSILON);
        assert_eq!(config.max_hand_size, 4);
        assert_eq!(config.starting_hand_size, 1);
        assert!(config.apply_event_effects);
        assert!(config.reroll_priority_each_round);
    }
}

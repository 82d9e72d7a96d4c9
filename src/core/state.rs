//! Game phases, the game log, and the state snapshot.
//!
//! ## GameSnapshot
//!
//! Complete, independent copy of engine state handed to renderers and
//! network relays:
//! - Players (ships, hands, effects, flags)
//! - Round, phase, turn order, current index
//! - Decks, global effects, current event
//! - The most recent log entries
//!
//! Decks and the log are `im` persistent vectors, so taking a snapshot is
//! cheap and the copy shares no mutable state with the engine.

use std::time::{SystemTime, UNIX_EPOCH};

use im::Vector;
use serde::{Deserialize, Serialize};

use super::player::{Player, PlayerId};
use crate::cards::{Card, Decks};
use crate::effects::GlobalEffect;
use crate::error::EngineError;

/// Engine phase.
///
/// Legal transitions: `Priority -> Action`, `Action -> Action` (new round),
/// `Action -> Priority` (when priority is re-rolled each round),
/// `Action -> GameOver`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    /// Players roll for turn order.
    #[default]
    Priority,
    /// Players take turns in order.
    Action,
    /// A win condition was met.
    GameOver,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::Priority => "priority",
            Phase::Action => "action",
            Phase::GameOver => "game over",
        };
        f.write_str(name)
    }
}

/// One line of the game log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub round: u32,
    pub message: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp: u64,
}

impl LogEntry {
    /// Stamp a message with the current wall-clock time.
    #[must_use]
    pub fn now(round: u32, message: impl Into<String>) -> Self {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
            .unwrap_or(0);
        Self {
            round,
            message: message.into(),
            timestamp,
        }
    }
}

/// Append-only game log.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameLog {
    entries: Vector<LogEntry>,
}

impl GameLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry.
    pub fn push(&mut self, entry: LogEntry) {
        self.entries.push_back(entry);
    }

    /// The most recent `count` entries, oldest first.
    #[must_use]
    pub fn tail(&self, count: usize) -> GameLog {
        let skip = self.entries.len().saturating_sub(count);
        Self {
            entries: self.entries.clone().split_off(skip),
        }
    }

    /// Iterate oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    /// Most recent entry.
    #[must_use]
    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.last()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Serializable copy of everything needed to rebuild a game.
///
/// Field names follow the established wire format (`currentRound`,
/// `turnOrder`, `gameLog`, ...), so relays can treat it as an opaque blob.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub players: Vec<Player>,
    pub current_round: u32,
    pub current_phase: Phase,
    pub turn_order: Vec<PlayerId>,
    pub current_player_index: usize,
    pub priority_rolled: bool,
    pub decks: Decks,
    pub active_effects: Vec<GlobalEffect>,
    pub current_event: Option<Card>,
    pub game_log: GameLog,
}

impl GameSnapshot {
    /// Look up a player by ID.
    #[must_use]
    pub fn player(&self, id: &PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| &p.id == id)
    }

    /// Mutable player lookup. Changes never reach the engine.
    pub fn player_mut(&mut self, id: &PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| &p.id == id)
    }

    /// Encode as JSON.
    pub fn to_json(&self) -> Result<String, EngineError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode from JSON.
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Encode as pretty-printed JSON, for saves meant to be read by people.
    pub fn to_json_pretty(&self) -> Result<String, EngineError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_serde() {
        assert_eq!(serde_json::to_string(&Phase::GameOver).unwrap(), "\"gameOver\"");
        assert_eq!(serde_json::to_string(&Phase::Priority).unwrap(), "\"priority\"");
        assert_eq!(Phase::default(), Phase::Priority);
    }

    #[test]
    fn test_log_tail() {
        let mut log = GameLog::new();
        for i in 0..25 {
            log.push(LogEntry::now(1, format!("entry {}", i)));
        }
        assert_eq!(log.len(), 25);

        let tail = log.tail(20);
        assert_eq!(tail.len(), 20);
        assert_eq!(tail.iter().next().unwrap().message, "entry 5");
        assert_eq!(tail.last().unwrap().message, "entry 24");

        // original untouched
        assert_eq!(log.len(), 25);
        assert_eq!(log.tail(100).len(), 25);
    }

    #[test]
    fn test_log_entry_has_timestamp() {
        let entry = LogEntry::now(3, "hello");
        assert_eq!(entry.round, 3);
        assert!(entry.timestamp > 0);
    }
}

//! Engine errors.
//!
//! Every gameplay operation returns `Result<_, EngineError>`. A failed call
//! never mutates engine state, and the `Display` text is the message a
//! driver shows to the player.

use thiserror::Error;

use crate::core::{ActionKind, Phase, PlayerId};

/// A refused or invalid engine operation.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum EngineError {
    #[error("Player not found: {0}")]
    UnknownPlayer(PlayerId),

    #[error("Unknown ship: {0}")]
    UnknownShip(String),

    #[error("Invalid action: {0}")]
    UnknownAction(String),

    #[error("Player {0} joined twice")]
    DuplicatePlayer(PlayerId),

    #[error("A game needs at least one player")]
    NoPlayers,

    #[error("Game already initialized")]
    AlreadyInitialized,

    #[error("Not allowed during the {actual} phase (expected {expected})")]
    WrongPhase { expected: Phase, actual: Phase },

    #[error("Waiting for {0} player(s) to roll for priority")]
    PriorityPending(usize),

    #[error("Not your turn!")]
    NotYourTurn,

    #[error("{0}'s ship has sunk")]
    ShipSunk(PlayerId),

    #[error("No ammunition!")]
    NoAmmunition,

    #[error("Invalid target")]
    InvalidTarget,

    #[error("This needs a target")]
    TargetRequired,

    #[error("Cannot repair: Already at full HP")]
    AlreadyAtFullHp,

    #[error("Cannot repair: Repaired last turn without taking new damage")]
    RepairCooldown,

    #[error("Cannot maneuver this turn after reloading!")]
    ManeuverBlocked,

    #[error("Cannot {0} this turn!")]
    ActionDisabled(ActionKind),

    #[error("Loot deck is empty!")]
    LootUnavailable,

    #[error("Card not in hand")]
    CardNotInHand,

    #[error("The game is over")]
    GameOver,

    #[error("Encoding failed: {0}")]
    Encoding(String),
}

impl From<serde_json::Error> for EngineError {
    fn from(err: serde_json::Error) -> Self {
        Self::Encoding(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_match_driver_text() {
        assert_eq!(EngineError::NoAmmunition.to_string(), "No ammunition!");
        assert_eq!(EngineError::CardNotInHand.to_string(), "Card not in hand");
        assert_eq!(
            EngineError::ActionDisabled(ActionKind::Maneuver).to_string(),
            "Cannot maneuver this turn!"
        );
        assert_eq!(
            EngineError::WrongPhase { expected: Phase::Action, actual: Phase::Priority }.to_string(),
            "Not allowed during the priority phase (expected action)"
        );
    }

    #[test]
    fn test_json_error_converts() {
        let err = serde_json::from_str::<u32>("not json").unwrap_err();
        let engine_err: EngineError = err.into();
        assert!(matches!(engine_err, EngineError::Encoding(_)));
    }
}

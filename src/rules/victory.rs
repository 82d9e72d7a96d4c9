//! Win conditions.
//!
//! Checked in a fixed order, first match wins:
//! 1. exactly one ship afloat
//! 2. no ship afloat (draw)
//! 3. a player holding enough map fragments
//! 4. a player holding enough gold

use serde::{Deserialize, Serialize};

use crate::core::{GameConfig, Player, PlayerId};

/// How the game was won.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WinKind {
    LastStanding,
    Draw,
    MapFragments,
    Gold,
}

/// Result of a finished game. `player` is `None` only for a draw.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Victory {
    #[serde(rename = "type")]
    pub kind: WinKind,
    pub player: Option<PlayerId>,
}

impl Victory {
    #[must_use]
    pub fn new(kind: WinKind, player: Option<PlayerId>) -> Self {
        Self { kind, player }
    }

    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: &PlayerId) -> bool {
        self.player.as_ref() == Some(player)
    }
}

/// Evaluate the win conditions against the current players.
#[must_use]
pub fn evaluate(players: &[Player], config: &GameConfig) -> Option<Victory> {
    let mut alive = players.iter().filter(|p| p.is_alive());
    match (alive.next(), alive.next()) {
        (Some(survivor), None) => {
            return Some(Victory::new(WinKind::LastStanding, Some(survivor.id.clone())));
        }
        (None, _) => return Some(Victory::new(WinKind::Draw, None)),
        _ => {}
    }

    if let Some(p) = players
        .iter()
        .find(|p| p.map_fragments >= config.map_fragments_to_win)
    {
        return Some(Victory::new(WinKind::MapFragments, Some(p.id.clone())));
    }

    players
        .iter()
        .find(|p| p.gold >= config.gold_win_threshold)
        .map(|p| Victory::new(WinKind::Gold, Some(p.id.clone())))
}
